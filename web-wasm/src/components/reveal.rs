//! セクション登場アニメーションの共通処理

use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::ElementType;
use leptos::prelude::*;
use portfolio_common::Timeline;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::browser::{RevealObserver, TimelinePlayer};

type PlayerSlot = Rc<RefCell<Option<TimelinePlayer>>>;

#[derive(Default)]
struct RevealState {
    started: bool,
    observer: Option<RevealObserver>,
    player: PlayerSlot,
}

fn play_into(slot: &PlayerSlot, root: Element, timeline: Timeline) {
    let player = TimelinePlayer::play(root, timeline, || {});
    *slot.borrow_mut() = Some(player);
}

/// セクションが `threshold` 以上見えたら一度だけ `timeline` を再生する
///
/// マウント時に開始Poseを当てておき、IntersectionObserver が使えない
/// 環境ではその場で再生する。
pub fn reveal_on_enter<E>(target: NodeRef<E>, threshold: f64, timeline: Timeline)
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
{
    let state = StoredValue::new_local(RevealState::default());

    Effect::new(move |_| {
        let Some(root) = target.get() else {
            return;
        };
        if state.with_value(|s| s.started) {
            return;
        }
        let root: Element = root.unchecked_into();
        TimelinePlayer::prepare(&root, &timeline);

        let player = state.with_value(|s| s.player.clone());
        let on_play = {
            let player = player.clone();
            let root = root.clone();
            let timeline = timeline.clone();
            move || play_into(&player, root, timeline)
        };

        let observer = RevealObserver::observe(&root, threshold, on_play);
        if observer.is_none() {
            play_into(&player, root, timeline.clone());
        }

        state.update_value(|s| {
            s.started = true;
            s.observer = observer;
        });
    });
}

/// マウント直後に再生する
pub fn play_on_mount<E>(target: NodeRef<E>, timeline: Timeline)
where
    E: ElementType + 'static,
    E::Output: JsCast + Clone + 'static,
{
    let state = StoredValue::new_local(RevealState::default());

    Effect::new(move |_| {
        let Some(root) = target.get() else {
            return;
        };
        if state.with_value(|s| s.started) {
            return;
        }
        let root: Element = root.unchecked_into();
        TimelinePlayer::prepare(&root, &timeline);

        state.update_value(|s| {
            s.started = true;
            play_into(&s.player, root, timeline.clone());
        });
    });
}
