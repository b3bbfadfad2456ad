//! タイムラインのDOM再生
//!
//! 各 `Slot` は `data-reveal` 属性で要素と対応づける。`Slot::Item(i)` なら
//! `[data-reveal="item"]` の i 番目。ルート要素自身が一致する場合はそれを使う。
//! 幅のアニメーションは `data-width` を持つ要素だけに適用する。

use portfolio_common::{FrameLoop, Pose, Slot, Timeline};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, HtmlElement};

use super::scheduler::BrowserScheduler;

fn target(root: &Element, slot: Slot) -> Option<HtmlElement> {
    let key = slot.key();
    if root.get_attribute("data-reveal").as_deref() == Some(key) && slot.index() == 0 {
        return root.clone().dyn_into::<HtmlElement>().ok();
    }

    let selector = format!("[data-reveal='{}']", key);
    let nodes = root.query_selector_all(&selector).ok()?;
    nodes
        .item(slot.index() as u32)
        .and_then(|node| node.dyn_into::<HtmlElement>().ok())
}

fn set_style(style: &CssStyleDeclaration, property: &str, value: &str) {
    if let Err(e) = style.set_property(property, value) {
        log::trace!("animate: {} を設定できません: {:?}", property, e);
    }
}

fn apply_pose(element: &HtmlElement, pose: Pose) {
    let style = element.style();
    set_style(&style, "transform", &pose.transform());
    set_style(&style, "opacity", &format!("{:.4}", pose.opacity));

    if let Some(width) = element.get_attribute("data-width") {
        let value = if pose.width >= 1.0 {
            width
        } else {
            format!("calc({} * {:.4})", width, pose.width.max(0.0))
        };
        set_style(&style, "width", &value);
    }
}

fn apply_frame(root: &Element, timeline: &Timeline, slots: &[Slot], t: f64) {
    for &slot in slots {
        match target(root, slot) {
            Some(element) => apply_pose(&element, timeline.sample_slot(slot, t)),
            None => log::trace!("animate: 対象要素なし data-reveal={}", slot.key()),
        }
    }
}

/// 再生中のタイムライン。drop すると止まる
pub struct TimelinePlayer {
    frames: FrameLoop<BrowserScheduler>,
}

impl TimelinePlayer {
    /// 開始Poseを先に当てておく（描画前のちらつき防止）
    pub fn prepare(root: &Element, timeline: &Timeline) {
        apply_frame(root, timeline, &timeline.slots(), 0.0);
    }

    /// 次のフレームから再生し、終わったら `on_finish` を呼ぶ
    pub fn play<F>(root: Element, timeline: Timeline, on_finish: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let scheduler = BrowserScheduler;
        let slots = timeline.slots();
        let mut origin = None;
        let mut on_finish = Some(on_finish);

        let frames = FrameLoop::start(&scheduler, move |timestamp| {
            let t = timestamp - *origin.get_or_insert(timestamp);
            apply_frame(&root, &timeline, &slots, t);

            if timeline.is_finished(t) {
                if let Some(finish) = on_finish.take() {
                    finish();
                }
                return false;
            }
            true
        });

        Self { frames }
    }

    pub fn is_playing(&self) -> bool {
        self.frames.is_running()
    }

    pub fn stop(&self) {
        self.frames.stop();
    }
}
