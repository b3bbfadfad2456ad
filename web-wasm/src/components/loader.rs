//! ローディング画面
//!
//! ドキュメント内のリソース数から進捗を推定して表示し、
//! 読み込み完了と最低表示時間の経過を待って退場アニメーションを流す。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use leptos::prelude::*;
use portfolio_common::timeline::loader_exit;
use portfolio_common::{FrameLoop, LoadEstimator, LoadEvent, LoadPhase, LoaderCommand, LoaderConfig, Scheduler};
use web_sys::Element;

use crate::browser::resources::{snapshot, ReadyState};
use crate::browser::{document, window, BrowserHandle, BrowserScheduler, TimelinePlayer};

struct LoaderState {
    estimator: LoadEstimator,
    poll: Option<BrowserHandle>,
    frames: Option<FrameLoop<BrowserScheduler>>,
    exit_timer: Option<BrowserHandle>,
    exit: Option<TimelinePlayer>,
    listeners: Vec<EventListener>,
}

type SharedState = Rc<RefCell<LoaderState>>;

fn feed(state: &Weak<RefCell<LoaderState>>, event: LoadEvent) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let now = BrowserScheduler.now();
    state.borrow_mut().estimator.tick(event, now);
}

fn dom_ready(state: &Weak<RefCell<LoaderState>>) {
    if let Some(document) = document() {
        feed(state, LoadEvent::DomReady(snapshot(&document)));
    }
}

/// 読み込みシグナルを購読する
///
/// readyState が complete ならその場で完了、interactive なら load を待つ、
/// loading なら DOMContentLoaded と load の両方を待つ。
fn listen_ready_state(state: &SharedState) -> Vec<EventListener> {
    let (Some(window), Some(document)) = (window(), document()) else {
        return Vec::new();
    };
    let weak = Rc::downgrade(state);
    let mut listeners = Vec::new();

    let ready_state = ReadyState::of(&document);
    log::debug!("loader: readyState={:?}", ready_state);

    match ready_state {
        ReadyState::Complete => {
            dom_ready(&weak);
            feed(&weak, LoadEvent::AllLoaded);
        }
        ReadyState::Interactive => {
            dom_ready(&weak);
        }
        ReadyState::Loading => {
            let on_dom = weak.clone();
            listeners.push(EventListener::once(&document, "DOMContentLoaded", move |_| {
                dom_ready(&on_dom)
            }));
        }
    }

    if ready_state != ReadyState::Complete {
        listeners.push(EventListener::once(&window, "load", move |_| {
            feed(&weak, LoadEvent::AllLoaded)
        }));
    }

    listeners
}

fn schedule_exit(state: &Weak<RefCell<LoaderState>>, root: Element, delay_ms: f64, set_visible: WriteSignal<bool>) {
    let Some(shared) = state.upgrade() else {
        return;
    };
    let weak = state.clone();
    let timer = BrowserScheduler.set_timeout(
        delay_ms.ceil() as u32,
        Box::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            log::info!("loader: 退場");
            let player = TimelinePlayer::play(root, loader_exit(), move || {
                set_visible.set(false);
            });
            shared.borrow_mut().exit = Some(player);
        }),
    );

    let mut state = shared.borrow_mut();
    state.exit_timer = Some(timer);
    state.poll = None;
}

/// 推定を始める。戻り値を drop すると全ての予約とリスナーが外れる
fn start(root: Element, config: LoaderConfig, set_percent: WriteSignal<u8>, set_visible: WriteSignal<bool>) -> SharedState {
    let scheduler = BrowserScheduler;
    let state = Rc::new(RefCell::new(LoaderState {
        estimator: LoadEstimator::new(config, scheduler.now()),
        poll: None,
        frames: None,
        exit_timer: None,
        exit: None,
        listeners: Vec::new(),
    }));

    let listeners = listen_ready_state(&state);

    let poll_state = Rc::downgrade(&state);
    let poll = scheduler.set_interval(
        config.poll_interval_ms,
        Box::new(move || {
            if let Some(document) = document() {
                feed(&poll_state, LoadEvent::Poll(snapshot(&document)));
            }
        }),
    );

    let frame_state = Rc::downgrade(&state);
    let frames = FrameLoop::start(&scheduler, move |timestamp| {
        let Some(shared) = frame_state.upgrade() else {
            return false;
        };
        let (command, percent, phase) = {
            let mut state = shared.borrow_mut();
            let command = state.estimator.tick(LoadEvent::Frame, timestamp);
            (command, state.estimator.display_percent(), state.estimator.phase())
        };
        set_percent.maybe_update(|shown| {
            let changed = *shown != percent;
            *shown = percent;
            changed
        });

        if let Some(LoaderCommand::ScheduleExit { delay_ms }) = command {
            schedule_exit(&frame_state, root.clone(), delay_ms, set_visible);
        }
        phase != LoadPhase::Done
    });

    {
        let mut shared = state.borrow_mut();
        shared.listeners = listeners;
        shared.poll = Some(poll);
        shared.frames = Some(frames);
    }
    state
}

#[component]
pub fn Loader(config: LoaderConfig) -> impl IntoView {
    let (visible, set_visible) = signal(true);
    let (percent, set_percent) = signal(0u8);

    view! {
        <Show when=move || visible.get()>
            <LoaderOverlay config=config percent=percent set_percent=set_percent set_visible=set_visible />
        </Show>
    }
}

#[component]
fn LoaderOverlay(
    config: LoaderConfig,
    percent: ReadSignal<u8>,
    set_percent: WriteSignal<u8>,
    set_visible: WriteSignal<bool>,
) -> impl IntoView {
    let root_ref = NodeRef::<leptos::html::Div>::new();
    let runtime = StoredValue::new_local(None::<SharedState>);

    Effect::new(move |_| {
        let Some(root) = root_ref.get() else {
            return;
        };
        if runtime.with_value(Option::is_some) {
            return;
        }
        let element: Element = root.into();
        runtime.set_value(Some(start(element, config, set_percent, set_visible)));
    });

    view! {
        <div node_ref=root_ref class="loader" data-reveal="overlay">
            <div class="loader-content">
                <p class="loader-percentage" data-reveal="percentage">
                    {move || format!("{}%", percent.get())}
                </p>
                <div class="loader-track" data-reveal="track">
                    <div
                        class="loader-fill"
                        style=move || format!("width: {}%", percent.get())
                    />
                </div>
            </div>
        </div>
    }
}
