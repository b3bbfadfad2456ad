//! スムーススクロールのサービス
//!
//! アプリ起動時に `ScrollService::start` で作り、コンテキストで配る。
//! ページ内アンカーのクリックとホイールを横取りし、毎フレーム
//! `SmoothScroller` の位置を書き込む。アイドル中はネイティブの
//! スクロール位置（キーボード・スクロールバー操作）に追従する。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use leptos::prelude::*;
use portfolio_common::scroll::normalize_wheel_delta;
use portfolio_common::{parse_anchor, resolve_anchor, FrameLoop, Scheduler, ScrollCommand, ScrollConfig, SmoothScroller};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, ScrollBehavior, ScrollToOptions, WheelEvent};

use super::scheduler::BrowserScheduler;
use super::{document, document_top, scroll_limit, scroll_y, viewport_height, window};

struct ScrollRuntime {
    scroller: RefCell<SmoothScroller>,
    config: ScrollConfig,
    scheduler: BrowserScheduler,
    frames: RefCell<Option<FrameLoop<BrowserScheduler>>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl ScrollRuntime {
    fn new(config: ScrollConfig) -> Rc<Self> {
        let mut scroller = SmoothScroller::new(config);
        scroller.sync(scroll_y(), scroll_limit());

        Rc::new(Self {
            scroller: RefCell::new(scroller),
            config,
            scheduler: BrowserScheduler,
            frames: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        })
    }

    fn attach(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let frames = FrameLoop::start(&self.scheduler, move |timestamp| match weak.upgrade() {
            Some(runtime) => {
                runtime.frame(timestamp);
                true
            }
            None => false,
        });
        *self.frames.borrow_mut() = Some(frames);

        let mut listeners = Vec::new();

        if let Some(document) = document() {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new_with_options(
                &document,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| with_runtime(&weak, |runtime| runtime.on_click(event)),
            ));
        }

        if let Some(window) = window() {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new_with_options(
                &window,
                "wheel",
                EventListenerOptions::enable_prevent_default(),
                move |event| with_runtime(&weak, |runtime| runtime.on_wheel(event)),
            ));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    fn detach(&self) {
        let frames = self.frames.borrow_mut().take();
        drop(frames);
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        drop(listeners);
        self.scroller.borrow_mut().stop();
    }

    fn frame(&self, now: f64) {
        let position = {
            let mut scroller = self.scroller.borrow_mut();
            scroller.sync(scroll_y(), scroll_limit());
            scroller.frame(now)
        };

        if let (Some(y), Some(window)) = (position, window()) {
            window.scroll_to_with_x_and_y(0.0, y);
        }
    }

    fn scroll_to(&self, command: ScrollCommand) {
        let now = self.scheduler.now();
        let mut scroller = self.scroller.borrow_mut();
        scroller.sync(scroll_y(), scroll_limit());
        let to = scroller.scroll_to(command, now);
        log::debug!("scroll: → {:.0}px ({:.0}ms)", to, command.duration_ms);
    }

    fn on_click(&self, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Some(anchor) = target.closest("a[href^='#']").ok().flatten() else {
            return;
        };
        let Some(href) = anchor.get_attribute("href") else {
            return;
        };
        let Some(intent) = parse_anchor(&href) else {
            return;
        };

        event.prevent_default();

        let command = resolve_anchor(
            &intent,
            |id| document()?.get_element_by_id(id).map(|element| document_top(&element)),
            &self.config,
        );
        match command {
            Some(command) => self.scroll_to(command),
            None => log::debug!("scroll: アンカー先が見つかりません: {}", href),
        }
    }

    fn on_wheel(&self, event: &Event) {
        let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
            return;
        };
        // ピンチズームや、他の要素（model-viewer など）が処理済みのもの
        if wheel.ctrl_key() || event.default_prevented() {
            return;
        }

        let delta = normalize_wheel_delta(wheel.delta_y(), wheel.delta_mode(), viewport_height());
        if delta == 0.0 {
            return;
        }

        event.prevent_default();
        let now = self.scheduler.now();
        self.scroller.borrow_mut().wheel(delta, now);
    }
}

fn with_runtime(weak: &Weak<ScrollRuntime>, f: impl FnOnce(&ScrollRuntime)) {
    if let Some(runtime) = weak.upgrade() {
        f(&runtime);
    }
}

/// ネイティブのスムーススクロール（サービス停止後の代替）
fn native_scroll_to(command: ScrollCommand) {
    let Some(window) = window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top((command.destination + command.offset_px).max(0.0));
    options.set_behavior(if command.duration_ms > 0.0 {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    window.scroll_to_with_scroll_to_options(&options);
}

/// スクロールの窓口。`Copy` なのでクロージャにそのまま渡せる
#[derive(Clone, Copy)]
pub struct ScrollService {
    runtime: StoredValue<Option<Rc<ScrollRuntime>>, LocalStorage>,
}

impl ScrollService {
    pub fn start(config: ScrollConfig) -> Self {
        let runtime = ScrollRuntime::new(config);
        runtime.attach();
        log::info!("scroll: サービス開始");

        Self {
            runtime: StoredValue::new_local(Some(runtime)),
        }
    }

    fn runtime(&self) -> Option<Rc<ScrollRuntime>> {
        self.runtime.try_with_value(|runtime| runtime.clone()).flatten()
    }

    pub fn is_active(&self) -> bool {
        self.runtime().is_some()
    }

    /// 後から呼んだものが優先される
    pub fn scroll_to(&self, command: ScrollCommand) {
        match self.runtime() {
            Some(runtime) => runtime.scroll_to(command),
            None => native_scroll_to(command),
        }
    }

    pub fn scroll_to_element(&self, element: &Element, offset_px: f64, duration_ms: f64) {
        self.scroll_to(ScrollCommand {
            destination: document_top(element),
            duration_ms,
            offset_px,
        });
    }

    /// リスナーとフレームループを外す。二度目以降は何もしない
    pub fn dispose(&self) {
        let runtime = self.runtime.try_update_value(|runtime| runtime.take()).flatten();
        if let Some(runtime) = runtime {
            runtime.detach();
            log::info!("scroll: サービス停止");
        }
    }
}

pub fn provide_scroll_service(service: ScrollService) {
    provide_context(service);
}

pub fn use_scroll_service() -> Option<ScrollService> {
    use_context::<ScrollService>()
}
