//! gloo によるスケジューラ実装

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::{Interval, Timeout};
use portfolio_common::Scheduler;

/// requestAnimationFrame / setTimeout / setInterval
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// drop すると対応するブラウザ側の予約も取り消される
pub enum BrowserHandle {
    Frame(AnimationFrame),
    Timeout(Timeout),
    Interval(Interval),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserHandle;

    fn now(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> BrowserHandle {
        BrowserHandle::Frame(request_animation_frame(callback))
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> BrowserHandle {
        BrowserHandle::Timeout(Timeout::new(delay_ms, callback))
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> BrowserHandle {
        BrowserHandle::Interval(Interval::new(period_ms, callback))
    }
}
