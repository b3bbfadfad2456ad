//! 可視状態に応じて一度だけ登場アニメーションを起動する

use std::cell::RefCell;
use std::rc::Rc;

use portfolio_common::gate::reachable_threshold;
use portfolio_common::{EntranceGate, GateAction, GateEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// IntersectionObserver と `EntranceGate` の組
///
/// 発火したら監視を外す。drop で Teardown を送り、監視も外す。
pub struct RevealObserver {
    observer: IntersectionObserver,
    gate: Rc<RefCell<EntranceGate>>,
    _callback: ObserverCallback,
}

impl RevealObserver {
    pub fn observe<F>(target: &Element, threshold: f64, on_play: F) -> Option<Self>
    where
        F: FnOnce() + 'static,
    {
        let section_height = target.get_bounding_client_rect().height();
        let threshold = reachable_threshold(threshold, section_height, super::viewport_height());
        let gate = Rc::new(RefCell::new(EntranceGate::new(threshold)));
        let mut on_play = Some(on_play);

        let callback_gate = gate.clone();
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let action = callback_gate.borrow_mut().tick(GateEvent::Intersection {
                    ratio: entry.intersection_ratio(),
                    is_intersecting: entry.is_intersecting(),
                });
                if action == GateAction::Play {
                    observer.disconnect();
                    if let Some(play) = on_play.take() {
                        log::debug!("reveal: 登場アニメーション開始");
                        play();
                    }
                    break;
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver を作成できません: {:?}", e);
                return None;
            }
        };
        observer.observe(target);

        Some(Self {
            observer,
            gate,
            _callback: callback,
        })
    }

    /// まだ発火していないか
    pub fn is_armed(&self) -> bool {
        self.gate.borrow().is_armed()
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        if let Ok(mut gate) = self.gate.try_borrow_mut() {
            gate.tick(GateEvent::Teardown);
        }
        self.observer.disconnect();
    }
}
