//! Hero 背景のパーティクル
//!
//! `ParticleField` を毎フレーム進め、2D canvas に加算合成で描く。
//! マウス位置から粒子が逃げる。

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::events::EventListener;
use glam::Vec3;
use leptos::prelude::*;
use portfolio_common::particles::pointer_from_client;
use portfolio_common::{FrameLoop, ParticleConfig, ParticleField, Projection};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::browser::{window, BrowserScheduler};

/// キャンバスの表示サイズ (CSS px)
type CanvasSize = Rc<Cell<(f64, f64)>>;

struct ParticleRuntime {
    _frames: FrameLoop<BrowserScheduler>,
    _listeners: Vec<EventListener>,
}

fn css_color(color: Vec3) -> String {
    let [r, g, b] = (color * 255.0).round().to_array();
    format!("rgb({}, {}, {})", r as u8, g as u8, b as u8)
}

fn resize(canvas: &HtmlCanvasElement, size: &CanvasSize) {
    let width = canvas.client_width().max(1);
    let height = canvas.client_height().max(1);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    size.set((width as f64, height as f64));
}

fn draw(context: &CanvasRenderingContext2d, field: &ParticleField, time: f32, (width, height): (f64, f64), opacity: f32) {
    context.clear_rect(0.0, 0.0, width, height);
    if let Err(e) = context.set_global_composite_operation("lighter") {
        log::trace!("particles: 加算合成を設定できません: {:?}", e);
    }
    context.set_global_alpha(opacity as f64);

    let projection = Projection::new(width as f32, height as f32);
    for point in field.project(time, &projection) {
        context.set_fill_style_str(&css_color(point.color));
        context.begin_path();
        let radius = (point.size as f64 / 2.0).max(0.5);
        if context.arc(point.x as f64, point.y as f64, radius, 0.0, TAU).is_ok() {
            context.fill();
        }
    }
}

impl ParticleRuntime {
    fn start(canvas: HtmlCanvasElement, config: &ParticleConfig) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let window = window()?;

        let field = Rc::new(RefCell::new(ParticleField::new(config, || js_sys::Math::random() as f32)));
        let size: CanvasSize = Rc::new(Cell::new((0.0, 0.0)));
        resize(&canvas, &size);

        let mut listeners = Vec::new();
        {
            let canvas = canvas.clone();
            let size = size.clone();
            listeners.push(EventListener::new(&window, "resize", move |_| resize(&canvas, &size)));
        }
        {
            let field = field.clone();
            let size = size.clone();
            listeners.push(EventListener::new(&window, "mousemove", move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (width, height) = size.get();
                let ndc = pointer_from_client(mouse.client_x() as f64, mouse.client_y() as f64, width, height);
                field.borrow_mut().set_pointer(ndc);
            }));
        }

        let opacity = config.opacity;
        let mut origin = None;
        let frames = FrameLoop::start(&BrowserScheduler, move |timestamp| {
            let time = ((timestamp - *origin.get_or_insert(timestamp)) / 1000.0) as f32;
            let mut field = field.borrow_mut();
            field.step(time);
            draw(&context, &field, time, size.get(), opacity);
            true
        });

        log::debug!("particles: {} 粒子", config.count);
        Some(Self {
            _frames: frames,
            _listeners: listeners,
        })
    }
}

#[component]
pub fn ParticleBackground(config: ParticleConfig) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let runtime = StoredValue::new_local(None::<ParticleRuntime>);

    Effect::new(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        if runtime.with_value(Option::is_some) {
            return;
        }
        match ParticleRuntime::start(canvas, &config) {
            Some(started) => runtime.set_value(Some(started)),
            None => log::warn!("particles: canvas 2D コンテキストを取得できません"),
        }
    });

    view! { <canvas node_ref=canvas_ref class="particle-canvas" aria-hidden="true"></canvas> }
}
