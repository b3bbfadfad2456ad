//! 3Dシーンの表示
//!
//! 描画は `<model-viewer>` 要素に任せる。シーンのカメラ位置を
//! camera-orbit に、モデル倍率を scale に変換して渡す。
//! ビューアにフォーカスがある間は WASD / Space / Shift で注視点ごと歩ける。

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use glam::Vec3;
use leptos::prelude::*;
use portfolio_common::{scale_attribute, CameraOrbit, FlyCamera, FrameLoop, ModelLoad, SceneItem};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, Element, KeyboardEvent};

use crate::browser::BrowserScheduler;

type WalkLoop = Rc<RefCell<Option<FrameLoop<BrowserScheduler>>>>;

struct ViewerRuntime {
    _listeners: Vec<EventListener>,
    _walk: WalkLoop,
}

/// `<model-viewer>` のメソッドを呼んで戻り値を得る
fn call_method(viewer: &Element, name: &str) -> Option<JsValue> {
    let method = js_sys::Reflect::get(viewer, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    method.call0(viewer).ok()
}

fn number(value: &JsValue, key: &str) -> Option<f32> {
    js_sys::Reflect::get(value, &JsValue::from_str(key))
        .ok()?
        .as_f64()
        .map(|v| v as f32)
}

/// 現在の方位角 (ラジアン)
fn current_theta(viewer: &Element) -> Option<f32> {
    number(&call_method(viewer, "getCameraOrbit")?, "theta")
}

fn current_target(viewer: &Element) -> Option<Vec3> {
    let target = call_method(viewer, "getCameraTarget")?;
    Some(Vec3::new(
        number(&target, "x")?,
        number(&target, "y")?,
        number(&target, "z")?,
    ))
}

impl ViewerRuntime {
    fn start(stage: &Element, viewer: Element, load: RwSignal<ModelLoad>, initial_theta: f32) -> Self {
        let camera = Rc::new(RefCell::new(FlyCamera::new(Vec3::ZERO)));
        let walk: WalkLoop = Rc::new(RefCell::new(None));
        let mut listeners = Vec::new();

        listeners.push(EventListener::new(&viewer, "progress", move |event| {
            let fraction = event
                .dyn_ref::<CustomEvent>()
                .and_then(|event| number(&event.detail(), "totalProgress"));
            if let Some(fraction) = fraction {
                load.update(|state| *state = state.progress(fraction as f64));
            }
        }));
        listeners.push(EventListener::new(&viewer, "load", move |_| load.set(ModelLoad::Ready)));
        {
            let src = viewer.get_attribute("src").unwrap_or_default();
            listeners.push(EventListener::new(&viewer, "error", move |_| {
                log::warn!("scene: モデルを読み込めません: {}", src);
                load.set(ModelLoad::Failed);
            }));
        }

        {
            let camera = camera.clone();
            let walk = walk.clone();
            let viewer = viewer.clone();
            listeners.push(EventListener::new_with_options(
                stage,
                "keydown",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                        return;
                    };
                    // 「Controles」ボタン上の Space はボタン操作に残す
                    let on_button = event
                        .target()
                        .and_then(|target| target.dyn_into::<Element>().ok())
                        .is_some_and(|element| element.tag_name() == "BUTTON");
                    if on_button {
                        return;
                    }
                    if !camera.borrow_mut().key_down(&key) {
                        return;
                    }
                    // Space でページがスクロールしないように
                    event.prevent_default();

                    if walk.borrow().as_ref().is_some_and(FrameLoop::is_running) {
                        return;
                    }
                    // ユーザーがパンした位置から歩き出す
                    if let Some(target) = current_target(&viewer) {
                        camera.borrow_mut().set_target(target);
                    }
                    let frames = walk_loop(camera.clone(), viewer.clone(), initial_theta);
                    *walk.borrow_mut() = Some(frames);
                },
            ));
        }
        {
            let camera = camera.clone();
            listeners.push(EventListener::new(stage, "keyup", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    camera.borrow_mut().key_up(&event.key());
                }
            }));
        }
        {
            let camera = camera.clone();
            listeners.push(EventListener::new(stage, "focusout", move |_| {
                camera.borrow_mut().release_all();
            }));
        }

        Self {
            _listeners: listeners,
            _walk: walk,
        }
    }
}

/// キーが離されるまで毎フレーム注視点を動かす
fn walk_loop(camera: Rc<RefCell<FlyCamera>>, viewer: Element, initial_theta: f32) -> FrameLoop<BrowserScheduler> {
    FrameLoop::start(&BrowserScheduler, move |_| {
        let mut camera = camera.borrow_mut();
        if !camera.is_moving() {
            return false;
        }
        let theta = current_theta(&viewer).unwrap_or(initial_theta);
        camera.step(theta);
        if let Err(e) = viewer.set_attribute("camera-target", &camera.to_attribute()) {
            log::trace!("scene: camera-target を設定できません: {:?}", e);
        }
        true
    })
}

#[component]
pub fn SceneViewer(scene: SceneItem) -> impl IntoView {
    let (show_controls, set_show_controls) = signal(true);
    let load = RwSignal::new(ModelLoad::default());
    let stage_ref = NodeRef::<leptos::html::Div>::new();
    let runtime = StoredValue::new_local(None::<ViewerRuntime>);

    let orbit = CameraOrbit::for_scene(&scene);
    let initial_theta = orbit.theta_deg.to_radians();
    let scale = scale_attribute(scene.model_scale);

    Effect::new(move |_| {
        let Some(stage) = stage_ref.get() else {
            return;
        };
        if runtime.with_value(Option::is_some) {
            return;
        }
        match stage.query_selector("model-viewer") {
            Ok(Some(viewer)) => {
                runtime.set_value(Some(ViewerRuntime::start(&stage, viewer, load, initial_theta)));
            }
            _ => log::warn!("scene: model-viewer 要素がありません"),
        }
    });

    view! {
        <div class="scene-viewer" node_ref=stage_ref tabindex="0">
            <model-viewer
                src=scene.model.clone()
                poster=scene.item.media.clone()
                alt=scene.item.title.clone()
                camera-orbit=orbit.to_attribute()
                scale=scale
                camera-controls=""
                shadow-intensity="1"
                exposure="1"
            ></model-viewer>

            <Show when=move || load.get().is_loading()>
                <div class="scene-loading" role="status">
                    <div class="scene-spinner"></div>
                    <p>"Cargando modelo 3D... " {move || load.get().percent()} "%"</p>
                </div>
            </Show>
            <Show when=move || load.get() == ModelLoad::Failed>
                <p class="scene-error">"No se pudo cargar el modelo 3D"</p>
            </Show>

            <button
                class="scene-controls-toggle"
                on:click=move |_| set_show_controls.update(|v| *v = !*v)
            >
                "Controles"
            </button>

            <Show when=move || show_controls.get()>
                <div class="scene-controls">
                    <p class="scene-controls-title">"Controles"</p>
                    <ul>
                        <li>"W A S D: moverse"</li>
                        <li>"Espacio: subir"</li>
                        <li>"Shift: bajar / correr"</li>
                        <li>"Arrastrar: rotar la cámara"</li>
                        <li>"Rueda: acercar / alejar"</li>
                    </ul>
                </div>
            </Show>
        </div>
    }
}
