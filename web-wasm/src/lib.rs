//! Portfolio Web App (Leptos + WASM)

mod app;
pub mod browser;
pub mod components;
pub mod content;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("ロガーを初期化できません: {}", e).into());
    }

    leptos::mount::mount_to_body(app::App);
}
