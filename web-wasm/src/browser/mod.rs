//! ブラウザAPIとの接続部
//!
//! `portfolio_common` の状態機械を web-sys / gloo に結びつける。
//! 要素が見つからない・JS呼び出しが失敗した場合はログを残して何もしない。

pub mod animate;
pub mod observer;
pub mod resources;
pub mod scheduler;
pub mod smooth_scroll;

pub use animate::TimelinePlayer;
pub use observer::RevealObserver;
pub use scheduler::{BrowserHandle, BrowserScheduler};
pub use smooth_scroll::{provide_scroll_service, use_scroll_service, ScrollService};

use web_sys::{Document, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// ビューポートの高さ (px)
pub fn viewport_height() -> f64 {
    window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

/// スクロール可能な最大位置
pub fn scroll_limit() -> f64 {
    let content = document()
        .and_then(|d| d.document_element())
        .map(|root| root.scroll_height() as f64)
        .unwrap_or(0.0);
    (content - viewport_height()).max(0.0)
}

/// 要素上端のドキュメント座標
pub fn document_top(element: &web_sys::Element) -> f64 {
    element.get_bounding_client_rect().top() + scroll_y()
}
