//! ドキュメント内リソースの集計

use portfolio_common::ResourceSnapshot;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

/// document.readyState
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    pub fn parse(value: &str) -> Self {
        match value {
            "complete" => ReadyState::Complete,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Loading,
        }
    }

    pub fn of(document: &Document) -> Self {
        Self::parse(&document.ready_state())
    }
}

/// 画像・スクリプト・スタイルシートの数を数える
///
/// 画像は complete かつ naturalHeight > 0 のものをデコード済みとする。
pub fn snapshot(document: &Document) -> ResourceSnapshot {
    let images = document.images();
    let decoded = (0..images.length())
        .filter_map(|i| images.item(i))
        .filter_map(|element| element.dyn_into::<HtmlImageElement>().ok())
        .filter(|image| image.complete() && image.natural_height() > 0)
        .count();

    ResourceSnapshot {
        images: images.length() as usize,
        images_decoded: decoded,
        scripts: document.scripts().length() as usize,
        stylesheets: document.style_sheets().length() as usize,
    }
}
