//! ギャラリー選択コントローラ
//!
//! 選択中の項目と「更新中」フラグを持つ。`select` は状態を書き換え、
//! 呼び出し側が実行すべき遅延処理（フラグ解除・説明パネルへのスクロール）を返す。

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::GalleryOptions;

/// `select` が要求する遅延処理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEffect {
    /// `after_ms` 後に `settle(generation)` を呼ぶ
    Settle { after_ms: u32, generation: u64 },
    /// `after_ms` 後に説明パネルへスクロールする
    ScrollToPanel {
        after_ms: u32,
        offset_px: i32,
        duration_ms: u32,
    },
}

/// 選択状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selected_id: u32,
    transitioning: bool,
    generation: u64,
}

impl Selection {
    /// 先頭項目を選択した状態で開始
    pub fn new<T: CatalogEntry>(catalog: &Catalog<T>) -> Self {
        Self {
            selected_id: catalog.first().id(),
            transitioning: false,
            generation: 0,
        }
    }

    pub fn selected_id(&self) -> u32 {
        self.selected_id
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selected_id == id
    }

    /// 現在の項目
    pub fn current<'a, T: CatalogEntry>(&self, catalog: &'a Catalog<T>) -> &'a T {
        catalog.get(self.selected_id).unwrap_or_else(|| catalog.first())
    }

    /// 項目を選択する
    ///
    /// 選択済みの項目を再度選んだ場合も遷移とスクロールをやり直す。
    /// カタログにないIDは何もせず `None`。
    pub fn select<T: CatalogEntry>(
        &mut self,
        catalog: &Catalog<T>,
        id: u32,
        options: &GalleryOptions,
    ) -> Option<[SelectionEffect; 2]> {
        if !catalog.contains(id) {
            log::warn!("カタログにない項目の選択を無視: id={}", id);
            return None;
        }

        self.selected_id = id;
        self.transitioning = true;
        self.generation += 1;

        Some([
            SelectionEffect::Settle {
                after_ms: options.settle_delay_ms,
                generation: self.generation,
            },
            SelectionEffect::ScrollToPanel {
                after_ms: options.scroll_delay_ms,
                offset_px: options.panel_offset_px,
                duration_ms: options.scroll_duration_ms,
            },
        ])
    }

    /// 更新中フラグを解除する
    ///
    /// 後から選択し直された場合、古い世代の解除は無視する。
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.transitioning {
            return false;
        }
        self.transitioning = false;
        true
    }
}
