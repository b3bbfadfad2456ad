//! サイト設定
//!
//! タイミング・閾値などの定数をまとめたもの。全項目にデフォルト値があり、
//! JSONでは変更したい項目だけを書けばよい。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub gallery: GalleryOptions,
    pub scene_gallery: GalleryOptions,
    pub reveal: RevealConfig,
    pub loader: LoaderConfig,
    pub scroll: ScrollConfig,
    pub navigation: NavigationConfig,
    pub particles: ParticleConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            gallery: GalleryOptions::default(),
            scene_gallery: GalleryOptions {
                panel_offset_px: 100,
                ..GalleryOptions::default()
            },
            reveal: RevealConfig::default(),
            loader: LoaderConfig::default(),
            scroll: ScrollConfig::default(),
            navigation: NavigationConfig::default(),
            particles: ParticleConfig::default(),
        }
    }
}

impl SiteConfig {
    /// JSON文字列から読み込み、値の範囲を検証する
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.reveal.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(Error::Config(format!(
                "reveal.threshold は (0, 1] の範囲で指定してください: {}",
                threshold
            )));
        }

        let smoothing = self.loader.smoothing;
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(Error::Config(format!(
                "loader.smoothing は (0, 1] の範囲で指定してください: {}",
                smoothing
            )));
        }

        if !(0.0..=100.0).contains(&self.loader.floor_percent) {
            return Err(Error::Config(format!(
                "loader.floorPercent は 0〜100 で指定してください: {}",
                self.loader.floor_percent
            )));
        }

        // current は 100 に漸近するだけなので 100 以上だと退場しない
        let completion = self.loader.completion_percent;
        if !(completion > 0.0 && completion < 100.0) {
            return Err(Error::Config(format!(
                "loader.completionPercent は (0, 100) の範囲で指定してください: {}",
                completion
            )));
        }

        if !(self.loader.min_display_ms >= 0.0) {
            return Err(Error::Config(format!(
                "loader.minDisplayMs は 0 以上: {}",
                self.loader.min_display_ms
            )));
        }

        if self.loader.poll_interval_ms == 0 {
            return Err(Error::Config("loader.pollIntervalMs は 1 以上".into()));
        }

        if self.particles.count == 0 {
            return Err(Error::Config("particles.count は 1 以上".into()));
        }

        Ok(())
    }
}

/// ギャラリー選択時のタイミング
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryOptions {
    /// 選択後に `updating` 表示を解除するまでの時間
    pub settle_delay_ms: u32,
    /// レイアウト確定を待ってからスクロールするまでの時間
    pub scroll_delay_ms: u32,
    /// 固定ナビゲーションバーを避けるための上方向オフセット
    pub panel_offset_px: i32,
    pub scroll_duration_ms: u32,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            settle_delay_ms: 600,
            scroll_delay_ms: 100,
            panel_offset_px: 80,
            scroll_duration_ms: 1200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevealConfig {
    /// 可視率の閾値（IntersectionObserver の threshold）
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    pub poll_interval_ms: u32,
    /// 初期表示用の最低進捗
    pub floor_percent: f64,
    /// 1フレームで差分の何割を詰めるか
    pub smoothing: f64,
    /// この値を超えたら完了扱い
    pub completion_percent: f64,
    /// マウントからの最低表示時間
    pub min_display_ms: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            floor_percent: 30.0,
            smoothing: 0.1,
            completion_percent: 99.5,
            min_display_ms: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrollConfig {
    /// ホイールスクロールのアニメーション時間
    pub duration_ms: f64,
    /// アンカーリンクのアニメーション時間
    pub anchor_duration_ms: f64,
    /// ナビゲーションバーの高さぶんのクリアランス
    pub nav_clearance_px: f64,
    pub wheel_multiplier: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            anchor_duration_ms: 1500.0,
            nav_clearance_px: 80.0,
            wheel_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    pub scrolled_threshold_px: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticleConfig {
    pub count: usize,
    /// 粒子を配置する箱のサイズ (x, y, z)
    pub spread: [f32; 3],
    pub interaction_radius: f32,
    pub push_strength: f32,
    pub point_size: f32,
    pub opacity: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 800,
            spread: [20.0, 20.0, 10.0],
            interaction_radius: 4.0,
            push_strength: 0.8,
            point_size: 0.05,
            opacity: 0.6,
        }
    }
}
