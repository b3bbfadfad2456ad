//! スムーススクロール
//!
//! ビューポートの縦位置をイージング付きで動かす。新しい `scroll_to` は
//! 実行中のアニメーションを置き換える（後勝ち、キューなし）。

use crate::config::ScrollConfig;
use crate::timeline::Easing;

/// 1行スクロールあたりのピクセル数
pub const LINE_HEIGHT_PX: f64 = 100.0 / 6.0;

/// WheelEvent.deltaMode をピクセルに正規化
pub fn normalize_wheel_delta(delta: f64, delta_mode: u32, viewport_height: f64) -> f64 {
    match delta_mode {
        1 => delta * LINE_HEIGHT_PX,
        2 => delta * viewport_height,
        _ => delta,
    }
}

/// 同一ページ内アンカーの行き先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorIntent {
    /// `href="#"`
    Top,
    /// `href="#id"`
    Fragment(String),
}

/// `#` で始まる href だけを対象にする
pub fn parse_anchor(href: &str) -> Option<AnchorIntent> {
    let fragment = href.trim().strip_prefix('#')?;
    if fragment.is_empty() {
        Some(AnchorIntent::Top)
    } else {
        Some(AnchorIntent::Fragment(fragment.to_string()))
    }
}

/// スクロール指示（一度だけ消費される）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// ドキュメント上の絶対位置 (px)
    pub destination: f64,
    pub duration_ms: f64,
    /// destination に加算する補正 (px)。負の値で上にずらす
    pub offset_px: f64,
}

impl ScrollCommand {
    pub fn top(duration_ms: f64) -> Self {
        Self {
            destination: 0.0,
            duration_ms,
            offset_px: 0.0,
        }
    }
}

/// アンカーをスクロール指示に変換する
///
/// `element_top` は要素IDからドキュメント上の位置を引く関数。
/// 見つからなければ `None`（スクロールしない）。
pub fn resolve_anchor<F>(intent: &AnchorIntent, element_top: F, config: &ScrollConfig) -> Option<ScrollCommand>
where
    F: FnOnce(&str) -> Option<f64>,
{
    match intent {
        AnchorIntent::Top => Some(ScrollCommand::top(config.anchor_duration_ms)),
        AnchorIntent::Fragment(id) => element_top(id).map(|top| ScrollCommand {
            destination: top,
            duration_ms: config.anchor_duration_ms,
            offset_px: -config.nav_clearance_px,
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    started_at: f64,
    duration_ms: f64,
}

/// スクロール位置のコーディネータ（DOM非依存部分）
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScroller {
    config: ScrollConfig,
    position: f64,
    limit: f64,
    animation: Option<ScrollAnimation>,
}

impl SmoothScroller {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            position: 0.0,
            limit: 0.0,
            animation: None,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// アニメーション中ならその終点、そうでなければ現在位置
    pub fn target(&self) -> f64 {
        self.animation.map(|a| a.to).unwrap_or(self.position)
    }

    /// ネイティブのスクロール位置と最大値を取り込む
    ///
    /// アニメーション中は自分が書き込んだ位置を優先する。
    pub fn sync(&mut self, position: f64, limit: f64) {
        self.limit = limit.max(0.0);
        if self.animation.is_none() {
            self.position = position.clamp(0.0, self.limit);
        }
    }

    /// 指定位置へのスクロールを開始し、最終的な到達位置を返す
    pub fn scroll_to(&mut self, command: ScrollCommand, now: f64) -> f64 {
        let to = (command.destination + command.offset_px).clamp(0.0, self.limit);

        if command.duration_ms <= 0.0 {
            self.position = to;
            self.animation = None;
            return to;
        }

        self.animation = Some(ScrollAnimation {
            from: self.position,
            to,
            started_at: now,
            duration_ms: command.duration_ms,
        });
        to
    }

    /// ホイール入力ぶん目標を延長する
    pub fn wheel(&mut self, delta_px: f64, now: f64) -> f64 {
        let destination = self.target() + delta_px * self.config.wheel_multiplier;
        self.scroll_to(
            ScrollCommand {
                destination,
                duration_ms: self.config.duration_ms,
                offset_px: 0.0,
            },
            now,
        )
    }

    pub fn stop(&mut self) {
        self.animation = None;
    }

    /// 1フレーム進める。書き込むべき位置があれば返す
    pub fn frame(&mut self, now: f64) -> Option<f64> {
        let animation = self.animation?;
        let t = ((now - animation.started_at) / animation.duration_ms).clamp(0.0, 1.0);

        if t >= 1.0 {
            self.position = animation.to;
            self.animation = None;
        } else {
            let eased = Easing::ExpoOut.apply(t);
            self.position = animation.from + (animation.to - animation.from) * eased;
        }

        Some(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller() -> SmoothScroller {
        let mut scroller = SmoothScroller::new(ScrollConfig::default());
        scroller.sync(0.0, 5000.0);
        scroller
    }

    #[test]
    fn test_parse_anchor() {
        assert_eq!(parse_anchor("#"), Some(AnchorIntent::Top));
        assert_eq!(
            parse_anchor("#proyectos"),
            Some(AnchorIntent::Fragment("proyectos".into()))
        );
        assert_eq!(parse_anchor("https://example.com/#x"), None);
        assert_eq!(parse_anchor("/about"), None);
    }

    #[test]
    fn test_resolve_missing_fragment() {
        let intent = AnchorIntent::Fragment("no-existe".into());
        let command = resolve_anchor(&intent, |_| None, &ScrollConfig::default());
        assert_eq!(command, None);
    }

    #[test]
    fn test_resolve_fragment_with_clearance() {
        let intent = AnchorIntent::Fragment("contacto".into());
        let command = resolve_anchor(&intent, |id| (id == "contacto").then_some(2400.0), &ScrollConfig::default())
            .unwrap();
        assert_eq!(command.destination, 2400.0);
        assert_eq!(command.offset_px, -80.0);
        assert_eq!(command.duration_ms, 1500.0);
    }

    #[test]
    fn test_resolve_top() {
        let command = resolve_anchor(&AnchorIntent::Top, |_| unreachable!(), &ScrollConfig::default());
        assert_eq!(command, Some(ScrollCommand::top(1500.0)));
    }

    #[test]
    fn test_scroll_reaches_target() {
        let mut scroller = scroller();
        let to = scroller.scroll_to(
            ScrollCommand { destination: 1000.0, duration_ms: 1000.0, offset_px: -80.0 },
            0.0,
        );
        assert_eq!(to, 920.0);

        let mid = scroller.frame(100.0).unwrap();
        assert!(mid > 0.0 && mid < 920.0);
        // ease-out なので序盤で大きく進む
        assert!(mid > 920.0 * 0.1);

        assert_eq!(scroller.frame(1000.0), Some(920.0));
        assert!(!scroller.is_animating());
        assert_eq!(scroller.frame(1016.0), None);
    }

    #[test]
    fn test_last_call_wins() {
        let mut scroller = scroller();
        scroller.scroll_to(ScrollCommand { destination: 3000.0, duration_ms: 1000.0, offset_px: 0.0 }, 0.0);
        scroller.frame(200.0);
        let from = scroller.position();

        scroller.scroll_to(ScrollCommand { destination: 100.0, duration_ms: 500.0, offset_px: 0.0 }, 200.0);
        assert_eq!(scroller.target(), 100.0);
        assert_eq!(scroller.frame(200.0), Some(from));
        assert_eq!(scroller.frame(700.0), Some(100.0));
    }

    #[test]
    fn test_superseding_scroll_holds_position_on_first_frame() {
        let mut scroller = scroller();
        scroller.scroll_to(ScrollCommand { destination: 4000.0, duration_ms: 1200.0, offset_px: 0.0 }, 0.0);
        scroller.frame(350.0);
        let from = scroller.position();
        assert!(from > 0.0);

        // 逆方向への上書きでも最初のフレームで跳ばない
        scroller.scroll_to(ScrollCommand::top(800.0), 350.0);
        assert_eq!(scroller.frame(350.0), Some(from));
        let next = scroller.frame(366.0).unwrap();
        assert!(next < from && next > 0.0);
    }

    #[test]
    fn test_clamped_to_limit() {
        let mut scroller = scroller();
        assert_eq!(scroller.scroll_to(ScrollCommand::top(500.0), 0.0), 0.0);
        let to = scroller.scroll_to(
            ScrollCommand { destination: 9000.0, duration_ms: 500.0, offset_px: 0.0 },
            0.0,
        );
        assert_eq!(to, 5000.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut scroller = scroller();
        scroller.scroll_to(ScrollCommand { destination: 700.0, duration_ms: 0.0, offset_px: 0.0 }, 0.0);
        assert_eq!(scroller.position(), 700.0);
        assert!(!scroller.is_animating());
    }

    #[test]
    fn test_wheel_accumulates() {
        let mut scroller = scroller();
        scroller.wheel(100.0, 0.0);
        scroller.wheel(100.0, 10.0);
        assert_eq!(scroller.target(), 200.0);
    }

    #[test]
    fn test_sync_ignored_while_animating() {
        let mut scroller = scroller();
        scroller.scroll_to(ScrollCommand { destination: 1000.0, duration_ms: 1000.0, offset_px: 0.0 }, 0.0);
        scroller.sync(4000.0, 5000.0);
        assert_eq!(scroller.position(), 0.0);

        scroller.stop();
        scroller.sync(4000.0, 5000.0);
        assert_eq!(scroller.position(), 4000.0);
    }

    #[test]
    fn test_wheel_delta_modes() {
        assert_eq!(normalize_wheel_delta(3.0, 0, 800.0), 3.0);
        assert!((normalize_wheel_delta(3.0, 1, 800.0) - 50.0).abs() < 1e-9);
        assert_eq!(normalize_wheel_delta(1.0, 2, 800.0), 800.0);
    }
}
