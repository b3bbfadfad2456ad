//! 表示時アニメーションのゲート
//!
//! Armed → Disarmed の一方向ステートマシン。初めて閾値以上見えたときだけ
//! `Play` を返し、以降は何をしても反応しない。

/// ゲートの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Armed,
    Disarmed,
}

/// ゲートへの入力
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateEvent {
    /// IntersectionObserver のエントリ1件
    Intersection { ratio: f64, is_intersecting: bool },
    /// セクションのアンマウント
    Teardown,
}

/// 呼び出し側が行うこと
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    None,
    /// タイムラインを再生し、監視をやめる
    Play,
    /// 再生せずに監視と再生中のタイムラインを破棄する
    Release,
}

/// ビューポートより高いセクションでも届く閾値
///
/// 見える割合の上限は `viewport / section` なので、ビューポートの
/// `threshold` 分を覆った時点を同じ割合に換算する。低いセクションはそのまま。
pub fn reachable_threshold(threshold: f64, section_height: f64, viewport_height: f64) -> f64 {
    if section_height <= 0.0 || viewport_height <= 0.0 {
        return threshold;
    }
    threshold * (viewport_height / section_height).min(1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntranceGate {
    state: GateState,
    threshold: f64,
}

impl EntranceGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            state: GateState::Armed,
            threshold,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == GateState::Armed
    }

    pub fn tick(&mut self, event: GateEvent) -> GateAction {
        match (self.state, event) {
            (GateState::Armed, GateEvent::Intersection { ratio, is_intersecting }) => {
                if is_intersecting && ratio >= self.threshold {
                    self.state = GateState::Disarmed;
                    GateAction::Play
                } else {
                    GateAction::None
                }
            }
            (_, GateEvent::Teardown) => {
                self.state = GateState::Disarmed;
                GateAction::Release
            }
            (GateState::Disarmed, GateEvent::Intersection { .. }) => GateAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seen(ratio: f64) -> GateEvent {
        GateEvent::Intersection { ratio, is_intersecting: ratio > 0.0 }
    }

    #[test]
    fn test_below_threshold_ignored() {
        let mut gate = EntranceGate::new(0.1);
        assert_eq!(gate.tick(seen(0.0)), GateAction::None);
        assert_eq!(gate.tick(seen(0.05)), GateAction::None);
        assert!(gate.is_armed());
    }

    #[test]
    fn test_fires_once() {
        let mut gate = EntranceGate::new(0.1);
        assert_eq!(gate.tick(seen(0.3)), GateAction::Play);
        assert_eq!(gate.state(), GateState::Disarmed);
        assert_eq!(gate.tick(seen(0.0)), GateAction::None);
        assert_eq!(gate.tick(seen(1.0)), GateAction::None);
    }

    #[test]
    fn test_threshold_boundary_counts() {
        let mut gate = EntranceGate::new(0.1);
        assert_eq!(gate.tick(seen(0.1)), GateAction::Play);
    }

    #[test]
    fn test_not_intersecting_with_ratio_ignored() {
        let mut gate = EntranceGate::new(0.1);
        let event = GateEvent::Intersection { ratio: 0.5, is_intersecting: false };
        assert_eq!(gate.tick(event), GateAction::None);
    }

    #[test]
    fn test_teardown_before_visible() {
        let mut gate = EntranceGate::new(0.1);
        assert_eq!(gate.tick(GateEvent::Teardown), GateAction::Release);
        assert_eq!(gate.tick(seen(1.0)), GateAction::None);
    }

    #[test]
    fn test_reachable_threshold_for_short_section() {
        assert_eq!(reachable_threshold(0.1, 400.0, 800.0), 0.1);
        assert_eq!(reachable_threshold(0.1, 800.0, 800.0), 0.1);
        assert_eq!(reachable_threshold(0.1, 0.0, 800.0), 0.1);
    }

    #[test]
    fn test_tall_section_still_fires() {
        // ビューポートの20倍の高さだと、画面を埋めても割合は 0.05 止まり
        let threshold = reachable_threshold(0.1, 16_000.0, 800.0);
        assert!((threshold - 0.005).abs() < 1e-12);

        let mut gate = EntranceGate::new(threshold);
        assert_eq!(gate.tick(seen(0.002)), GateAction::None);
        assert_eq!(gate.tick(seen(0.05)), GateAction::Play);
    }

    fn event_strategy() -> impl Strategy<Value = GateEvent> {
        prop_oneof![
            9 => (0.0f64..=1.0, any::<bool>())
                .prop_map(|(ratio, is_intersecting)| GateEvent::Intersection { ratio, is_intersecting }),
            1 => Just(GateEvent::Teardown),
        ]
    }

    proptest! {
        #[test]
        fn prop_plays_at_most_once(events in prop::collection::vec(event_strategy(), 0..64)) {
            let mut gate = EntranceGate::new(0.1);
            let plays = events
                .into_iter()
                .filter(|event| gate.tick(*event) == GateAction::Play)
                .count();
            prop_assert!(plays <= 1);
        }
    }
}
