//! アニメーションタイムライン
//!
//! 要素ごとの見た目（Pose）を時刻からサンプリングする宣言的なタイムライン。
//! 再生（DOMへの反映）はWeb側が行い、ここでは時刻→Poseの計算だけを持つ。

/// イージング関数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power1Out,
    Power2Out,
    Power2In,
    Power2InOut,
    Power3Out,
    /// 1.001 - 2^(-10t) を 1 で頭打ち。t = 0 は 0 に固定
    ExpoOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2In => t.powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t.powi(3)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
            Easing::ExpoOut if t <= 0.0 => 0.0,
            Easing::ExpoOut => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

/// 要素の見た目。`Pose::NATURAL` がCSSどおりの状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// 横方向の移動量 (px)
    pub x: f64,
    /// 縦方向の移動量 (px)
    pub y: f64,
    pub opacity: f64,
    pub scale_x: f64,
    /// 本来の幅に対する割合
    pub width: f64,
}

impl Pose {
    pub const NATURAL: Pose = Pose {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        scale_x: 1.0,
        width: 1.0,
    };

    /// 指定位置から透明状態で入ってくる開始Pose
    pub fn offset(x: f64, y: f64) -> Pose {
        Pose {
            x,
            y,
            opacity: 0.0,
            ..Pose::NATURAL
        }
    }

    pub fn transparent() -> Pose {
        Pose {
            opacity: 0.0,
            ..Pose::NATURAL
        }
    }

    pub fn collapsed_width() -> Pose {
        Pose {
            width: 0.0,
            ..Pose::NATURAL
        }
    }

    pub fn collapsed_scale() -> Pose {
        Pose {
            scale_x: 0.0,
            ..Pose::NATURAL
        }
    }

    pub fn lerp(from: Pose, to: Pose, t: f64) -> Pose {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Pose {
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            opacity: mix(from.opacity, to.opacity),
            scale_x: mix(from.scale_x, to.scale_x),
            width: mix(from.width, to.width),
        }
    }

    /// CSS transform 値
    pub fn transform(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scaleX({:.4})",
            self.x, self.y, self.scale_x
        )
    }
}

/// アニメーション対象の役割。Web側で `data-reveal` 属性と対応づける
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Title,
    Body,
    Item(usize),
    Bar(usize),
    Cta,
    Indicator,
    Nav,
    Percentage,
    Track,
    Overlay,
    Menu,
}

impl Slot {
    /// `data-reveal` 属性の値
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Title => "title",
            Slot::Body => "body",
            Slot::Item(_) => "item",
            Slot::Bar(_) => "bar",
            Slot::Cta => "cta",
            Slot::Indicator => "indicator",
            Slot::Nav => "nav",
            Slot::Percentage => "percentage",
            Slot::Track => "track",
            Slot::Overlay => "overlay",
            Slot::Menu => "menu",
        }
    }

    /// 同じキーを持つ要素のうち何番目か
    pub fn index(&self) -> usize {
        match self {
            Slot::Item(i) | Slot::Bar(i) => *i,
            _ => 0,
        }
    }
}

/// タイムライン上の配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// 直前のトゥイーンの終了時
    Sequence,
    /// 直前のトゥイーンの終了より `ms` 早く
    Overlap(f64),
    /// タイムライン先頭からの絶対時刻
    At(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub slot: Slot,
    pub from: Pose,
    pub to: Pose,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    /// 開始前から `from` を適用するか（from系トゥイーン）
    pub immediate: bool,
}

impl Tween {
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }

    fn progress(&self, t: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((t - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// 複数トゥイーンのまとまり
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
    cursor_ms: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, position: Position) -> f64 {
        match position {
            Position::Sequence => self.cursor_ms,
            Position::Overlap(ms) => (self.cursor_ms - ms).max(0.0),
            Position::At(ms) => ms,
        }
    }

    fn push(&mut self, tween: Tween) {
        self.cursor_ms = tween.end_ms();
        self.tweens.push(tween);
    }

    /// `pose` から本来の状態へ向かうトゥイーン
    pub fn from(
        mut self,
        slot: Slot,
        pose: Pose,
        duration_ms: f64,
        easing: Easing,
        position: Position,
    ) -> Self {
        let start_ms = self.resolve(position);
        self.push(Tween {
            slot,
            from: pose,
            to: Pose::NATURAL,
            start_ms,
            duration_ms,
            easing,
            immediate: true,
        });
        self
    }

    /// 本来の状態から `pose` へ向かうトゥイーン
    pub fn to(
        mut self,
        slot: Slot,
        pose: Pose,
        duration_ms: f64,
        easing: Easing,
        position: Position,
    ) -> Self {
        let start_ms = self.resolve(position);
        self.push(Tween {
            slot,
            from: Pose::NATURAL,
            to: pose,
            start_ms,
            duration_ms,
            easing,
            immediate: false,
        });
        self
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn duration_ms(&self) -> f64 {
        self.tweens.iter().map(Tween::end_ms).fold(0.0, f64::max)
    }

    pub fn is_finished(&self, t: f64) -> bool {
        t >= self.duration_ms()
    }

    /// 登場するスロット（重複なし、登録順）
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        for tween in &self.tweens {
            if !slots.contains(&tween.slot) {
                slots.push(tween.slot);
            }
        }
        slots
    }

    /// 時刻 `t` における各スロットのPose
    pub fn sample(&self, t: f64) -> Vec<(Slot, Pose)> {
        self.slots()
            .into_iter()
            .map(|slot| (slot, self.sample_slot(slot, t)))
            .collect()
    }

    pub fn sample_slot(&self, slot: Slot, t: f64) -> Pose {
        let mut pose = Pose::NATURAL;
        let mut started = false;

        for tween in self.tweens.iter().filter(|tw| tw.slot == slot) {
            if t < tween.start_ms {
                // 未開始の from 系は、先行トゥイーンがなければ開始Poseで待機
                if tween.immediate && !started {
                    pose = tween.from;
                }
                continue;
            }
            started = true;
            pose = Pose::lerp(tween.from, tween.to, tween.easing.apply(tween.progress(t)));
        }

        pose
    }
}

/// Hero のイントロ
pub fn hero_intro() -> Timeline {
    Timeline::new()
        .from(Slot::Title, Pose::offset(0.0, 100.0), 1200.0, Easing::Power3Out, Position::At(300.0))
        .from(Slot::Body, Pose::offset(0.0, 50.0), 1000.0, Easing::Power3Out, Position::Overlap(600.0))
        .from(Slot::Cta, Pose::offset(0.0, 30.0), 800.0, Easing::Power3Out, Position::Overlap(400.0))
        .from(Slot::Indicator, Pose::offset(0.0, 20.0), 800.0, Easing::Power3Out, Position::Overlap(300.0))
}

/// ナビゲーションバーの登場
pub fn nav_intro() -> Timeline {
    Timeline::new().from(
        Slot::Nav,
        Pose::offset(0.0, -100.0),
        1000.0,
        Easing::Power3Out,
        Position::At(500.0),
    )
}

/// About セクション: タイトル・本文・スキル行・スキルバー
pub fn about_reveal(skill_count: usize) -> Timeline {
    let mut timeline = Timeline::new()
        .from(Slot::Title, Pose::offset(-100.0, 0.0), 1000.0, Easing::Power1Out, Position::At(0.0))
        .from(Slot::Body, Pose::offset(100.0, 0.0), 1000.0, Easing::Power1Out, Position::At(0.0));

    for i in 0..skill_count {
        let delay = i as f64 * 100.0;
        timeline = timeline
            .from(Slot::Item(i), Pose::offset(0.0, 50.0), 600.0, Easing::Power1Out, Position::At(delay))
            .from(Slot::Bar(i), Pose::collapsed_width(), 1500.0, Easing::Power2Out, Position::At(delay));
    }

    timeline
}

/// プロジェクト一覧: タイトルとカード
pub fn projects_reveal(card_count: usize) -> Timeline {
    let mut timeline = Timeline::new().from(
        Slot::Title,
        Pose::offset(0.0, 50.0),
        1000.0,
        Easing::Power1Out,
        Position::At(0.0),
    );

    for i in 0..card_count {
        timeline = timeline.from(
            Slot::Item(i),
            Pose::offset(0.0, 100.0),
            800.0,
            Easing::Power1Out,
            Position::At(i as f64 * 100.0),
        );
    }

    timeline
}

/// ローディング画面の退場
pub fn loader_exit() -> Timeline {
    Timeline::new()
        .to(Slot::Percentage, Pose::transparent(), 300.0, Easing::Power2In, Position::At(0.0))
        .to(Slot::Track, Pose::collapsed_scale(), 500.0, Easing::Power2InOut, Position::Overlap(100.0))
        .to(Slot::Overlay, Pose::transparent(), 500.0, Easing::Power2InOut, Position::Overlap(200.0))
}

/// モバイルメニューの開閉
pub fn menu_enter() -> Timeline {
    Timeline::new().from(Slot::Menu, Pose::offset(0.0, -12.0), 250.0, Easing::Power2Out, Position::At(0.0))
}

pub fn menu_exit() -> Timeline {
    Timeline::new().to(Slot::Menu, Pose::offset(0.0, -12.0), 200.0, Easing::Power2In, Position::At(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Power1Out,
            Easing::Power2Out,
            Easing::Power2In,
            Easing::Power2InOut,
            Easing::Power3Out,
            Easing::ExpoOut,
        ] {
            assert!(approx(easing.apply(0.0), 0.0), "{:?}", easing);
            assert!(approx(easing.apply(1.0), 1.0), "{:?}", easing);
        }
    }

    #[test]
    fn test_expo_out_starts_exactly_at_zero() {
        assert_eq!(Easing::ExpoOut.apply(0.0), 0.0);
        assert_eq!(Easing::ExpoOut.apply(-0.5), 0.0);
        // 直後からは急に立ち上がる
        assert!(Easing::ExpoOut.apply(0.01) > 0.06);
    }

    #[test]
    fn test_easing_clamped() {
        assert!(approx(Easing::Power2Out.apply(-1.0), 0.0));
        assert!(approx(Easing::Power2Out.apply(2.0), 1.0));
    }

    #[test]
    fn test_out_easing_leads_linear() {
        assert!(Easing::Power3Out.apply(0.5) > 0.5);
        assert!(Easing::Power2In.apply(0.5) < 0.5);
        assert!(approx(Easing::Power2InOut.apply(0.5), 0.5));
    }

    #[test]
    fn test_from_tween_waits_at_start_pose() {
        let timeline = Timeline::new().from(
            Slot::Title,
            Pose::offset(-100.0, 0.0),
            1000.0,
            Easing::Linear,
            Position::At(500.0),
        );

        let before = timeline.sample_slot(Slot::Title, 0.0);
        assert!(approx(before.x, -100.0));
        assert!(approx(before.opacity, 0.0));

        let mid = timeline.sample_slot(Slot::Title, 1000.0);
        assert!(approx(mid.x, -50.0));

        let after = timeline.sample_slot(Slot::Title, 2000.0);
        assert_eq!(after, Pose::NATURAL);
    }

    #[test]
    fn test_to_tween_holds_natural_until_start() {
        let timeline = loader_exit();
        let pose = timeline.sample_slot(Slot::Overlay, 0.0);
        assert_eq!(pose, Pose::NATURAL);

        let end = timeline.sample_slot(Slot::Overlay, timeline.duration_ms());
        assert!(approx(end.opacity, 0.0));
    }

    #[test]
    fn test_overlap_positions() {
        let timeline = hero_intro();
        let starts: Vec<f64> = timeline.tweens().iter().map(|t| t.start_ms).collect();
        // 300+1200=1500 → 900 → 900+1000-400=1500 → 1500+800-300=2000
        assert_eq!(starts, vec![300.0, 900.0, 1500.0, 2000.0]);
        assert!(approx(timeline.duration_ms(), 2800.0));
    }

    #[test]
    fn test_loader_exit_schedule() {
        let timeline = loader_exit();
        let starts: Vec<f64> = timeline.tweens().iter().map(|t| t.start_ms).collect();
        assert_eq!(starts, vec![0.0, 200.0, 500.0]);
        assert!(approx(timeline.duration_ms(), 1000.0));
    }

    #[test]
    fn test_about_stagger() {
        let timeline = about_reveal(3);
        let bar2 = timeline
            .tweens()
            .iter()
            .find(|t| t.slot == Slot::Bar(2))
            .unwrap();
        assert!(approx(bar2.start_ms, 200.0));
        assert_eq!(bar2.easing, Easing::Power2Out);
        assert!(approx(bar2.from.width, 0.0));

        assert!(approx(timeline.sample_slot(Slot::Bar(2), 100.0).width, 0.0));
        assert!(timeline.sample_slot(Slot::Bar(0), 100.0).width > 0.0);

        // 2 + 3 行 + 3 バー
        assert_eq!(timeline.slots().len(), 8);
    }

    #[test]
    fn test_projects_reveal_finishes() {
        let timeline = projects_reveal(6);
        assert!(approx(timeline.duration_ms(), 1300.0));
        assert!(timeline.is_finished(1300.0));
        for (_, pose) in timeline.sample(1300.0) {
            assert_eq!(pose, Pose::NATURAL);
        }
    }

    #[test]
    fn test_slot_keys() {
        assert_eq!(Slot::Item(4).key(), "item");
        assert_eq!(Slot::Item(4).index(), 4);
        assert_eq!(Slot::Overlay.index(), 0);
    }

    #[test]
    fn test_transform_string() {
        let pose = Pose::offset(-100.0, 0.0);
        assert_eq!(pose.transform(), "translate(-100.00px, 0.00px) scaleX(1.0000)");
    }
}
