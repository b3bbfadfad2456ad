//! 読み込み進捗の推定
//!
//! Loading → Finishing → Done の一方向ステートマシン。
//! ポーリング・DOM準備完了・全リソース読み込み完了・毎フレームの4種類の
//! イベントを `tick` で受け取り、退場が必要になったら一度だけ通知する。

use crate::config::LoaderConfig;

/// ドキュメント内のリソース状況
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub images: usize,
    /// デコード済み（naturalHeight > 0）の画像数
    pub images_decoded: usize,
    pub scripts: usize,
    pub stylesheets: usize,
}

impl ResourceSnapshot {
    pub fn total(&self) -> usize {
        self.images + self.scripts + self.stylesheets
    }

    /// スクリプトとスタイルシートは配置済みなら完了扱い
    pub fn ready(&self) -> usize {
        self.images_decoded.min(self.images) + self.scripts + self.stylesheets
    }

    /// 完了率 (%)。対象リソースがなければ `None`
    pub fn ready_percent(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.ready() as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Finishing,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadEvent {
    /// 定期ポーリング
    Poll(ResourceSnapshot),
    /// DOMContentLoaded
    DomReady(ResourceSnapshot),
    /// window の load
    AllLoaded,
    /// アニメーションフレーム
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoaderCommand {
    /// `delay_ms` 待ってから退場アニメーションを再生する
    ScheduleExit { delay_ms: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadEstimator {
    config: LoaderConfig,
    started_at: f64,
    current: f64,
    target: f64,
    source_complete: bool,
    phase: LoadPhase,
}

impl LoadEstimator {
    pub fn new(config: LoaderConfig, started_at: f64) -> Self {
        Self {
            config,
            started_at,
            current: 0.0,
            target: 0.0,
            source_complete: false,
            phase: LoadPhase::Loading,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_source_complete(&self) -> bool {
        self.source_complete
    }

    /// 表示用の整数パーセント
    pub fn display_percent(&self) -> u8 {
        if self.phase == LoadPhase::Done {
            return 100;
        }
        self.current.floor().clamp(0.0, 100.0) as u8
    }

    pub fn tick(&mut self, event: LoadEvent, now: f64) -> Option<LoaderCommand> {
        match event {
            LoadEvent::Poll(snapshot) | LoadEvent::DomReady(snapshot) => {
                self.observe(snapshot);
                None
            }
            LoadEvent::AllLoaded => {
                self.finish_source();
                None
            }
            LoadEvent::Frame => self.advance(now),
        }
    }

    fn observe(&mut self, snapshot: ResourceSnapshot) {
        if self.source_complete {
            return;
        }

        match snapshot.ready_percent() {
            None => {
                // 追跡対象がない場合は即100%
                self.target = 100.0;
                self.current = 100.0;
                self.finish_source();
            }
            Some(percent) => {
                let estimate = percent.max(self.config.floor_percent).min(100.0);
                self.target = self.target.max(estimate);
            }
        }
    }

    fn finish_source(&mut self) {
        if self.source_complete {
            return;
        }
        self.target = 100.0;
        self.source_complete = true;
        if self.phase == LoadPhase::Loading {
            self.phase = LoadPhase::Finishing;
            log::debug!("loader: Loading → Finishing");
        }
    }

    fn advance(&mut self, now: f64) -> Option<LoaderCommand> {
        if self.phase == LoadPhase::Done {
            return None;
        }

        let next = self.current + (self.target - self.current) * self.config.smoothing;
        self.current = next.max(self.current).min(100.0);

        if self.phase == LoadPhase::Finishing && self.current > self.config.completion_percent {
            self.phase = LoadPhase::Done;
            let elapsed = now - self.started_at;
            let delay_ms = (self.config.min_display_ms - elapsed).max(0.0);
            log::debug!("loader: Finishing → Done (exit in {:.0}ms)", delay_ms);
            return Some(LoaderCommand::ScheduleExit { delay_ms });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(images: usize, decoded: usize, scripts: usize, stylesheets: usize) -> ResourceSnapshot {
        ResourceSnapshot { images, images_decoded: decoded, scripts, stylesheets }
    }

    #[test]
    fn test_snapshot_percent() {
        assert_eq!(snapshot(0, 0, 0, 0).ready_percent(), None);
        assert_eq!(snapshot(2, 1, 1, 1).ready_percent(), Some(75.0));
        assert_eq!(snapshot(4, 0, 0, 0).ready_percent(), Some(0.0));
    }

    #[test]
    fn test_floor_applies() {
        let mut estimator = LoadEstimator::new(LoaderConfig::default(), 0.0);
        estimator.tick(LoadEvent::Poll(snapshot(10, 0, 1, 0)), 100.0);
        assert_eq!(estimator.target(), 30.0);
        assert_eq!(estimator.phase(), LoadPhase::Loading);
    }

    #[test]
    fn test_target_never_decreases() {
        let mut estimator = LoadEstimator::new(LoaderConfig::default(), 0.0);
        estimator.tick(LoadEvent::Poll(snapshot(4, 3, 0, 0)), 100.0);
        assert_eq!(estimator.target(), 75.0);

        // 画像が追加されて割合が下がっても目標値は維持
        estimator.tick(LoadEvent::DomReady(snapshot(8, 3, 0, 0)), 200.0);
        assert_eq!(estimator.target(), 75.0);
    }

    #[test]
    fn test_smoothing_step() {
        let mut estimator = LoadEstimator::new(LoaderConfig::default(), 0.0);
        estimator.tick(LoadEvent::Poll(snapshot(1, 1, 0, 0)), 0.0);
        estimator.tick(LoadEvent::Frame, 16.0);
        assert!((estimator.current() - 10.0).abs() < 1e-9);
        estimator.tick(LoadEvent::Frame, 32.0);
        assert!((estimator.current() - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_loaded_moves_to_finishing() {
        let mut estimator = LoadEstimator::new(LoaderConfig::default(), 0.0);
        estimator.tick(LoadEvent::Poll(snapshot(3, 1, 0, 0)), 0.0);
        estimator.tick(LoadEvent::AllLoaded, 50.0);
        assert_eq!(estimator.phase(), LoadPhase::Finishing);
        assert_eq!(estimator.target(), 100.0);
        assert!(estimator.is_source_complete());

        // 完了後のポーリングは無視
        estimator.tick(LoadEvent::Poll(snapshot(3, 0, 0, 0)), 60.0);
        assert_eq!(estimator.target(), 100.0);
    }

    #[test]
    fn test_exit_waits_for_min_display() {
        let mut estimator = LoadEstimator::new(LoaderConfig::default(), 1000.0);
        estimator.tick(LoadEvent::Poll(snapshot(0, 0, 0, 0)), 1000.0);

        let command = estimator.tick(LoadEvent::Frame, 1016.0);
        assert_eq!(command, Some(LoaderCommand::ScheduleExit { delay_ms: 984.0 }));
        assert_eq!(estimator.phase(), LoadPhase::Done);
        assert_eq!(estimator.display_percent(), 100);

        // 通知は一度だけ
        assert_eq!(estimator.tick(LoadEvent::Frame, 1032.0), None);
    }

    #[test]
    fn test_no_delay_when_slow() {
        let mut estimator = LoadEstimator::new(LoaderConfig::default(), 0.0);
        estimator.tick(LoadEvent::AllLoaded, 2000.0);

        let mut now = 2000.0;
        let mut command = None;
        while command.is_none() {
            now += 16.0;
            command = estimator.tick(LoadEvent::Frame, now);
            assert!(now < 10_000.0, "完了しない");
        }
        match command {
            Some(LoaderCommand::ScheduleExit { delay_ms }) => {
                assert!(now > 2000.0);
                assert_eq!(delay_ms, 0.0);
            }
            None => unreachable!(),
        }
    }

    #[test]
    fn test_stalls_without_load_signal() {
        let mut estimator = LoadEstimator::new(LoaderConfig::default(), 0.0);
        estimator.tick(LoadEvent::Poll(snapshot(2, 1, 0, 0)), 0.0);
        for i in 0..500 {
            assert_eq!(estimator.tick(LoadEvent::Frame, i as f64 * 16.0), None);
        }
        assert!(estimator.current() <= 50.0 + 1e-9);
        assert_eq!(estimator.phase(), LoadPhase::Loading);
    }
}
