//! タイマーとフレームコールバックの抽象化
//!
//! ブラウザでは requestAnimationFrame / setTimeout / setInterval に、
//! テストでは `ManualScheduler` に差し替える。どちらもハンドルを drop すると
//! 予約が取り消される。

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

pub trait Scheduler: Clone + 'static {
    /// drop で予約を取り消すハンドル
    type Handle: 'static;

    /// 現在時刻 (ms)
    fn now(&self) -> f64;

    /// 次のフレームで一度だけ呼ぶ。引数はフレームのタイムスタンプ (ms)
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Self::Handle;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Self::Handle;
}

/// 手動スケジューラの1フレームの長さ
pub const FRAME_MS: f64 = 16.0;

enum TaskKind {
    Frame(Box<dyn FnOnce(f64)>),
    Timeout(Box<dyn FnOnce()>),
    Interval { period: f64, callback: Box<dyn FnMut()> },
}

struct Task {
    id: u64,
    due: f64,
    kind: TaskKind,
}

#[derive(Default)]
struct ManualState {
    now: f64,
    next_id: u64,
    tasks: Vec<Task>,
    /// 実行中のタスク
    running: Option<u64>,
    /// 実行中に取り消されたタスク
    cancelled: HashSet<u64>,
}

/// 時間を手で進めるスケジューラ
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

/// `ManualScheduler` の予約ハンドル
pub struct ManualHandle {
    id: u64,
    state: Weak<RefCell<ManualState>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        // クロージャの drop が別のハンドルを drop することがあるので、
        // 借用を外してから捨てる
        let removed = {
            let mut state = state.borrow_mut();
            match state.tasks.iter().position(|task| task.id == self.id) {
                Some(index) => Some(state.tasks.remove(index)),
                None => {
                    if state.running == Some(self.id) {
                        state.cancelled.insert(self.id);
                    }
                    None
                }
            }
        };
        drop(removed);
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未実行の予約数
    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    fn push(&self, delay_ms: f64, kind: TaskKind) -> ManualHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay_ms;
        state.tasks.push(Task { id, due, kind });
        ManualHandle {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    /// 期限の早い順（同時刻なら予約順）に1件取り出す
    fn take_due(&self, until: f64) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        let index = state
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(index, _)| index)?;
        let task = state.tasks.remove(index);
        state.now = state.now.max(task.due);
        state.running = Some(task.id);
        Some(task)
    }

    /// `ms` だけ時間を進め、期限の来た予約を順に実行する
    pub fn advance(&self, ms: f64) {
        let until = self.state.borrow().now + ms;

        while let Some(task) = self.take_due(until) {
            let Task { id, due, kind } = task;
            let now = self.now();
            let requeue = match kind {
                TaskKind::Frame(callback) => {
                    callback(now);
                    None
                }
                TaskKind::Timeout(callback) => {
                    callback();
                    None
                }
                TaskKind::Interval { period, mut callback } => {
                    callback();
                    Some((period, callback))
                }
            };

            let mut state = self.state.borrow_mut();
            state.running = None;
            let cancelled = state.cancelled.remove(&id);
            match requeue {
                Some((period, callback)) if !cancelled => {
                    let kind = TaskKind::Interval { period, callback };
                    state.tasks.push(Task { id, due: due + period.max(1.0), kind });
                }
                other => {
                    drop(state);
                    drop(other);
                }
            }
        }

        let mut state = self.state.borrow_mut();
        state.now = state.now.max(until);
    }

    /// `count` フレーム分進める
    pub fn run_frames(&self, count: usize) {
        for _ in 0..count {
            self.advance(FRAME_MS);
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn now(&self) -> f64 {
        self.state.borrow().now
    }

    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> ManualHandle {
        self.push(FRAME_MS, TaskKind::Frame(callback))
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualHandle {
        self.push(delay_ms as f64, TaskKind::Timeout(callback))
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> ManualHandle {
        let period = period_ms as f64;
        self.push(period, TaskKind::Interval { period, callback })
    }
}

/// 毎フレーム `step` を呼び続けるループ
///
/// `step` が false を返すか、`stop` されるか、ループ自体が drop されると止まる。
pub struct FrameLoop<S: Scheduler> {
    slot: Rc<RefCell<Option<S::Handle>>>,
}

impl<S: Scheduler> FrameLoop<S> {
    pub fn start<F>(scheduler: &S, step: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let slot = Rc::new(RefCell::new(None));
        schedule_frame(scheduler, Rc::downgrade(&slot), Rc::new(RefCell::new(step)));
        Self { slot }
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn stop(&self) {
        let handle = self.slot.borrow_mut().take();
        drop(handle);
    }
}

fn schedule_frame<S, F>(scheduler: &S, slot: Weak<RefCell<Option<S::Handle>>>, step: Rc<RefCell<F>>)
where
    S: Scheduler,
    F: FnMut(f64) -> bool + 'static,
{
    let Some(strong) = slot.upgrade() else {
        return;
    };

    let next_scheduler = scheduler.clone();
    let next_slot = slot.clone();
    let handle = scheduler.request_frame(Box::new(move |timestamp| {
        let keep_going = (&mut *step.borrow_mut())(timestamp);
        if keep_going {
            schedule_frame(&next_scheduler, next_slot, step);
        } else if let Some(slot) = next_slot.upgrade() {
            let finished = slot.borrow_mut().take();
            drop(finished);
        }
    }));

    let previous = strong.borrow_mut().replace(handle);
    drop(previous);
}
