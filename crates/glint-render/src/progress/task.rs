//! Progress tasks and their bookkeeping.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// How far back speed samples are kept.
pub const SPEED_WINDOW: Duration = Duration::from_secs(30);

const MAX_SAMPLES: usize = 1000;

/// Identifies a task within its session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a task is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Nothing completed yet.
    Pending,
    /// Some progress, not finished.
    Active,
    /// `completed >= total`. Tasks without a total never get here.
    Completed,
}

#[derive(Clone, Copy, Debug)]
struct Sample {
    at: Instant,
    completed: f64,
}

/// One unit of tracked work.
#[derive(Clone, Debug)]
pub struct Task {
    id: TaskId,
    description: String,
    total: Option<f64>,
    completed: f64,
    visible: bool,
    start_time: Instant,
    finished_time: Option<Duration>,
    finished_speed: Option<f64>,
    samples: VecDeque<Sample>,
}

/// Changes applied by [`Progress::update`](super::Progress::update).
///
/// ```rust
/// use glint_render::progress::TaskUpdate;
///
/// let update = TaskUpdate::new().completed(10.0).description("[bold]Copying");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskUpdate {
    pub completed: Option<f64>,
    pub total: Option<Option<f64>>,
    pub advance: Option<f64>,
    pub description: Option<String>,
    pub visible: Option<bool>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(mut self, completed: f64) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Sets the total; `None` makes the task indeterminate.
    pub fn total(mut self, total: Option<f64>) -> Self {
        self.total = Some(total);
        self
    }

    pub fn advance(mut self, amount: f64) -> Self {
        self.advance = Some(amount);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
}

impl Task {
    pub(crate) fn new(id: TaskId, description: &str, total: Option<f64>, now: Instant) -> Self {
        Self {
            id,
            description: description.to_string(),
            total,
            completed: 0.0,
            visible: true,
            start_time: now,
            finished_time: None,
            finished_speed: None,
            samples: VecDeque::new(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Markup description.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn total(&self) -> Option<f64> {
        self.total
    }

    pub fn completed(&self) -> f64 {
        self.completed
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> TaskState {
        match self.total {
            Some(total) if self.completed >= total => TaskState::Completed,
            _ if self.completed <= 0.0 => TaskState::Pending,
            _ => TaskState::Active,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state() == TaskState::Completed
    }

    /// Work left, if the total is known.
    pub fn remaining(&self) -> Option<f64> {
        self.total.map(|total| (total - self.completed).max(0.0))
    }

    /// Percent complete in `0..=100`. Zero for tasks without a total.
    pub fn percentage(&self) -> f64 {
        match self.total {
            Some(total) if total > 0.0 => (self.completed / total * 100.0).clamp(0.0, 100.0),
            Some(_) => 100.0,
            None => 0.0,
        }
    }

    /// Time since the task was added, frozen once it finishes.
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.finished_time
            .unwrap_or_else(|| now.saturating_duration_since(self.start_time))
    }

    /// Units per second over the sample window.
    pub fn speed(&self) -> Option<f64> {
        let first = self.samples.front()?;
        let last = self.samples.back()?;
        let span = last.at.saturating_duration_since(first.at).as_secs_f64();
        if self.samples.len() < 2 || span <= 0.0 {
            return None;
        }
        let completed: f64 = self.samples.iter().skip(1).map(|s| s.completed).sum();
        Some(completed / span)
    }

    /// Estimated time to completion, rounded up to whole seconds.
    pub fn time_remaining(&self) -> Option<Duration> {
        if self.is_finished() {
            return Some(Duration::ZERO);
        }
        let speed = self.speed().or(self.finished_speed)?;
        let remaining = self.remaining()?;
        if speed <= 0.0 {
            return None;
        }
        Some(Duration::from_secs((remaining / speed).ceil() as u64))
    }

    pub(crate) fn advance(&mut self, amount: f64, now: Instant) {
        let before = self.completed;
        self.completed = (self.completed + amount).max(0.0);
        self.record(self.completed - before, now);
        self.check_finished(now);
    }

    pub(crate) fn apply(&mut self, update: TaskUpdate, now: Instant) {
        let before = self.completed;
        if let Some(total) = update.total {
            self.total = total;
            self.samples.clear();
            self.finished_time = None;
            self.finished_speed = None;
        }
        if let Some(amount) = update.advance {
            self.completed = (self.completed + amount).max(0.0);
        }
        if let Some(completed) = update.completed {
            self.completed = completed.max(0.0);
        }
        if let Some(total) = self.total {
            self.completed = self.completed.min(total);
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(visible) = update.visible {
            self.visible = visible;
        }
        self.record(self.completed - before, now);
        self.check_finished(now);
    }

    fn record(&mut self, delta: f64, now: Instant) {
        if delta <= 0.0 {
            return;
        }
        self.samples.push_back(Sample {
            at: now,
            completed: delta,
        });
        if self.samples.len() > MAX_SAMPLES {
            self.samples.pop_front();
        }
        while let Some(front) = self.samples.front() {
            if now.saturating_duration_since(front.at) > SPEED_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
        self.finished_speed = self.speed().or(self.finished_speed);
    }

    fn check_finished(&mut self, now: Instant) {
        if self.finished_time.is_none() && self.is_finished() {
            self.finished_time = Some(now.saturating_duration_since(self.start_time));
        } else if !self.is_finished() {
            self.finished_time = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(total: Option<f64>) -> (Task, Instant) {
        let now = Instant::now();
        (Task::new(TaskId(0), "work", total, now), now)
    }

    mod states {
        use super::*;

        #[test]
        fn lifecycle() {
            let (mut task, now) = task(Some(10.0));
            assert_eq!(task.state(), TaskState::Pending);
            task.advance(3.0, now);
            assert_eq!(task.state(), TaskState::Active);
            task.advance(7.0, now);
            assert_eq!(task.state(), TaskState::Completed);
        }

        #[test]
        fn indeterminate_never_completes() {
            let (mut task, now) = task(None);
            task.advance(1_000_000.0, now);
            assert_eq!(task.state(), TaskState::Active);
            assert_eq!(task.percentage(), 0.0);
        }

        #[test]
        fn update_clamps_to_total() {
            let (mut task, now) = task(Some(10.0));
            task.apply(TaskUpdate::new().completed(25.0), now);
            assert_eq!(task.completed(), 10.0);
            assert!(task.is_finished());
        }

        #[test]
        fn raising_total_reopens() {
            let (mut task, now) = task(Some(10.0));
            task.advance(10.0, now);
            assert!(task.is_finished());
            task.apply(TaskUpdate::new().total(Some(20.0)), now);
            assert_eq!(task.state(), TaskState::Active);
            assert_eq!(task.percentage(), 50.0);
        }

        #[test]
        fn negative_advance_floors_at_zero() {
            let (mut task, now) = task(Some(10.0));
            task.advance(-5.0, now);
            assert_eq!(task.completed(), 0.0);
        }
    }

    mod timing {
        use super::*;

        #[test]
        fn speed_and_remaining() {
            let (mut task, start) = task(Some(100.0));
            task.advance(10.0, start);
            task.advance(10.0, start + Duration::from_secs(1));
            task.advance(10.0, start + Duration::from_secs(2));
            assert_eq!(task.speed(), Some(10.0));
            assert_eq!(task.time_remaining(), Some(Duration::from_secs(7)));
        }

        #[test]
        fn no_speed_from_one_sample() {
            let (mut task, now) = task(Some(100.0));
            task.advance(10.0, now);
            assert_eq!(task.speed(), None);
            assert_eq!(task.time_remaining(), None);
        }

        #[test]
        fn old_samples_drop_out() {
            let (mut task, start) = task(Some(1000.0));
            task.advance(100.0, start);
            task.advance(1.0, start + Duration::from_secs(40));
            task.advance(1.0, start + Duration::from_secs(41));
            assert_eq!(task.speed(), Some(1.0));
        }

        #[test]
        fn elapsed_freezes_when_finished() {
            let (mut task, start) = task(Some(1.0));
            task.advance(1.0, start + Duration::from_secs(5));
            assert_eq!(task.elapsed(start + Duration::from_secs(60)), Duration::from_secs(5));
            assert_eq!(task.time_remaining(), Some(Duration::ZERO));
        }
    }
}
