//! The progress session: tasks, cadence and the live region.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glint_style::{Capability, Theme};

use super::clock::{Clock, SystemClock};
use super::columns::{render_tasks, Frame, ProgressColumn};
use super::live::LiveRegion;
use super::task::{Task, TaskId, TaskUpdate};
use crate::error::{RenderError, Result};
use crate::segment::Line;

/// Default time between redraws.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// A set of tasks drawn as a live block of lines.
///
/// Mutations never draw; call [`tick`](Progress::tick) from the work loop
/// and the display is redrawn at most once per refresh interval. The final
/// state is drawn and the cursor restored by [`stop`](Progress::stop), or on
/// drop if `stop` was never called.
///
/// ```rust
/// use glint_render::progress::Progress;
/// use glint_style::Capability;
///
/// let mut progress = Progress::new(Vec::new()).capability(Capability::None);
/// progress.start()?;
/// let task = progress.add_task("Copying", Some(3.0));
/// for _ in 0..3 {
///     progress.advance(task, 1.0)?;
///     progress.tick()?;
/// }
/// progress.stop()?;
/// assert!(progress.finished());
/// # Ok::<(), glint_render::RenderError>(())
/// ```
pub struct Progress<W: Write> {
    region: LiveRegion<W>,
    capability: Capability,
    width: usize,
    theme: Theme,
    columns: Vec<ProgressColumn>,
    refresh_interval: Duration,
    clock: Arc<dyn Clock>,
    tasks: Vec<Task>,
    next_id: usize,
    started: Option<Instant>,
    last_refresh: Option<Instant>,
}

impl<W: Write> Progress<W> {
    pub fn new(writer: W) -> Self {
        Self {
            region: LiveRegion::new(writer, Capability::default()),
            capability: Capability::default(),
            width: 80,
            theme: Theme::default(),
            columns: ProgressColumn::defaults(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            clock: Arc::new(SystemClock),
            tasks: Vec::new(),
            next_id: 0,
            started: None,
            last_refresh: None,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Fixed for the session; set it before [`start`](Progress::start).
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capability = capability;
        self.region.set_capability(capability);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn columns(mut self, columns: Vec<ProgressColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Acquires the live region and draws the first frame.
    pub fn start(&mut self) -> Result<()> {
        if self.started.is_some() {
            return Ok(());
        }
        self.started = Some(self.clock.now());
        self.region.acquire()?;
        tracing::debug!(
            capability = %self.capability,
            width = self.width,
            tasks = self.tasks.len(),
            "progress session started"
        );
        self.refresh()
    }

    /// Adds a task at the end of the display. `None` total means the amount
    /// of work is unknown.
    pub fn add_task(&mut self, description: &str, total: Option<f64>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task::new(id, description, total, self.clock.now()));
        id
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(RenderError::UnknownTask(id))
    }

    /// Adds `amount` to the task's completed count.
    pub fn advance(&mut self, id: TaskId, amount: f64) -> Result<()> {
        let now = self.clock.now();
        self.task_mut(id)?.advance(amount, now);
        Ok(())
    }

    pub fn update(&mut self, id: TaskId, update: TaskUpdate) -> Result<()> {
        let now = self.clock.now();
        self.task_mut(id)?.apply(update, now);
        Ok(())
    }

    pub fn remove_task(&mut self, id: TaskId) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(RenderError::UnknownTask(id))?;
        Ok(self.tasks.remove(index))
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Whether every task has completed. Tasks without a total never
    /// complete, so a session holding one is never finished.
    pub fn finished(&self) -> bool {
        self.tasks.iter().all(Task::is_finished)
    }

    /// The current frame: one line per visible task.
    pub fn render_lines(&self) -> Vec<Line> {
        let now = self.clock.now();
        let animation_time = self
            .started
            .map_or(0.0, |start| now.saturating_duration_since(start).as_secs_f64());
        let frame = Frame {
            theme: &self.theme,
            now,
            colors: self.capability != Capability::None,
            animation_time,
        };
        let visible: Vec<&Task> = self.tasks.iter().filter(|task| task.visible()).collect();
        render_tasks(&self.columns, &visible, &frame, self.width)
    }

    /// Redraws if the refresh interval has passed since the last redraw.
    /// Returns whether a redraw happened.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.region.is_active() {
            return Ok(false);
        }
        let now = self.clock.now();
        let due = self
            .last_refresh
            .map_or(true, |last| now.saturating_duration_since(last) >= self.refresh_interval);
        if !due {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Redraws now, ignoring the cadence.
    pub fn refresh(&mut self) -> Result<()> {
        let frame = self.render_lines();
        self.last_refresh = Some(self.clock.now());
        let drawn = self.region.redraw(&frame)?;
        tracing::trace!(lines = frame.len(), drawn, "progress refresh");
        Ok(())
    }

    /// Draws the final frame and releases the live region. Safe to call
    /// more than once.
    pub fn stop(&mut self) -> Result<()> {
        if !self.region.is_active() {
            return Ok(());
        }
        let frame = self.render_lines();
        self.region.release(&frame)?;
        tracing::debug!(
            tasks = self.tasks.len(),
            finished = self.finished(),
            "progress session stopped"
        );
        Ok(())
    }

    pub fn writer(&self) -> &W {
        self.region.writer()
    }
}

impl<W: Write> Drop for Progress<W> {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::warn!(error = %err, "failed to release progress display");
        }
    }
}
