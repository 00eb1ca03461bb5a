//! Live progress display.
//!
//! A [`Progress`] session owns an ordered set of [`Task`]s and draws one
//! line per task into a [`LiveRegion`]:
//!
//! ```text
//! Downloading ━━━━━━━━━━━━━━━━━━━━━━━━╺━━━━━━━━━━━━━━━  61% 0:00:04
//! Unpacking   ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━ 100% 0:00:00
//! ```
//!
//! Drawing is poll driven. Updating a task only changes its numbers; the
//! display is redrawn by [`Progress::tick`] once the refresh interval has
//! passed, and a final time when the session stops or is dropped.
//!
//! Time comes from a [`Clock`], so tests can drive a session with a
//! [`ManualClock`] instead of sleeping.

mod bar;
mod clock;
mod columns;
mod live;
mod session;
mod task;

pub use bar::ProgressBar;
pub use clock::{Clock, ManualClock, SystemClock};
pub use columns::{format_duration, ProgressColumn};
pub use live::LiveRegion;
pub use session::{Progress, DEFAULT_REFRESH_INTERVAL};
pub use task::{Task, TaskId, TaskState, TaskUpdate, SPEED_WINDOW};
