//! Error types for rendering and output.

use glint_markup::MarkupError;
use thiserror::Error;

use crate::progress::TaskId;

/// Errors produced while building renderables or writing output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Cell, label, or title markup failed to parse.
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// A table row does not have one cell per column.
    #[error("row has {found} cells but the table has {expected} columns")]
    ColumnMismatch { expected: usize, found: usize },

    /// A progress operation named a task the session does not own.
    #[error("no progress task with id {0}")]
    UnknownTask(TaskId),

    /// The output sink failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
