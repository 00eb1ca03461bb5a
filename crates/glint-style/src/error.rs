//! Error types for style and color parsing.

use thiserror::Error;

/// Errors produced while parsing colors, style specs, or themes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// A color token could not be parsed.
    #[error("invalid color spec '{0}'")]
    InvalidColorSpec(String),

    /// `not` was followed by something that isn't an attribute keyword.
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// A keyword that needs an argument (`on`, `not`) was left dangling, or
    /// an enum value (capability, justify, box style) was not recognized.
    #[error("invalid style spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    /// Theme source could not be loaded.
    #[error("failed to load theme: {0}")]
    Theme(String),
}

impl StyleError {
    pub fn spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for style operations.
pub type Result<T> = std::result::Result<T, StyleError>;
