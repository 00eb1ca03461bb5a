//! Markup parse errors.

use glint_style::StyleError;
use thiserror::Error;

/// Errors produced while parsing markup.
///
/// Offsets are byte offsets into the markup string, pointing at the `[` of
/// the offending tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// A closing tag does not match the innermost open tag, or nothing is open.
    #[error("closing tag '[/{found}]' at byte {offset} {}", expectation(.expected))]
    MismatchedTag {
        found: String,
        expected: Option<String>,
        offset: usize,
    },

    /// A tag was still open at the end of input.
    #[error("tag '[{tag}]' opened at byte {offset} is never closed")]
    UnterminatedTag { tag: String, offset: usize },

    /// A tag body is neither a theme name nor a valid style spec.
    #[error("invalid style in tag '[{spec}]': {source}")]
    InvalidStyle {
        spec: String,
        #[source]
        source: StyleError,
    },

    /// Tags nest deeper than the parser allows.
    #[error("markup nests deeper than {limit} tags")]
    TooDeep { limit: usize },
}

fn expectation(expected: &Option<String>) -> String {
    match expected {
        Some(tag) => format!("does not match open tag '[{tag}]'"),
        None => "has no open tag to close".to_string(),
    }
}

/// Result type for markup operations.
pub type Result<T> = std::result::Result<T, MarkupError>;
