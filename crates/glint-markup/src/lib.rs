//! Inline markup for terminal styling.
//!
//! Markup interleaves text with tags: `[style spec]` opens a style and
//! `[/]` or `[/style spec]` closes it. The result is a flat list of
//! [`Span`]s, each a run of text with one fully resolved
//! [`Style`](glint_style::Style).
//!
//! # Example
//!
//! ```rust
//! use glint_markup::{parse, Span};
//! use glint_style::Style;
//!
//! let spans = parse("[bold]Hello[/bold] [italic red]world[/]").unwrap();
//! assert_eq!(spans[0], Span::new("Hello", Style::new().bold()));
//! assert_eq!(spans[1], Span::plain(" "));
//! ```
//!
//! # Tag Syntax
//!
//! - A tag body must start with a lowercase letter, `#`, `@` or `/`; any
//!   other `[` is literal, so `array[0]` needs no escaping
//! - `\[` is always a literal `[`
//! - Opening tags hold a style spec (`bold red on white`, `#ff8800`,
//!   `rgb(1,2,3)`, `link=https://...`) or a theme style name
//! - `[/]` closes the innermost tag; `[/spec]` must name it exactly
//!
//! Unbalanced tags are errors rather than being silently repaired; see
//! [`MarkupError`].
//!
//! # Emoji
//!
//! `:name:` shortcodes in text are replaced through an [`EmojiSource`].
//! Unknown codes are left alone.

mod emoji;
mod error;
mod parser;
mod tokenizer;

pub use emoji::{replace_emoji, BuiltinEmoji, EmojiSource};
pub use error::{MarkupError, Result};
pub use parser::{MarkupParser, Span, DEFAULT_MAX_DEPTH};

use once_cell::sync::Lazy;

static DEFAULT_PARSER: Lazy<MarkupParser> = Lazy::new(MarkupParser::new);

/// Parses markup with the default theme and emoji table.
pub fn parse(markup: &str) -> Result<Vec<Span>> {
    DEFAULT_PARSER.parse(markup)
}

/// Parses markup with the default parser, falling back to the raw text.
pub fn parse_lenient(markup: &str) -> Vec<Span> {
    DEFAULT_PARSER.parse_lenient(markup)
}

/// Escapes text so it renders literally when used as markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '[' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Returns the text of `markup` with all tags removed.
pub fn render_plain(markup: &str) -> Result<String> {
    Ok(parse(markup)?.into_iter().map(|span| span.text).collect())
}

/// Concatenates the text of a span list.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_brackets() {
        assert_eq!(escape("[bold]"), "\\[bold]");
        assert_eq!(escape("no tags"), "no tags");
    }

    #[test]
    fn render_plain_strips_tags() {
        assert_eq!(render_plain("[b]a[/b] [i red]b[/]").unwrap(), "a b");
        assert!(render_plain("[b]a").is_err());
    }

    #[test]
    fn plain_text_joins() {
        let spans = parse("[b]x[/b]y").unwrap();
        assert_eq!(plain_text(&spans), "xy");
    }
}
