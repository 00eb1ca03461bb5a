//! The markup parser.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use glint_style::{Style, Theme};

use crate::emoji::{replace_emoji, BuiltinEmoji, EmojiSource};
use crate::error::{MarkupError, Result};
use crate::tokenizer::{Token, Tokenizer};

/// Default limit on tag nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A run of text with one resolved style.
///
/// Spans may contain newlines; line splitting happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// A span with the identity style.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }
}

/// Parses `[style]text[/style]` markup into [`Span`]s.
///
/// Tag bodies are looked up in the parser's [`Theme`] first and parsed as a
/// style spec otherwise. Each opening tag pushes the merge of the enclosing
/// style and its own, so inner tags win over outer ones.
#[derive(Clone)]
pub struct MarkupParser {
    theme: Theme,
    emoji: Option<Arc<dyn EmojiSource>>,
    max_depth: usize,
}

impl fmt::Debug for MarkupParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupParser")
            .field("theme_styles", &self.theme.len())
            .field("emoji", &self.emoji.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser {
    /// Creates a parser with the default theme and built-in emoji table.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            emoji: Some(Arc::new(BuiltinEmoji)),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the theme used to resolve named tags.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enables or disables `:name:` replacement.
    pub fn emoji(mut self, enabled: bool) -> Self {
        self.emoji = if enabled {
            Some(self.emoji.unwrap_or_else(|| Arc::new(BuiltinEmoji)))
        } else {
            None
        };
        self
    }

    /// Uses a custom shortcode table.
    pub fn emoji_source(mut self, source: impl EmojiSource + 'static) -> Self {
        self.emoji = Some(Arc::new(source));
        self
    }

    /// Sets the tag nesting limit.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Parses markup into spans.
    ///
    /// Text outside any tag gets the identity style. Adjacent spans that
    /// end up with equal styles are merged into one.
    pub fn parse(&self, markup: &str) -> Result<Vec<Span>> {
        let mut spans: Vec<Span> = Vec::new();
        let mut stack: Vec<Frame<'_>> = Vec::new();
        let identity = Style::default();

        for (offset, token) in Tokenizer::new(markup) {
            match token {
                Token::Text(text) => {
                    let style = stack.last().map_or(&identity, |f| &f.style);
                    let text = match &self.emoji {
                        Some(source) => Cow::Owned(replace_emoji(text, source.as_ref())),
                        None => Cow::Borrowed(text),
                    };
                    push_span(&mut spans, &text, style);
                }
                Token::Open(spec) => {
                    if stack.len() >= self.max_depth {
                        return Err(MarkupError::TooDeep {
                            limit: self.max_depth,
                        });
                    }
                    let own = self
                        .theme
                        .resolve(spec)
                        .map_err(|source| MarkupError::InvalidStyle {
                            spec: spec.to_string(),
                            source,
                        })?;
                    let style = match stack.last() {
                        Some(top) => top.style.merge(&own),
                        None => own,
                    };
                    stack.push(Frame {
                        spec,
                        style,
                        offset,
                    });
                }
                Token::Close(target) => {
                    let top = stack.last().map(|f| f.spec);
                    match (target, top) {
                        (None, Some(_)) => {
                            stack.pop();
                        }
                        (Some(name), Some(open)) if name == open.trim() => {
                            stack.pop();
                        }
                        _ => {
                            return Err(MarkupError::MismatchedTag {
                                found: target.unwrap_or_default().to_string(),
                                expected: top.map(str::to_string),
                                offset,
                            });
                        }
                    }
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(MarkupError::UnterminatedTag {
                tag: open.spec.to_string(),
                offset: open.offset,
            });
        }

        tracing::trace!(spans = spans.len(), "parsed markup");
        Ok(spans)
    }

    /// Parses markup, falling back to the raw text as a single plain span.
    pub fn parse_lenient(&self, markup: &str) -> Vec<Span> {
        self.parse(markup).unwrap_or_else(|err| {
            tracing::debug!(%err, "markup rejected, rendering as plain text");
            if markup.is_empty() {
                Vec::new()
            } else {
                vec![Span::plain(markup)]
            }
        })
    }
}

struct Frame<'a> {
    spec: &'a str,
    style: Style,
    offset: usize,
}

fn push_span(spans: &mut Vec<Span>, text: &str, style: &Style) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.style == *style => last.text.push_str(text),
        _ => spans.push(Span::new(text, style.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_style::Color;

    fn parse(input: &str) -> Result<Vec<Span>> {
        MarkupParser::new().parse(input)
    }

    mod spans {
        use super::*;

        #[test]
        fn plain_text_is_one_identity_span() {
            assert_eq!(parse("hello world").unwrap(), vec![Span::plain("hello world")]);
            assert!(parse("").unwrap().is_empty());
        }

        #[test]
        fn single_tag() {
            assert_eq!(
                parse("[bold]hi[/bold]").unwrap(),
                vec![Span::new("hi", Style::new().bold())]
            );
        }

        #[test]
        fn nested_tags_merge() {
            let spans = parse("[bold]a[red]b[/red]c[/bold]").unwrap();
            assert_eq!(
                spans,
                vec![
                    Span::new("a", Style::new().bold()),
                    Span::new("b", Style::new().bold().fg(Color::Standard(1))),
                    Span::new("c", Style::new().bold()),
                ]
            );
        }

        #[test]
        fn inner_tag_wins() {
            let spans = parse("[red]x[blue]y[/][/]").unwrap();
            assert_eq!(spans[1].style.fg, Some(Color::Standard(4)));

            let spans = parse("[bold][not bold]x[/][/]").unwrap();
            assert_eq!(spans[0].style.bold, Some(false));
        }

        #[test]
        fn adjacent_equal_styles_coalesce() {
            assert_eq!(
                parse("[b]a[/b][b]b[/b]").unwrap(),
                vec![Span::new("ab", Style::new().bold())]
            );
        }

        #[test]
        fn escaped_and_literal_brackets() {
            let spans = parse("\\[bold] and array[0]").unwrap();
            assert_eq!(spans, vec![Span::plain("[bold] and array[0]")]);
        }

        #[test]
        fn newlines_stay_in_spans() {
            let spans = parse("[i]a\nb[/i]").unwrap();
            assert_eq!(spans, vec![Span::new("a\nb", Style::new().italic())]);
        }

        #[test]
        fn theme_names_resolve() {
            let theme = Theme::new().add("accent", Style::new().fg(Color::Standard(5)));
            let parser = MarkupParser::new().theme(theme);
            let spans = parser.parse("[accent]x[/accent]").unwrap();
            assert_eq!(spans[0].style.fg, Some(Color::Standard(5)));
        }

        #[test]
        fn link_tag() {
            let spans = parse("[link=https://example.com]site[/link=https://example.com]").unwrap();
            assert_eq!(spans[0].style.link.as_deref(), Some("https://example.com"));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn mismatched_close() {
            assert_eq!(
                parse("[bold]x[/italic]"),
                Err(MarkupError::MismatchedTag {
                    found: "italic".into(),
                    expected: Some("bold".into()),
                    offset: 7,
                })
            );
        }

        #[test]
        fn close_without_open() {
            assert!(matches!(
                parse("x[/]"),
                Err(MarkupError::MismatchedTag { expected: None, offset: 1, .. })
            ));
        }

        #[test]
        fn close_must_match_innermost() {
            assert!(matches!(
                parse("[bold][red]x[/bold][/red]"),
                Err(MarkupError::MismatchedTag { .. })
            ));
        }

        #[test]
        fn unterminated() {
            assert_eq!(
                parse("a[bold]b"),
                Err(MarkupError::UnterminatedTag {
                    tag: "bold".into(),
                    offset: 1,
                })
            );
        }

        #[test]
        fn invalid_style() {
            assert!(matches!(
                parse("[blurple]x[/]"),
                Err(MarkupError::InvalidStyle { ref spec, .. }) if spec == "blurple"
            ));
        }

        #[test]
        fn too_deep() {
            let parser = MarkupParser::new().max_depth(3);
            assert!(parser.parse("[b][i][u]x[/][/][/]").is_ok());
            assert_eq!(
                parser.parse("[b][i][u][d]x[/][/][/][/]"),
                Err(MarkupError::TooDeep { limit: 3 })
            );
        }

        #[test]
        fn default_depth_guards_hostile_input() {
            let input = "[b]".repeat(10_000);
            assert_eq!(
                parse(&input),
                Err(MarkupError::TooDeep {
                    limit: DEFAULT_MAX_DEPTH
                })
            );
        }

        #[test]
        fn lenient_falls_back_to_raw() {
            let spans = MarkupParser::new().parse_lenient("[bold]oops");
            assert_eq!(spans, vec![Span::plain("[bold]oops")]);
        }
    }

    mod emoji {
        use super::*;

        #[test]
        fn replaced_by_default() {
            assert_eq!(parse(":rocket:").unwrap(), vec![Span::plain("🚀")]);
        }

        #[test]
        fn disabled() {
            let parser = MarkupParser::new().emoji(false);
            assert_eq!(parser.parse(":rocket:").unwrap(), vec![Span::plain(":rocket:")]);
        }

        #[test]
        fn custom_source() {
            let mut table = std::collections::HashMap::new();
            table.insert("ok".to_string(), "👌".to_string());
            let parser = MarkupParser::new().emoji_source(table);
            assert_eq!(
                parser.parse("[b]:ok:[/b]").unwrap(),
                vec![Span::new("👌", Style::new().bold())]
            );
        }
    }
}
