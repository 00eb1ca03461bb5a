//! Styled, wrappable text.

use std::borrow::Cow;

use glint_markup::{MarkupParser, Span};
use glint_style::{Style, Theme};

use crate::cells::char_width;
use crate::error::Result;
use crate::measure::Measurement;
use crate::renderable::Render;
use crate::segment::{Justify, Line, Segment};
use crate::wrap::{measure_segments, wrap};

/// Columns between tab stops.
pub const TAB_SIZE: usize = 8;

/// A block of styled text.
///
/// Newlines start new paragraphs; each paragraph wraps independently.
///
/// ```rust
/// use glint_render::{Render, Text};
///
/// let text = Text::from_markup("[bold]Hello[/bold] world").unwrap();
/// let lines = text.render(5);
/// assert_eq!(lines.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    spans: Vec<Span>,
    /// Markup the spans were parsed from, kept so a theme can be applied later.
    source: Option<String>,
    style: Style,
    justify: Justify,
    no_wrap: bool,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::from_spans(vec![Span::plain(text)])
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::from_spans(vec![Span::new(text, style)])
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self {
            spans,
            ..Self::default()
        }
    }

    /// Parses markup with the default theme.
    pub fn from_markup(markup: &str) -> Result<Self> {
        Ok(Self::from_spans(glint_markup::parse(markup)?).with_source(markup))
    }

    /// Parses markup with `parser`, so its theme names resolve.
    pub fn from_markup_with(markup: &str, parser: &MarkupParser) -> Result<Self> {
        Ok(Self::from_spans(parser.parse(markup)?).with_source(markup))
    }

    /// Parses markup with `parser`, keeping malformed markup as literal text.
    pub fn lenient_with(markup: &str, parser: &MarkupParser) -> Self {
        Self::from_spans(parser.parse_lenient(markup)).with_source(markup)
    }

    fn with_source(mut self, markup: &str) -> Self {
        self.source = Some(markup.to_string());
        self
    }

    /// Parses the original markup again with `parser`.
    ///
    /// Text that was not built from markup is left as it is.
    pub fn retheme(&mut self, parser: &MarkupParser) {
        if let Some(source) = &self.source {
            self.spans = parser.parse_lenient(source);
        }
    }

    /// Like [`Text::retheme`], borrowing when there is nothing to parse.
    pub(crate) fn rethemed(&self, parser: Option<&MarkupParser>) -> Cow<'_, Text> {
        match (parser, &self.source) {
            (Some(parser), Some(_)) => {
                let mut text = self.clone();
                text.retheme(parser);
                Cow::Owned(text)
            }
            _ => Cow::Borrowed(self),
        }
    }

    /// Style layered under every span.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Keep each paragraph on one line, ending in `…` when it does not fit.
    pub fn no_wrap(mut self, no_wrap: bool) -> Self {
        self.no_wrap = no_wrap;
        self
    }

    pub fn append(&mut self, text: impl Into<String>, style: Style) {
        self.source = None;
        self.spans.push(Span::new(text, style));
    }

    /// The style layered under every span.
    pub fn base_style(&self) -> &Style {
        &self.style
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn plain_text(&self) -> String {
        glint_markup::plain_text(&self.spans)
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.text.is_empty())
    }

    /// Splits the spans into paragraphs of segments, expanding tabs.
    pub(crate) fn paragraphs(&self) -> Vec<Vec<Segment>> {
        let mut paragraphs = vec![Vec::new()];
        let mut column = 0;

        for span in &self.spans {
            let style = self.style.merge(&span.style);
            for (i, piece) in span.text.split('\n').enumerate() {
                if i > 0 {
                    paragraphs.push(Vec::new());
                    column = 0;
                }
                if piece.is_empty() {
                    continue;
                }
                let text = expand_tabs(piece, &mut column);
                if let Some(current) = paragraphs.last_mut() {
                    current.push(Segment::new(text, style.clone()));
                }
            }
        }
        paragraphs
    }
}

/// A markup parser resolving tag names through `theme`.
pub(crate) fn themed_parser(theme: &Theme) -> MarkupParser {
    MarkupParser::new().theme(theme.clone())
}

fn expand_tabs(text: &str, column: &mut usize) -> String {
    if !text.contains('\t') {
        *column += crate::cells::cell_len(text);
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\t' {
            let stop = TAB_SIZE - *column % TAB_SIZE;
            out.extend(std::iter::repeat(' ').take(stop));
            *column += stop;
        } else {
            out.push(c);
            *column += char_width(c);
        }
    }
    out
}

impl Render for Text {
    fn measure(&self, max_width: usize) -> Measurement {
        let measurement = self
            .paragraphs()
            .iter()
            .map(|p| measure_segments(p))
            .fold(Measurement::default(), Measurement::union);
        let measurement = if self.no_wrap {
            Measurement::exact(measurement.maximum)
        } else {
            measurement
        };
        measurement.clamp(max_width)
    }

    fn render(&self, width: usize) -> Vec<Line> {
        let mut lines = Vec::new();
        for paragraph in self.paragraphs() {
            if self.no_wrap {
                let mut line: Line = paragraph.into_iter().collect();
                line.ellipsize(width);
                lines.push(line);
            } else {
                lines.extend(wrap(&paragraph, width));
            }
        }

        if self.justify != Justify::Left {
            for line in &mut lines {
                line.trim_end();
                line.justify(width, self.justify, &self.style);
            }
        }
        lines
    }
}

impl From<&str> for Text {
    /// Parses markup leniently; malformed markup becomes literal text.
    fn from(markup: &str) -> Self {
        Text::from_spans(glint_markup::parse_lenient(markup)).with_source(markup)
    }
}

impl From<String> for Text {
    fn from(markup: String) -> Self {
        Text::from(markup.as_str())
    }
}

impl From<Vec<Span>> for Text {
    fn from(spans: Vec<Span>) -> Self {
        Text::from_spans(spans)
    }
}
