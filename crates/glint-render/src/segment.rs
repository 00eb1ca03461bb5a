//! The intermediate representation shared by every renderer.
//!
//! Renderers produce `Vec<Line>`; a [`Line`] is an ordered list of
//! [`Segment`]s, and a segment is a run of text without newlines paired with
//! a resolved [`Style`]. The output driver is the only thing that turns
//! lines into escape sequences.

use std::fmt;
use std::str::FromStr;

use glint_style::{Style, StyleError};
use serde::{Deserialize, Serialize};

use crate::cells::{cell_len, char_width, ELLIPSIS};

/// Horizontal alignment of content within a width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on both sides; odd leftovers go to the right.
    Center,
    /// Pad on the left.
    Right,
}

impl FromStr for Justify {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Justify::Left),
            "center" | "centre" => Ok(Justify::Center),
            "right" => Ok(Justify::Right),
            _ => Err(StyleError::spec(s, "expected left, center or right")),
        }
    }
}

/// A run of text with a single style. Never contains a newline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    text: String,
    style: Style,
}

impl Segment {
    /// Creates a segment. Newlines are replaced with spaces; split text into
    /// lines before building segments.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        let mut text = text.into();
        if text.contains('\n') {
            text = text.replace('\n', " ");
        }
        Self { text, style }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }

    /// `width` spaces in the given style.
    pub fn blank(width: usize, style: Style) -> Self {
        Self::new(" ".repeat(width), style)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Display width in cells.
    pub fn width(&self) -> usize {
        cell_len(&self.text)
    }

    /// Returns a copy with `base` layered under this segment's style.
    pub fn with_base(&self, base: &Style) -> Segment {
        Segment {
            text: self.text.clone(),
            style: base.merge(&self.style),
        }
    }
}

/// One line of output: segments in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line holding a single segment.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut line = Line::new();
        line.push(Segment::new(text, style));
        line
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::default())
    }

    /// `width` spaces.
    pub fn blank(width: usize, style: Style) -> Self {
        Self::styled(" ".repeat(width), style)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends a segment, merging it into the previous one when the styles
    /// match. Empty segments are dropped.
    pub fn push(&mut self, segment: Segment) {
        if segment.text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.style == segment.style => last.text.push_str(&segment.text),
            _ => self.segments.push(segment),
        }
    }

    pub fn push_str(&mut self, text: &str, style: &Style) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.style == *style => last.text.push_str(text),
            _ => self.segments.push(Segment::new(text, style.clone())),
        }
    }

    /// Appends all segments of `other`.
    pub fn append(&mut self, other: Line) {
        for segment in other.segments {
            self.push(segment);
        }
    }

    /// Display width in cells.
    pub fn width(&self) -> usize {
        self.segments.iter().map(Segment::width).sum()
    }

    /// The unstyled text of the line.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Layers `base` under every segment's style.
    pub fn with_base(&self, base: &Style) -> Line {
        if base.is_plain() {
            return self.clone();
        }
        let mut line = Line::new();
        for segment in &self.segments {
            line.push(segment.with_base(base));
        }
        line
    }

    /// The leading part of the line that fits in `width` cells, unpadded.
    /// Also returns the style of the segment the cut fell in.
    fn prefix(&self, width: usize) -> (Line, Option<Style>) {
        let mut line = Line::new();
        let mut used = 0;
        for segment in &self.segments {
            let seg_width = segment.width();
            if used + seg_width <= width {
                used += seg_width;
                line.push(segment.clone());
                continue;
            }
            let mut text = String::new();
            for c in segment.text.chars() {
                let w = char_width(c);
                if used + w > width {
                    break;
                }
                text.push(c);
                used += w;
            }
            line.push(Segment::new(text, segment.style.clone()));
            return (line, Some(segment.style.clone()));
        }
        (line, None)
    }

    /// Cuts the line to at most `width` cells.
    ///
    /// A wide character straddling the edge is replaced with a space so the
    /// result is exactly `width` cells when the line was wider.
    pub fn crop(&mut self, width: usize) {
        if self.width() <= width {
            return;
        }
        let (mut line, cut_style) = self.prefix(width);
        line.pad_to(width, &cut_style.unwrap_or_default());
        *self = line;
    }

    /// Pads the line on the right with spaces to `width` cells.
    pub fn pad_to(&mut self, width: usize, style: &Style) {
        let current = self.width();
        if current < width {
            self.push(Segment::blank(width - current, style.clone()));
        }
    }

    /// Crops or pads so the line is exactly `width` cells.
    pub fn set_width(&mut self, width: usize, style: &Style) {
        self.crop(width);
        self.pad_to(width, style);
    }

    /// Truncates to `width` cells, ending in `…` when anything was cut.
    pub fn ellipsize(&mut self, width: usize) {
        if self.width() <= width {
            return;
        }
        if width == 0 {
            self.segments.clear();
            return;
        }
        let (mut line, cut_style) = self.prefix(width - 1);
        line.push(Segment::new(ELLIPSIS.to_string(), cut_style.unwrap_or_default()));
        *self = line;
    }

    /// Removes trailing whitespace.
    pub fn trim_end(&mut self) {
        while let Some(last) = self.segments.last_mut() {
            let trimmed = last.text.trim_end().len();
            last.text.truncate(trimmed);
            if last.text.is_empty() {
                self.segments.pop();
            } else {
                break;
            }
        }
    }

    /// Aligns the line within `width` cells, cropping if it is wider.
    pub fn justify(&mut self, width: usize, justify: Justify, style: &Style) {
        self.crop(width);
        let extra = width - self.width();
        if extra == 0 {
            return;
        }
        let (left, right) = match justify {
            Justify::Left => (0, extra),
            Justify::Center => (extra / 2, extra - extra / 2),
            Justify::Right => (extra, 0),
        };
        if left > 0 {
            let mut padded = Line::blank(left, style.clone());
            padded.append(std::mem::take(self));
            *self = padded;
        }
        if right > 0 {
            self.push(Segment::blank(right, style.clone()));
        }
    }
}

impl From<Segment> for Line {
    fn from(segment: Segment) -> Self {
        let mut line = Line::new();
        line.push(segment);
        line
    }
}

impl FromIterator<Segment> for Line {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        let mut line = Line::new();
        for segment in iter {
            line.push(segment);
        }
        line
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(&segment.text)?;
        }
        Ok(())
    }
}

/// Joins the plain text of rendered lines with newlines.
pub fn lines_to_plain(lines: &[Line]) -> String {
    lines
        .iter()
        .map(Line::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_style::Color;

    fn red() -> Style {
        Style::new().fg(Color::Standard(1))
    }

    mod segments {
        use super::*;

        #[test]
        fn newlines_replaced() {
            assert_eq!(Segment::plain("a\nb").text(), "a b");
        }

        #[test]
        fn width_is_cells() {
            assert_eq!(Segment::plain("日本").width(), 4);
        }

        #[test]
        fn with_base_merges_under() {
            let seg = Segment::new("x", Style::new().bold());
            let based = seg.with_base(&red());
            assert_eq!(based.style(), &Style::new().fg(Color::Standard(1)).bold());
        }
    }

    mod lines {
        use super::*;

        #[test]
        fn push_coalesces_equal_styles() {
            let mut line = Line::new();
            line.push(Segment::plain("a"));
            line.push(Segment::plain("b"));
            line.push(Segment::new("c", red()));
            line.push(Segment::plain(""));
            assert_eq!(line.segments().len(), 2);
            assert_eq!(line.plain_text(), "abc");
        }

        #[test]
        fn crop_across_segments() {
            let mut line = Line::new();
            line.push(Segment::plain("abc"));
            line.push(Segment::new("def", red()));
            line.crop(4);
            assert_eq!(line.plain_text(), "abcd");
            assert_eq!(line.segments()[1].style(), &red());
        }

        #[test]
        fn crop_replaces_straddling_wide_char() {
            let mut line = Line::plain("a日本");
            line.crop(4);
            assert_eq!(line.plain_text(), "a日 ");
            assert_eq!(line.width(), 4);
        }

        #[test]
        fn set_width_pads() {
            let mut line = Line::plain("ab");
            line.set_width(5, &Style::default());
            assert_eq!(line.plain_text(), "ab   ");
        }

        #[test]
        fn ellipsize() {
            let mut line = Line::plain("Hello World");
            line.ellipsize(6);
            assert_eq!(line.plain_text(), "Hello…");

            let mut wide = Line::plain("日本語");
            wide.ellipsize(4);
            assert_eq!(wide.plain_text(), "日…");
        }

        #[test]
        fn justify_variants() {
            let mut left = Line::plain("ab");
            left.justify(6, Justify::Left, &Style::default());
            assert_eq!(left.plain_text(), "ab    ");

            let mut center = Line::plain("ab");
            center.justify(7, Justify::Center, &Style::default());
            assert_eq!(center.plain_text(), "  ab   ");

            let mut right = Line::plain("ab");
            right.justify(6, Justify::Right, &Style::default());
            assert_eq!(right.plain_text(), "    ab");
        }

        #[test]
        fn trim_end() {
            let mut line = Line::new();
            line.push(Segment::plain("ab "));
            line.push(Segment::new("  ", red()));
            line.trim_end();
            assert_eq!(line.plain_text(), "ab");
        }
    }

    #[test]
    fn justify_from_str_and_serde() {
        assert_eq!("center".parse::<Justify>().unwrap(), Justify::Center);
        assert!("middle".parse::<Justify>().is_err());
        let j: Justify = serde_yaml::from_str("right").unwrap();
        assert_eq!(j, Justify::Right);
    }
}
