//! Greedy word wrapping over styled segments.
//!
//! Break opportunities are runs of whitespace. A word that cannot fit on a
//! line of its own is hard-split by cells, never through a wide character.
//! Whitespace at a break is dropped; whitespace leading the paragraph is
//! kept unless [`WrapOptions::trim_leading`] is set.
//!
//! ```rust
//! use glint_render::segment::Segment;
//! use glint_render::wrap::wrap;
//!
//! let lines = wrap(&[Segment::plain("The quick brown fox")], 10);
//! let text: Vec<String> = lines.iter().map(|l| l.plain_text()).collect();
//! assert_eq!(text, vec!["The quick", "brown fox"]);
//! ```

use std::mem;

use glint_style::Style;

use crate::cells::char_width;
use crate::measure::Measurement;
use crate::segment::{Line, Segment};

/// Knobs for [`wrap_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrapOptions {
    /// Drop whitespace at the start of the paragraph.
    pub trim_leading: bool,
}

/// A word or a whitespace run, possibly spanning several styles.
struct Token {
    line: Line,
    width: usize,
    space: bool,
}

impl Token {
    fn new(space: bool) -> Self {
        Self {
            line: Line::new(),
            width: 0,
            space,
        }
    }

    fn push(&mut self, c: char, style: &Style) {
        let mut buf = [0u8; 4];
        self.line.push_str(c.encode_utf8(&mut buf), style);
        self.width += char_width(c);
    }
}

/// Whitespace that allows a line break. No-break space does not.
fn is_break_space(c: char) -> bool {
    c.is_whitespace() && c != '\u{a0}' && c != '\u{202f}'
}

fn tokenize(segments: &[Segment]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for segment in segments {
        for c in segment.text().chars() {
            let space = is_break_space(c);
            match tokens.last_mut() {
                Some(token) if token.space == space => token.push(c, segment.style()),
                _ => {
                    let mut token = Token::new(space);
                    token.push(c, segment.style());
                    tokens.push(token);
                }
            }
        }
    }
    tokens
}

/// Hard-splits a word into pieces of at most `width` cells.
fn chop_line(line: &Line, width: usize) -> Vec<(Line, usize)> {
    let mut pieces = Vec::new();
    let mut current = Line::new();
    let mut used = 0;
    let mut buf = [0u8; 4];

    for segment in line.segments() {
        for c in segment.text().chars() {
            let w = char_width(c);
            if used + w > width && used > 0 {
                pieces.push((mem::take(&mut current), used));
                used = 0;
            }
            current.push_str(c.encode_utf8(&mut buf), segment.style());
            used += w;
        }
    }
    if !current.is_empty() {
        pieces.push((current, used));
    }
    pieces
}

/// Wraps one paragraph of segments to `max_width` cells.
pub fn wrap(segments: &[Segment], max_width: usize) -> Vec<Line> {
    wrap_with(segments, max_width, WrapOptions::default())
}

/// Wraps one paragraph of segments with explicit options.
///
/// Always returns at least one line. A `max_width` of zero yields a single
/// empty line.
pub fn wrap_with(segments: &[Segment], max_width: usize, options: WrapOptions) -> Vec<Line> {
    if max_width == 0 {
        return vec![Line::new()];
    }

    let mut lines = Vec::new();
    let mut current = Line::new();
    let mut used = 0;
    let mut pending: Option<Token> = None;
    let mut at_start = true;

    for mut token in tokenize(segments) {
        if token.space {
            pending = Some(token);
            continue;
        }

        let space = pending.take();
        if at_start {
            at_start = false;
            if let Some(mut indent) = space.filter(|_| !options.trim_leading) {
                // An indent that cannot share a line with the first word is
                // split along with it.
                indent.line.append(token.line);
                token.line = indent.line;
                token.width += indent.width;
            }
        } else if let Some(space) = space {
            if used + space.width + token.width <= max_width {
                used += space.width;
                current.append(space.line);
            } else {
                lines.push(mem::take(&mut current));
                used = 0;
            }
        }

        if used + token.width <= max_width {
            used += token.width;
            current.append(token.line);
            continue;
        }

        if used > 0 {
            lines.push(mem::take(&mut current));
        }
        let mut pieces = chop_line(&token.line, max_width);
        let (last, last_width) = pieces.pop().unwrap_or_default();
        lines.extend(pieces.into_iter().map(|(piece, _)| piece));
        current = last;
        used = last_width;
    }

    if let Some(space) = pending {
        let keep = !(at_start && options.trim_leading);
        let room = max_width.saturating_sub(used);
        if keep && room > 0 {
            let mut tail = space.line;
            tail.crop(room);
            current.append(tail);
        }
    }

    lines.push(current);
    lines
}

/// Measures a paragraph: the widest word and the full single-line width.
pub fn measure_segments(segments: &[Segment]) -> Measurement {
    let mut widest_word = 0;
    let mut total = 0;
    for token in tokenize(segments) {
        total += token.width;
        if !token.space {
            widest_word = widest_word.max(token.width);
        }
    }
    Measurement::new(widest_word, total)
}
