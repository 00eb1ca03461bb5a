//! Display-width helpers.
//!
//! Every width calculation in the renderer goes through [`char_width`], so
//! column math, wrapping and padding always agree:
//!
//! - East Asian wide and fullwidth characters take 2 cells
//! - combining marks, zero-width characters and controls take 0 cells
//! - everything else takes 1 cell
//!
//! A string's width is the sum of its characters' widths.

use unicode_width::UnicodeWidthChar;

/// Ellipsis appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Number of terminal cells `c` occupies.
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of `text` in terminal cells.
///
/// # Example
///
/// ```rust
/// use glint_render::cells::cell_len;
///
/// assert_eq!(cell_len("abc"), 3);
/// assert_eq!(cell_len("日本"), 4);
/// assert_eq!(cell_len("e\u{301}"), 1);
/// ```
pub fn cell_len(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Truncates `text` to at most `width` cells, ending with `…` when cut.
///
/// ```rust
/// use glint_render::cells::truncate;
///
/// assert_eq!(truncate("Hello", 10), "Hello");
/// assert_eq!(truncate("Hello World", 6), "Hello…");
/// ```
pub fn truncate(text: &str, width: usize) -> String {
    if cell_len(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let limit = width - 1;
    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > limit {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push(ELLIPSIS);
    result
}

/// Splits `text` into pieces of at most `width` cells.
///
/// Wide characters are never split; a piece ends early rather than cut one
/// in half. A character wider than `width` gets a piece of its own.
pub fn chop_cells(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for c in text.chars() {
        let w = char_width(c);
        if used + w > width && used > 0 {
            pieces.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Crops or pads `text` with spaces so it is exactly `width` cells wide.
///
/// A wide character that would straddle the edge is replaced by a space.
pub fn set_cell_size(text: &str, width: usize) -> String {
    let current = cell_len(text);
    if current == width {
        return text.to_string();
    }
    if current < width {
        let mut out = String::with_capacity(text.len() + width - current);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - current));
        return out;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = char_width(c);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Repeats `pattern` to fill exactly `width` cells.
pub fn repeat_to_width(pattern: &str, width: usize) -> String {
    let pattern_width = cell_len(pattern);
    if pattern_width == 0 {
        return " ".repeat(width);
    }
    let count = width / pattern_width + 1;
    set_cell_size(&pattern.repeat(count), width)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn truncate_never_exceeds(text in "\\PC{0,40}", width in 0usize..30) {
            prop_assert!(cell_len(&truncate(&text, width)) <= width);
        }

        #[test]
        fn chop_pieces_fit(text in "[a-z日本語 ]{0,40}", width in 2usize..20) {
            let pieces = chop_cells(&text, width);
            for piece in &pieces {
                prop_assert!(cell_len(piece) <= width);
            }
            prop_assert_eq!(pieces.concat(), text);
        }

        #[test]
        fn set_cell_size_is_exact(text in "\\PC{0,40}", width in 0usize..30) {
            prop_assert_eq!(cell_len(&set_cell_size(&text, width)), width);
        }
    }
}
