//! Box-drawing character sets for tables and panels.
//!
//! Each set is described by an eight-line template, four characters per
//! line:
//!
//! ```text
//! ╭─┬╮   top
//! │ ││   head
//! ├─┼┤   head_row
//! │ ││   mid
//! ├─┼┤   row
//! ├─┼┤   foot_row
//! │ ││   foot
//! ╰─┴╯   bottom
//! ```
//!
//! The columns are left edge, horizontal fill, column divider and right
//! edge. Cell rows (head, mid, foot) only use the edges and the divider.

use std::fmt;
use std::str::FromStr;

use glint_style::StyleError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Box style for tables and panels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxStyle {
    /// `+`, `-` and `|` only.
    Ascii,
    /// Light lines with square corners: ┌ ─ ┐ │
    Square,
    /// Light lines with rounded corners: ╭ ─ ╮ │
    #[default]
    Rounded,
    /// Double lines: ╔ ═ ╗ ║
    Double,
    /// Heavy lines: ┏ ━ ┓ ┃
    Heavy,
    /// Heavy around the header, light elsewhere.
    HeavyHead,
    /// Double outer edge, light inner dividers.
    DoubleEdge,
    /// Inner dividers only.
    Minimal,
    /// A rule under the header, nothing else.
    Simple,
    /// Horizontal rules only.
    Horizontals,
}

impl BoxStyle {
    pub const ALL: [BoxStyle; 10] = [
        BoxStyle::Ascii,
        BoxStyle::Square,
        BoxStyle::Rounded,
        BoxStyle::Double,
        BoxStyle::Heavy,
        BoxStyle::HeavyHead,
        BoxStyle::DoubleEdge,
        BoxStyle::Minimal,
        BoxStyle::Simple,
        BoxStyle::Horizontals,
    ];

    fn template(self) -> &'static str {
        match self {
            BoxStyle::Ascii => "+--+\n| ||\n|-+|\n| ||\n|-+|\n|-+|\n| ||\n+--+",
            BoxStyle::Square => "┌─┬┐\n│ ││\n├─┼┤\n│ ││\n├─┼┤\n├─┼┤\n│ ││\n└─┴┘",
            BoxStyle::Rounded => "╭─┬╮\n│ ││\n├─┼┤\n│ ││\n├─┼┤\n├─┼┤\n│ ││\n╰─┴╯",
            BoxStyle::Double => "╔═╦╗\n║ ║║\n╠═╬╣\n║ ║║\n╠═╬╣\n╠═╬╣\n║ ║║\n╚═╩╝",
            BoxStyle::Heavy => "┏━┳┓\n┃ ┃┃\n┣━╋┫\n┃ ┃┃\n┣━╋┫\n┣━╋┫\n┃ ┃┃\n┗━┻┛",
            BoxStyle::HeavyHead => "┏━┳┓\n┃ ┃┃\n┡━╇┩\n│ ││\n├─┼┤\n├─┼┤\n│ ││\n└─┴┘",
            BoxStyle::DoubleEdge => "╔═╤╗\n║ │║\n╟─┼╢\n║ │║\n╟─┼╢\n╟─┼╢\n║ │║\n╚═╧╝",
            BoxStyle::Minimal => "  ╷ \n  │ \n╶─┼╴\n  │ \n╶─┼╴\n╶─┼╴\n  │ \n  ╵ ",
            BoxStyle::Simple => "    \n    \n ── \n    \n    \n ── \n    \n    ",
            BoxStyle::Horizontals => " ── \n    \n ── \n    \n ── \n ── \n    \n ── ",
        }
    }

    /// The parsed character set.
    pub fn chars(self) -> &'static BoxChars {
        let index = BoxStyle::ALL
            .iter()
            .position(|style| *style == self)
            .unwrap_or(0);
        &BOX_CHARS[index]
    }

    pub fn name(self) -> &'static str {
        match self {
            BoxStyle::Ascii => "ascii",
            BoxStyle::Square => "square",
            BoxStyle::Rounded => "rounded",
            BoxStyle::Double => "double",
            BoxStyle::Heavy => "heavy",
            BoxStyle::HeavyHead => "heavy_head",
            BoxStyle::DoubleEdge => "double_edge",
            BoxStyle::Minimal => "minimal",
            BoxStyle::Simple => "simple",
            BoxStyle::Horizontals => "horizontals",
        }
    }
}

impl FromStr for BoxStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        BoxStyle::ALL
            .into_iter()
            .find(|style| style.name() == normalized)
            .ok_or_else(|| StyleError::spec(s, "unknown box style"))
    }
}

impl fmt::Display for BoxStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static BOX_CHARS: Lazy<Vec<BoxChars>> = Lazy::new(|| {
    BoxStyle::ALL
        .iter()
        .map(|style| BoxChars::from_template(style.template()))
        .collect()
});

/// Rows of a box template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Row {
    Top = 0,
    Head = 1,
    HeadRow = 2,
    Mid = 3,
    Row = 4,
    FootRow = 5,
    Foot = 6,
    Bottom = 7,
}

/// Which horizontal divider to draw between table rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Divider {
    /// Under the header.
    Head,
    /// Between body rows.
    Row,
    /// Above the footer.
    Foot,
}

/// Which cell row to take edges from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellRow {
    Head,
    Body,
    Foot,
}

/// The characters of one box style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxChars {
    rows: [[char; 4]; 8],
}

impl BoxChars {
    fn from_template(template: &str) -> Self {
        let mut rows = [[' '; 4]; 8];
        for (row, line) in rows.iter_mut().zip(template.lines()) {
            for (slot, c) in row.iter_mut().zip(line.chars()) {
                *slot = c;
            }
        }
        Self { rows }
    }

    fn get(&self, row: Row, index: usize) -> char {
        self.rows[row as usize][index]
    }

    pub fn top_left(&self) -> char {
        self.get(Row::Top, 0)
    }

    pub fn top(&self) -> char {
        self.get(Row::Top, 1)
    }

    pub fn top_right(&self) -> char {
        self.get(Row::Top, 3)
    }

    pub fn bottom_left(&self) -> char {
        self.get(Row::Bottom, 0)
    }

    pub fn bottom(&self) -> char {
        self.get(Row::Bottom, 1)
    }

    pub fn bottom_right(&self) -> char {
        self.get(Row::Bottom, 3)
    }

    /// Left edge, column divider and right edge of a cell row.
    pub fn cell_edges(&self, row: CellRow) -> (char, char, char) {
        let row = match row {
            CellRow::Head => Row::Head,
            CellRow::Body => Row::Mid,
            CellRow::Foot => Row::Foot,
        };
        (self.get(row, 0), self.get(row, 2), self.get(row, 3))
    }

    fn rule(&self, row: Row, widths: &[usize], edge: bool) -> String {
        let [left, fill, divider, right] = self.rows[row as usize];
        let mut out = String::new();
        if edge {
            out.push(left);
        }
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                out.push(divider);
            }
            out.extend(std::iter::repeat(fill).take(*width));
        }
        if edge {
            out.push(right);
        }
        out
    }

    /// The top border over columns of the given widths.
    pub fn top_line(&self, widths: &[usize], edge: bool) -> String {
        self.rule(Row::Top, widths, edge)
    }

    /// A horizontal divider between rows.
    pub fn divider_line(&self, divider: Divider, widths: &[usize], edge: bool) -> String {
        let row = match divider {
            Divider::Head => Row::HeadRow,
            Divider::Row => Row::Row,
            Divider::Foot => Row::FootRow,
        };
        self.rule(row, widths, edge)
    }

    /// The bottom border under columns of the given widths.
    pub fn bottom_line(&self, widths: &[usize], edge: bool) -> String {
        self.rule(Row::Bottom, widths, edge)
    }
}
