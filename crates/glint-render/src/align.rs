//! Placing a renderable within a wider area.

use std::fmt;
use std::str::FromStr;

use glint_markup::MarkupParser;
use glint_style::{Style, StyleError};
use serde::{Deserialize, Serialize};

use crate::measure::Measurement;
use crate::renderable::{Render, Renderable};
use crate::segment::{Justify, Line};

/// Where content sits when the area is taller than the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl FromStr for VerticalAlign {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(VerticalAlign::Top),
            "middle" => Ok(VerticalAlign::Middle),
            "bottom" => Ok(VerticalAlign::Bottom),
            _ => Err(StyleError::spec(s, "expected top, middle or bottom")),
        }
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        })
    }
}

/// Aligns a child horizontally within the full width it is given.
///
/// The child is drawn at its natural width, then padded on the left, right
/// or both. An `Align` always claims the whole width, so printing one
/// through a [`Console`](crate::Console) places it across the terminal.
///
/// ```rust
/// use glint_render::{Align, Render};
///
/// let lines = Align::center("hi").render(6);
/// assert_eq!(lines[0].plain_text(), "  hi  ");
/// let lines = Align::right("hi").render(6);
/// assert_eq!(lines[0].plain_text(), "    hi");
/// ```
#[derive(Debug, Clone)]
pub struct Align {
    child: Box<Renderable>,
    align: Justify,
    vertical: VerticalAlign,
    style: Style,
    pad: bool,
    width: Option<usize>,
    height: Option<usize>,
}

impl Align {
    pub fn new(child: impl Into<Renderable>, align: Justify) -> Self {
        Self {
            child: Box::new(child.into()),
            align,
            vertical: VerticalAlign::Top,
            style: Style::default(),
            pad: true,
            width: None,
            height: None,
        }
    }

    pub fn left(child: impl Into<Renderable>) -> Self {
        Self::new(child, Justify::Left)
    }

    pub fn center(child: impl Into<Renderable>) -> Self {
        Self::new(child, Justify::Center)
    }

    pub fn right(child: impl Into<Renderable>) -> Self {
        Self::new(child, Justify::Right)
    }

    /// Style of the padding.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Pad on the right as well. When off, lines end where the child ends.
    pub fn pad(mut self, pad: bool) -> Self {
        self.pad = pad;
        self
    }

    /// Upper bound on the width the child is drawn at.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Places the child vertically within `height` lines.
    pub fn vertical(mut self, vertical: VerticalAlign, height: usize) -> Self {
        self.vertical = vertical;
        self.height = Some(height);
        self
    }

    pub(crate) fn retheme_text(&mut self, parser: &MarkupParser) {
        self.child.retheme_text(parser);
    }

    fn blank(&self, width: usize) -> Line {
        if self.pad {
            Line::blank(width, self.style.clone())
        } else {
            Line::new()
        }
    }
}

impl Render for Align {
    fn measure(&self, max_width: usize) -> Measurement {
        let child = self.child.measure(max_width);
        Measurement::new(child.minimum, max_width)
    }

    fn render(&self, width: usize) -> Vec<Line> {
        let mut child_width = self.child.measure(width).maximum.min(width);
        if let Some(limit) = self.width {
            child_width = child_width.min(limit);
        }
        let mut lines = self.child.render(child_width);
        let shape = lines.iter().map(Line::width).max().unwrap_or(0);
        let excess = width.saturating_sub(shape);

        for line in &mut lines {
            line.set_width(shape, &Style::default());
            if excess == 0 {
                continue;
            }
            let left = match self.align {
                Justify::Left => 0,
                Justify::Center => excess / 2,
                Justify::Right => excess,
            };
            let mut aligned = Line::blank(left, self.style.clone());
            aligned.append(std::mem::take(line));
            if self.pad {
                aligned.pad_to(width, &self.style);
            }
            *line = aligned;
        }

        let Some(height) = self.height else {
            return lines;
        };
        let spare = height.saturating_sub(lines.len());
        let top = match self.vertical {
            VerticalAlign::Top => 0,
            VerticalAlign::Middle => spare / 2,
            VerticalAlign::Bottom => spare,
        };
        let mut placed: Vec<Line> = (0..top).map(|_| self.blank(width)).collect();
        placed.append(&mut lines);
        placed.extend((0..spare - top).map(|_| self.blank(width)));
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::lines_to_plain;
    use crate::table::{Column, Table};
    use crate::text::Text;
    use glint_style::Color;

    fn plain(align: &Align, width: usize) -> Vec<String> {
        align.render(width).iter().map(Line::plain_text).collect()
    }

    mod horizontal {
        use super::*;

        #[test]
        fn left_center_right() {
            assert_eq!(plain(&Align::left("Left aligned"), 20), vec!["Left aligned        "]);
            assert_eq!(plain(&Align::center("Center"), 11), vec!["  Center   "]);
            assert_eq!(plain(&Align::right("Right"), 8), vec!["   Right"]);
        }

        #[test]
        fn block_moves_as_a_whole() {
            let text = Text::plain("a\nbbb");
            assert_eq!(plain(&Align::right(text), 6), vec!["   a  ", "   bbb"]);
        }

        #[test]
        fn no_pad_leaves_right_edge_open() {
            assert_eq!(plain(&Align::center("ab").pad(false), 6), vec!["  ab"]);
            assert_eq!(plain(&Align::left("ab").pad(false), 6), vec!["ab"]);
        }

        #[test]
        fn wider_child_wraps_to_width() {
            let lines = plain(&Align::center("The quick brown fox"), 10);
            assert_eq!(lines, vec!["The quick ", "brown fox "]);
        }

        #[test]
        fn width_limits_child() {
            let align = Align::center("The quick brown fox").width(9);
            assert_eq!(plain(&align, 11), vec![" The quick ", " brown fox "]);
        }

        #[test]
        fn centers_a_table() {
            let mut table = Table::new().column(Column::new("A"));
            table.add_row(&["1"]).unwrap();
            let left = (21 - table.measure(21).maximum) / 2;
            let lines = Align::center(table).render(21);
            assert!(lines.iter().all(|line| line.width() == 21));
            assert_eq!(lines[0].plain_text().find('╭'), Some(left));
            assert!(left > 0);
        }

        #[test]
        fn padding_style() {
            let blue = Style::new().on(Color::Standard(4));
            let lines = Align::right("x").style(blue.clone()).render(3);
            assert_eq!(lines[0].segments()[0].style(), &blue);
        }
    }

    #[test]
    fn vertical_placement() {
        let middle = Align::center("x").vertical(VerticalAlign::Middle, 3);
        assert_eq!(lines_to_plain(&middle.render(3)), "   \n x \n   ");
        let bottom = Align::left("x").vertical(VerticalAlign::Bottom, 2);
        assert_eq!(plain(&bottom, 2), vec!["  ", "x "]);
    }

    #[test]
    fn measure_claims_full_width() {
        assert_eq!(Align::center("a bb").measure(30), Measurement::new(2, 30));
    }

    #[test]
    fn parse_vertical() {
        assert_eq!("middle".parse::<VerticalAlign>().unwrap(), VerticalAlign::Middle);
        assert!("centre".parse::<VerticalAlign>().is_err());
    }
}
