//! Renderables laid out side by side in a grid.

use glint_markup::MarkupParser;
use glint_style::Style;

use crate::measure::Measurement;
use crate::renderable::{Render, Renderable};
use crate::segment::{Justify, Line};

/// Items flowed left to right into as many columns as fit.
///
/// Each column is as wide as its widest item; with [`Columns::equal`] every
/// column takes the width of the widest item overall. Rows are separated
/// only by their own lines, columns by `padding` spaces.
///
/// ```rust
/// use glint_render::{Columns, Render};
///
/// let items = ["Item 1", "Item 2", "Item 3", "Item 4"];
/// let columns = Columns::new(items).equal(true);
/// let text: Vec<String> = columns.render(15).iter().map(|l| l.plain_text()).collect();
/// assert_eq!(text, vec!["Item 1 Item 2", "Item 3 Item 4"]);
/// ```
#[derive(Debug, Clone)]
pub struct Columns {
    items: Vec<Renderable>,
    padding: usize,
    equal: bool,
    expand: bool,
    width: Option<usize>,
    align: Justify,
}

impl Default for Columns {
    fn default() -> Self {
        Self::new(Vec::<Renderable>::new())
    }
}

impl Columns {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            padding: 1,
            equal: false,
            expand: false,
            width: None,
            align: Justify::Left,
        }
    }

    pub fn add(&mut self, item: impl Into<Renderable>) {
        self.items.push(item.into());
    }

    /// Spaces between columns.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Give every column the width of the widest item.
    pub fn equal(mut self, equal: bool) -> Self {
        self.equal = equal;
        self
    }

    /// Spread spare width across the columns.
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Fixed column width, padding excluded.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Alignment of each item within its column.
    pub fn align(mut self, align: Justify) -> Self {
        self.align = align;
        self
    }

    pub(crate) fn retheme_text(&mut self, parser: &MarkupParser) {
        for item in &mut self.items {
            item.retheme_text(parser);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn item_widths(&self, max_width: usize) -> Vec<usize> {
        let widths: Vec<usize> = match self.width {
            Some(width) => vec![width; self.items.len()],
            None => self
                .items
                .iter()
                .map(|item| item.measure(max_width).maximum)
                .collect(),
        };
        if self.equal {
            let widest = widths.iter().copied().max().unwrap_or(0);
            vec![widest; widths.len()]
        } else {
            widths
        }
    }

    /// Column widths for the largest column count that fits in `width`.
    fn layout(&self, width: usize) -> Vec<usize> {
        let item_widths = self.item_widths(width);
        let mut count = item_widths.len().max(1);
        loop {
            let mut columns = vec![0; count];
            for (i, &item) in item_widths.iter().enumerate() {
                columns[i % count] = columns[i % count].max(item);
            }
            let total = columns.iter().sum::<usize>() + self.padding * (count - 1);
            if total <= width || count == 1 {
                if let [only] = columns.as_mut_slice() {
                    *only = (*only).min(width);
                }
                return columns;
            }
            count -= 1;
        }
    }

    fn spread(&self, columns: &mut [usize], width: usize) {
        let used = columns.iter().sum::<usize>() + self.padding * columns.len().saturating_sub(1);
        let spare = width.saturating_sub(used);
        if spare == 0 || columns.is_empty() {
            return;
        }
        let share = spare / columns.len();
        let remainder = spare % columns.len();
        for (i, column) in columns.iter_mut().enumerate() {
            *column += share + usize::from(i < remainder);
        }
    }

    fn cell(item: &Renderable, width: usize, align: Justify) -> Vec<Line> {
        let natural = item.measure(width).maximum.min(width);
        let mut lines = item.render(natural);
        for line in &mut lines {
            line.justify(width, align, &Style::default());
        }
        lines
    }
}

impl Render for Columns {
    fn measure(&self, max_width: usize) -> Measurement {
        let widths = self.item_widths(max_width);
        let minimum = self
            .items
            .iter()
            .map(|item| item.measure(max_width).minimum)
            .max()
            .unwrap_or(0);
        let maximum = if self.expand {
            max_width
        } else {
            widths.iter().sum::<usize>() + self.padding * widths.len().saturating_sub(1)
        };
        Measurement::new(minimum, maximum).clamp(max_width)
    }

    fn render(&self, width: usize) -> Vec<Line> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let mut columns = self.layout(width);
        if self.expand {
            self.spread(&mut columns, width);
        }

        let gap = Line::blank(self.padding, Style::default());
        let mut lines = Vec::new();
        for row in self.items.chunks(columns.len()) {
            let cells: Vec<Vec<Line>> = row
                .iter()
                .zip(&columns)
                .map(|(item, &column)| Self::cell(item, column, self.align))
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(0);

            for i in 0..height {
                let mut line = Line::new();
                for (c, &column) in columns.iter().enumerate() {
                    if c > 0 {
                        line.append(gap.clone());
                    }
                    match cells.get(c).and_then(|cell| cell.get(i)) {
                        Some(part) => line.append(part.clone()),
                        None => line.append(Line::blank(column, Style::default())),
                    }
                }
                line.crop(width);
                lines.push(line);
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Panel;

    fn items() -> Vec<String> {
        (1..=6).map(|i| format!("Item {i}")).collect()
    }

    fn plain(columns: &Columns, width: usize) -> Vec<String> {
        columns.render(width).iter().map(Line::plain_text).collect()
    }

    mod flow {
        use super::*;

        #[test]
        fn one_row_when_everything_fits() {
            let columns = Columns::new(items()).equal(true);
            assert_eq!(
                plain(&columns, 80),
                vec!["Item 1 Item 2 Item 3 Item 4 Item 5 Item 6"]
            );
        }

        #[test]
        fn wraps_into_rows() {
            let columns = Columns::new(items()).equal(true);
            assert_eq!(
                plain(&columns, 20),
                vec!["Item 1 Item 2 Item 3", "Item 4 Item 5 Item 6"]
            );
        }

        #[test]
        fn last_row_is_padded() {
            let columns = Columns::new(["a", "b", "c"]).padding(2);
            assert_eq!(plain(&columns, 4), vec!["a  b", "c   "]);
        }

        #[test]
        fn unequal_columns_take_their_widest_item() {
            let columns = Columns::new(["aaaa", "b", "cc", "d"]);
            assert_eq!(plain(&columns, 7), vec!["aaaa b", "cc   d"]);
        }

        #[test]
        fn single_column_is_cut_to_width() {
            let columns = Columns::new(["a long item here"]);
            for line in columns.render(6) {
                assert!(line.width() <= 6);
            }
        }

        #[test]
        fn empty_renders_nothing() {
            assert!(Columns::default().render(10).is_empty());
        }
    }

    mod sizing {
        use super::*;

        #[test]
        fn expand_spreads_spare_width() {
            let columns = Columns::new(["a", "b", "c"]).expand(true);
            let lines = columns.render(11);
            assert_eq!(lines[0].plain_text(), "a   b   c  ");
            assert_eq!(lines[0].width(), 11);
        }

        #[test]
        fn fixed_width() {
            let columns = Columns::new(["a", "b", "c"]).width(3);
            assert_eq!(plain(&columns, 8), vec!["a   b  ", "c      "]);
        }

        #[test]
        fn align_within_column() {
            let columns = Columns::new(["a", "bbb"]).equal(true).align(Justify::Right);
            assert_eq!(plain(&columns, 20), vec!["  a bbb"]);
        }

        #[test]
        fn tall_items_share_a_row() {
            let columns = Columns::new([Renderable::from(Panel::fit("x")), Renderable::from("y")]);
            assert_eq!(plain(&columns, 20), vec!["╭───╮ y", "│ x │  ", "╰───╯  "]);
        }

        #[test]
        fn measure() {
            let columns = Columns::new(["ab", "c d"]);
            assert_eq!(columns.measure(80), Measurement::new(2, 6));
            assert_eq!(columns.clone().expand(true).measure(80).maximum, 80);
        }
    }
}
