//! Laying out and drawing a [`Table`].

use glint_style::Style;

use super::resolve::{resolve_widths, ColumnBounds};
use super::{Column, Table};
use crate::boxes::{CellRow, Divider};
use crate::measure::Measurement;
use crate::renderable::Render;
use crate::segment::{Justify, Line, Segment};
use crate::text::Text;

impl Table {
    /// Border and divider cells for the current column count.
    fn overhead(&self) -> usize {
        let edge = if self.show_edge { 2 } else { 0 };
        edge + self.columns.len().saturating_sub(1)
    }

    fn header_cell(&self, column: &Column) -> Text {
        let style = column
            .style
            .merge(&self.header_style)
            .merge(&column.header_style)
            .merge(column.header.base_style());
        column
            .header
            .clone()
            .style(style)
            .justify(column.justify)
            .no_wrap(column.no_wrap)
    }

    fn body_cell(column: &Column, cell: &Text) -> Text {
        cell.clone()
            .style(column.style.merge(cell.base_style()))
            .justify(column.justify)
            .no_wrap(column.no_wrap)
    }

    /// The header row (when shown) and body rows with column settings applied.
    fn prepared(&self) -> (Option<Vec<Text>>, Vec<Vec<Text>>) {
        let header = self
            .show_header
            .then(|| self.columns.iter().map(|col| self.header_cell(col)).collect());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(col, cell)| Self::body_cell(col, cell))
                    .collect()
            })
            .collect();
        (header, rows)
    }

    fn column_bounds(&self, header: Option<&[Text]>, rows: &[Vec<Text>]) -> Vec<ColumnBounds> {
        let pad = self.padding * 2;
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = header
                    .into_iter()
                    .chain(rows.iter().map(Vec::as_slice))
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.measure(usize::MAX))
                    .fold(Measurement::default(), Measurement::union);

                let mut minimum = content.minimum;
                let mut natural = content.maximum;
                if let Some(max) = col.max_width {
                    minimum = minimum.min(max);
                    natural = natural.min(max);
                }
                if let Some(min) = col.min_width {
                    minimum = minimum.max(min);
                    natural = natural.max(min);
                }
                ColumnBounds {
                    fixed: col.width.map(|width| width + pad),
                    ratio: col.ratio,
                    minimum: minimum + pad,
                    natural: natural + pad,
                }
            })
            .collect()
    }

    fn border_line(&self, text: String) -> Line {
        Line::styled(text, self.border_style.clone())
    }

    fn row_lines(&self, cells: &[Text], widths: &[usize], row: CellRow) -> Vec<Line> {
        let (left, divider, right) = self.box_style.chars().cell_edges(row);
        let pad = self.padding;

        let rendered: Vec<Vec<Line>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| {
                let content = width.saturating_sub(pad * 2);
                let mut lines = cell.render(content);
                for line in &mut lines {
                    line.pad_to(content, cell.base_style());
                }
                lines
            })
            .collect();
        let height = rendered.iter().map(Vec::len).max().unwrap_or(0).max(1);

        (0..height)
            .map(|y| {
                let mut line = Line::new();
                if self.show_edge {
                    line.push_str(&left.to_string(), &self.border_style);
                }
                for (i, (cell_lines, &width)) in rendered.iter().zip(widths).enumerate() {
                    if i > 0 {
                        line.push_str(&divider.to_string(), &self.border_style);
                    }
                    let base = cells[i].base_style();
                    let mut cell = Line::blank(pad, base.clone());
                    match cell_lines.get(y) {
                        Some(content) => cell.append(content.clone()),
                        None => cell.push(Segment::blank(width.saturating_sub(pad * 2), base.clone())),
                    }
                    cell.pad_to(width, base);
                    cell.crop(width);
                    line.append(cell);
                }
                if self.show_edge {
                    line.push_str(&right.to_string(), &self.border_style);
                }
                line
            })
            .collect()
    }

    fn banner(text: &Text, style: &Style, width: usize) -> Vec<Line> {
        text.clone()
            .style(style.merge(text.base_style()))
            .justify(Justify::Center)
            .render(width)
    }
}

impl Render for Table {
    fn measure(&self, max_width: usize) -> Measurement {
        let (header, rows) = self.prepared();
        let bounds = self.column_bounds(header.as_deref(), &rows);
        let overhead = self.overhead();

        let minimum: usize = bounds
            .iter()
            .map(|b| b.fixed.unwrap_or(b.minimum))
            .sum::<usize>()
            + overhead;
        let natural: usize = bounds
            .iter()
            .map(|b| b.fixed.unwrap_or(b.natural))
            .sum::<usize>()
            + overhead;
        let has_ratio = bounds.iter().any(|b| b.fixed.is_none() && b.ratio.is_some());

        let maximum = if self.expand || has_ratio {
            max_width
        } else {
            natural
        };
        Measurement::new(minimum, maximum).clamp(max_width)
    }

    fn render(&self, width: usize) -> Vec<Line> {
        let (header, rows) = self.prepared();
        let bounds = self.column_bounds(header.as_deref(), &rows);
        let widths = resolve_widths(&bounds, width.saturating_sub(self.overhead())).widths;
        let chars = self.box_style.chars();
        let edge = self.show_edge;

        let mut lines = Vec::new();
        if let Some(title) = &self.title {
            lines.extend(Self::banner(title, &self.title_style, width));
        }
        if edge {
            lines.push(self.border_line(chars.top_line(&widths, edge)));
        }
        if let Some(header) = &header {
            lines.extend(self.row_lines(header, &widths, CellRow::Head));
            if !rows.is_empty() {
                lines.push(self.border_line(chars.divider_line(Divider::Head, &widths, edge)));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if i > 0 && self.show_lines {
                lines.push(self.border_line(chars.divider_line(Divider::Row, &widths, edge)));
            }
            lines.extend(self.row_lines(row, &widths, CellRow::Body));
        }
        if edge {
            lines.push(self.border_line(chars.bottom_line(&widths, edge)));
        }
        if let Some(caption) = &self.caption {
            lines.extend(Self::banner(caption, &self.caption_style, width));
        }

        for line in &mut lines {
            line.set_width(width, &Style::default());
        }
        lines
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn lines_are_exactly_width(
            cells in prop::collection::vec("[a-z日 ]{0,30}", 3),
            width in 0usize..80,
            edge in any::<bool>(),
        ) {
            let mut table = Table::new()
                .column(Column::new("One"))
                .column(Column::new("Two").ratio(2))
                .column(Column::new("Three").no_wrap(true))
                .show_edge(edge);
            let row: Vec<&str> = cells.iter().map(String::as_str).collect();
            table.add_row(&row).unwrap();
            for line in table.render(width) {
                prop_assert_eq!(line.width(), width);
            }
        }
    }
}
