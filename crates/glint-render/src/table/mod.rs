//! Tables with measured, wrapped columns.
//!
//! ```rust
//! use glint_render::{Column, Render, Table};
//!
//! let mut table = Table::new()
//!     .column(Column::new("Name"))
//!     .column(Column::new("Age"));
//! table.add_row(&["Alice", "30"]).unwrap();
//! table.add_row(&["Bob", "25"]).unwrap();
//!
//! let lines = table.render(40);
//! assert!(lines.iter().all(|line| line.width() == 40));
//! ```
//!
//! Column widths come from [`resolve_widths`]. Every line of a rendered
//! table is exactly the requested width.

mod render;
mod resolve;

pub use resolve::{resolve_widths, ColumnBounds, ResolvedWidths};

use std::sync::Arc;

use glint_markup::MarkupParser;
use glint_style::{Style, Theme};

use crate::boxes::BoxStyle;
use crate::error::{RenderError, Result};
use crate::segment::Justify;
use crate::text::{themed_parser, Text};

/// One table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub(crate) header: Text,
    pub(crate) style: Style,
    pub(crate) header_style: Style,
    pub(crate) justify: Justify,
    pub(crate) width: Option<usize>,
    pub(crate) ratio: Option<usize>,
    pub(crate) min_width: Option<usize>,
    pub(crate) max_width: Option<usize>,
    pub(crate) no_wrap: bool,
}

impl Column {
    /// A column with a markup header.
    pub fn new(header: &str) -> Self {
        Self {
            header: Text::from(header),
            style: Style::default(),
            header_style: Style::default(),
            justify: Justify::Left,
            width: None,
            ratio: None,
            min_width: None,
            max_width: None,
            no_wrap: false,
        }
    }

    /// Style applied under every cell in the column.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Style layered over the table's header style for this column.
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    /// Fixed content width, padding excluded.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Share of the leftover width. Ignored when a fixed width is set.
    pub fn ratio(mut self, ratio: usize) -> Self {
        self.ratio = Some(ratio.max(1));
        self
    }

    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Truncate cells with `…` instead of wrapping them.
    pub fn no_wrap(mut self, no_wrap: bool) -> Self {
        self.no_wrap = no_wrap;
        self
    }

    pub fn header_text(&self) -> &Text {
        &self.header
    }
}

/// A table of markup cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
    pub(crate) rows: Vec<Vec<Text>>,
    pub(crate) title: Option<Text>,
    pub(crate) caption: Option<Text>,
    pub(crate) box_style: BoxStyle,
    pub(crate) show_header: bool,
    pub(crate) show_lines: bool,
    pub(crate) show_edge: bool,
    pub(crate) padding: usize,
    pub(crate) expand: bool,
    pub(crate) header_style: Style,
    pub(crate) border_style: Style,
    pub(crate) title_style: Style,
    pub(crate) caption_style: Style,
    /// Theme for markup in cells and labels, when one was set.
    pub(crate) markup_theme: Option<Arc<Theme>>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// An empty table with the default theme's styles.
    pub fn new() -> Self {
        let mut table = Self {
            columns: Vec::new(),
            rows: Vec::new(),
            title: None,
            caption: None,
            box_style: BoxStyle::default(),
            show_header: true,
            show_lines: false,
            show_edge: true,
            padding: 1,
            expand: false,
            header_style: Style::default(),
            border_style: Style::default(),
            title_style: Style::default(),
            caption_style: Style::default(),
            markup_theme: None,
        };
        table.apply_theme(crate::default_theme());
        table
    }

    /// Takes border, header, title and caption styles from `theme`.
    ///
    /// Theme names also become available as markup tags, both in cells
    /// already added and in later ones.
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.apply_theme(theme);
        self.markup_theme = Some(Arc::new(theme.clone()));
        let parser = themed_parser(theme);
        let labels = self.columns.iter_mut().map(|column| &mut column.header);
        let cells = self.rows.iter_mut().flatten();
        for text in labels
            .chain(cells)
            .chain(self.title.as_mut())
            .chain(self.caption.as_mut())
        {
            text.retheme(&parser);
        }
        self
    }

    fn parser(&self) -> Option<MarkupParser> {
        self.markup_theme.as_deref().map(themed_parser)
    }

    fn label(&self, markup: &str) -> Text {
        match self.parser() {
            Some(parser) => Text::lenient_with(markup, &parser),
            None => Text::from(markup),
        }
    }

    fn apply_theme(&mut self, theme: &Theme) {
        self.header_style = theme.style("table.header");
        self.border_style = theme.style("table.border");
        self.title_style = theme.style("table.title");
        self.caption_style = theme.style("table.caption");
    }

    pub fn column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    pub fn add_column(&mut self, mut column: Column) {
        if let Some(parser) = self.parser() {
            column.header.retheme(&parser);
        }
        self.columns.push(column);
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(self.label(title));
        self
    }

    pub fn caption(mut self, caption: &str) -> Self {
        self.caption = Some(self.label(caption));
        self
    }

    pub fn box_style(mut self, box_style: BoxStyle) -> Self {
        self.box_style = box_style;
        self
    }

    pub fn show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Draw a divider between body rows.
    pub fn show_lines(mut self, show: bool) -> Self {
        self.show_lines = show;
        self
    }

    /// Draw the outer border.
    pub fn show_edge(mut self, show: bool) -> Self {
        self.show_edge = show;
        self
    }

    /// Spaces on each side of every cell.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Fill the available width rather than the natural width.
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Adds a row of markup cells, one per column.
    ///
    /// Fails with [`RenderError::ColumnMismatch`] when the cell count is
    /// wrong, or with a markup error when a cell does not parse.
    pub fn add_row(&mut self, cells: &[&str]) -> Result<()> {
        self.check_len(cells.len())?;
        let parser = self.parser();
        let row = cells
            .iter()
            .map(|cell| match &parser {
                Some(parser) => Text::from_markup_with(cell, parser),
                None => Text::from_markup(cell),
            })
            .collect::<Result<Vec<_>>>()?;
        self.rows.push(row);
        Ok(())
    }

    /// Adds a row of already-built text cells.
    pub fn add_text_row(&mut self, cells: Vec<Text>) -> Result<()> {
        self.check_len(cells.len())?;
        self.rows.push(cells);
        Ok(())
    }

    fn check_len(&self, found: usize) -> Result<()> {
        if found != self.columns.len() {
            return Err(RenderError::ColumnMismatch {
                expected: self.columns.len(),
                found,
            });
        }
        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
