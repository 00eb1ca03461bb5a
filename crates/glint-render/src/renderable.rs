//! The render contract and the tagged set of built-in renderables.

use glint_markup::MarkupParser;

use crate::align::Align;
use crate::columns::Columns;
use crate::measure::Measurement;
use crate::panel::Panel;
use crate::progress::ProgressBar;
use crate::rule::Rule;
use crate::segment::Line;
use crate::table::Table;
use crate::text::Text;
use crate::tree::Tree;

/// Something that can be laid out to a width and drawn as lines.
///
/// `render(width)` must return lines no wider than `width`. Tables, panels
/// and rules return lines of exactly `width` cells.
pub trait Render {
    /// Intrinsic widths, limited to `max_width`.
    fn measure(&self, max_width: usize) -> Measurement;

    /// Lays the content out at `width` cells.
    fn render(&self, width: usize) -> Vec<Line>;
}

/// Any of the built-in renderables.
#[derive(Debug, Clone)]
pub enum Renderable {
    Text(Text),
    Table(Table),
    Panel(Panel),
    Tree(Tree),
    Rule(Rule),
    ProgressBar(ProgressBar),
    Align(Align),
    Columns(Columns),
    /// Renderables stacked vertically.
    Group(Vec<Renderable>),
}

impl Renderable {
    /// Re-parses markup in text content with `parser`. Containers that carry
    /// their own theme are left alone.
    pub(crate) fn retheme_text(&mut self, parser: &MarkupParser) {
        match self {
            Renderable::Text(text) => text.retheme(parser),
            Renderable::Group(items) => {
                for item in items {
                    item.retheme_text(parser);
                }
            }
            Renderable::Align(align) => align.retheme_text(parser),
            Renderable::Columns(columns) => columns.retheme_text(parser),
            _ => {}
        }
    }
}

impl Render for Renderable {
    fn measure(&self, max_width: usize) -> Measurement {
        match self {
            Renderable::Text(text) => text.measure(max_width),
            Renderable::Table(table) => table.measure(max_width),
            Renderable::Panel(panel) => panel.measure(max_width),
            Renderable::Tree(tree) => tree.measure(max_width),
            Renderable::Rule(rule) => rule.measure(max_width),
            Renderable::ProgressBar(bar) => bar.measure(max_width),
            Renderable::Align(align) => align.measure(max_width),
            Renderable::Columns(columns) => columns.measure(max_width),
            Renderable::Group(items) => items
                .iter()
                .map(|item| item.measure(max_width))
                .fold(Measurement::default(), Measurement::union),
        }
    }

    fn render(&self, width: usize) -> Vec<Line> {
        match self {
            Renderable::Text(text) => text.render(width),
            Renderable::Table(table) => table.render(width),
            Renderable::Panel(panel) => panel.render(width),
            Renderable::Tree(tree) => tree.render(width),
            Renderable::Rule(rule) => rule.render(width),
            Renderable::ProgressBar(bar) => bar.render(width),
            Renderable::Align(align) => align.render(width),
            Renderable::Columns(columns) => columns.render(width),
            Renderable::Group(items) => items.iter().flat_map(|item| item.render(width)).collect(),
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Renderable {
                fn from(value: $variant) -> Self {
                    Renderable::$variant(value)
                }
            }
        )*
    };
}

impl_from!(Text, Table, Panel, Tree, Rule, ProgressBar, Align, Columns);

impl From<&str> for Renderable {
    fn from(markup: &str) -> Self {
        Renderable::Text(Text::from(markup))
    }
}

impl From<String> for Renderable {
    fn from(markup: String) -> Self {
        Renderable::Text(Text::from(markup))
    }
}

impl From<Vec<Renderable>> for Renderable {
    fn from(items: Vec<Renderable>) -> Self {
        Renderable::Group(items)
    }
}
