//! Layout and output for styled terminal text.
//!
//! Every renderable in this crate implements [`Render`]: it reports the
//! range of widths it can use ([`Measurement`]) and lays itself out at a
//! given width as [`Line`]s of styled [`Segment`]s. Nothing touches the
//! terminal until an [`AnsiEncoder`] turns lines into escape sequences for a
//! fixed [`Capability`](glint_style::Capability).
//!
//! ## Renderables
//!
//! - [`Text`]: markup, wrapped at word boundaries
//! - [`Table`]: columns sized by content, ratio or fixed width
//! - [`Panel`]: a box around any renderable, with titles
//! - [`Tree`]: hierarchies with guide lines, any depth
//! - [`Rule`]: a horizontal line, optionally titled
//! - [`ProgressBar`]: one bar; [`progress::Progress`] drives a live display
//! - [`Align`]: places any renderable left, center or right
//! - [`Columns`]: items flowed side by side into a grid
//!
//! [`Renderable`] wraps all of them so mixed content can be stored and
//! stacked.
//!
//! ## Quick Start
//!
//! ```rust
//! use glint_render::{Column, Console, Panel, Table};
//! use glint_style::Capability;
//!
//! let mut table = Table::new()
//!     .column(Column::new("Name"))
//!     .column(Column::new("Age"));
//! table.add_row(&["Alice", "30"])?;
//! table.add_row(&["[bold]Bob[/bold]", "4"])?;
//!
//! let mut console = Console::new(Vec::new()).width(30).capability(Capability::None);
//! console.print(&Panel::fit(table).title("People"))?;
//!
//! let out = String::from_utf8(console.into_inner()).unwrap();
//! assert!(out.contains("Alice"));
//! # Ok::<(), glint_render::RenderError>(())
//! ```
//!
//! ## Width
//!
//! All widths are terminal cells, computed by [`cells::char_width`]. Wide
//! characters count 2, combining marks 0. Tables, panels and rules fill the
//! width they are rendered at exactly; text and trees never exceed it.

pub mod align;
pub mod boxes;
pub mod cells;
pub mod columns;
pub mod console;
pub mod error;
pub mod measure;
pub mod output;
pub mod panel;
pub mod progress;
pub mod renderable;
pub mod rule;
pub mod segment;
pub mod table;
pub mod text;
pub mod tree;
pub mod wrap;

pub use align::{Align, VerticalAlign};
pub use boxes::{BoxChars, BoxStyle};
pub use columns::Columns;
pub use console::Console;
pub use error::{RenderError, Result};
pub use measure::Measurement;
pub use output::AnsiEncoder;
pub use panel::Panel;
pub use progress::{Progress, ProgressBar, ProgressColumn, TaskId, TaskState, TaskUpdate};
pub use renderable::{Render, Renderable};
pub use rule::Rule;
pub use segment::{Justify, Line, Segment};
pub use table::{Column, Table};
pub use text::Text;
pub use tree::{GuideStyle, Tree};

use glint_style::Theme;
use once_cell::sync::Lazy;

static DEFAULT_THEME: Lazy<Theme> = Lazy::new(Theme::default);

/// Styles renderables start with before a caller applies a theme.
pub(crate) fn default_theme() -> &'static Theme {
    &DEFAULT_THEME
}
