//! # Glint - Styled Terminal Rendering
//!
//! Glint renders styled text and layouts to terminals. It is split into
//! three layers, re-exported here:
//!
//! - [`style`]: colors, capability levels, [`Style`] and [`Theme`]
//! - [`markup`]: the `[bold red]inline[/]` markup parser
//! - [`render`]: wrapping, [`Table`], [`Panel`], [`Tree`], [`Rule`],
//!   [`Columns`], [`Align`], live [`Progress`] and the [`Console`] that
//!   writes it all out
//!
//! ## Quick Start
//!
//! ```rust
//! use glint::prelude::*;
//!
//! let mut table = Table::new()
//!     .title("Planets")
//!     .column(Column::new("Name"))
//!     .column(Column::new("Moons").justify(Justify::Right));
//! table.add_row(&["Earth", "1"])?;
//! table.add_row(&["[red]Mars[/red]", "2"])?;
//!
//! let mut console = Console::new(Vec::new()).width(40).capability(Capability::None);
//! console.print(&table)?;
//! console.rule(Some("done"))?;
//! # Ok::<(), glint::RenderError>(())
//! ```
//!
//! ## Capability
//!
//! Nothing is detected behind the caller's back: a [`Console`] or
//! [`Progress`] session is given a [`Capability`] once, and every color is
//! downgraded to it on output. [`Console::stdout`] is the one convenience
//! that asks the terminal for its size and whether colors are enabled.

pub mod demo;

pub use glint_markup as markup;
pub use glint_render as render;
pub use glint_style as style;

pub use glint_markup::{escape, parse, MarkupError, MarkupParser, Span};
pub use glint_render::progress::{Progress, ProgressColumn, TaskId, TaskState, TaskUpdate};
pub use glint_render::{
    Align, AnsiEncoder, BoxStyle, Column, Columns, Console, GuideStyle, Justify, Line,
    Measurement, Panel, ProgressBar, Render, RenderError, Renderable, Rule, Segment, Table, Text,
    Tree, VerticalAlign,
};
pub use glint_style::{Attribute, Capability, Color, Style, StyleError, Theme};

/// Everything needed to build and print renderables.
pub mod prelude {
    pub use glint_render::progress::{Progress, ProgressColumn, TaskUpdate};
    pub use glint_render::{
        Align, BoxStyle, Column, Columns, Console, GuideStyle, Justify, Panel, ProgressBar,
        Render, Renderable, Rule, Table, Text, Tree,
    };
    pub use glint_style::{Capability, Color, Style, Theme};
}
