//! Style model and color system for glint.
//!
//! This crate is the bottom layer of the renderer: everything that draws to
//! the terminal describes its look with a [`Style`], and every color goes
//! through [`resolve_color`] before it reaches the output stream.
//!
//! - [`Color`] / [`Color::parse`]: color values as users write them
//! - [`Capability`]: what the output sink can display
//! - [`resolve_color`]: downgrade a color to an [`EmissionColor`]
//! - [`Style`]: tri-state attributes plus colors and a hyperlink, with
//!   right-biased [`Style::merge`]
//! - [`Theme`]: named styles, loadable from YAML
//!
//! ```rust
//! use glint_style::{Style, Theme};
//!
//! let theme = Theme::default();
//! let header = theme.style("table.header");
//! let cell = Style::parse("cyan").unwrap();
//! assert_eq!(cell.merge(&header).bold, Some(true));
//! ```

pub mod color;
pub mod error;
pub mod palette;
pub mod style;
pub mod theme;

pub use color::{resolve_color, Capability, Color, EmissionColor};
pub use error::{Result, StyleError};
pub use palette::Rgb;
pub use style::{Attribute, Style};
pub use theme::Theme;
