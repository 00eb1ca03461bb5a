//! Named styles.
//!
//! A [`Theme`] maps names such as `table.header` or `bar.complete` to
//! [`Style`]s. Renderers look their decorations up by name, and markup tags
//! may use a theme name anywhere a style spec is accepted (`[warning]...[/]`).
//!
//! Themes can be built in code or loaded from YAML, where each entry is a
//! style spec string:
//!
//! ```yaml
//! warning: bold yellow
//! table.header: bold magenta
//! bar.complete: "#ff8800"
//! ```
//!
//! Loaded entries are layered over [`Theme::default`], so a theme file only
//! needs to name the styles it changes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::color::Color;
use crate::error::{Result, StyleError};
use crate::style::Style;

/// A collection of named styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// Creates a theme with no styles at all.
    pub fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Adds a named style, returning the theme for chaining.
    pub fn add(mut self, name: impl Into<String>, style: Style) -> Self {
        self.insert(name, style);
        self
    }

    /// Adds or replaces a named style.
    pub fn insert(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Looks up a style by name, falling back to the identity style.
    pub fn style(&self, name: &str) -> Style {
        self.get(name).cloned().unwrap_or_default()
    }

    /// Resolves a spec that is either a theme name or a style spec.
    pub fn resolve(&self, spec: &str) -> Result<Style> {
        match self.get(spec.trim()) {
            Some(style) => Ok(style.clone()),
            None => Style::parse(spec),
        }
    }

    /// Number of named styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Style names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parses a YAML mapping of names to style specs, layered over the
    /// default theme.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> =
            serde_yaml::from_str(yaml).map_err(|e| StyleError::Theme(e.to_string()))?;

        let mut theme = Theme::default();
        for (name, spec) in entries {
            let style = Style::parse(&spec)
                .map_err(|e| StyleError::Theme(format!("style '{name}': {e}")))?;
            theme.insert(name, style);
        }
        Ok(theme)
    }

    /// Reads and parses a YAML theme file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| StyleError::Theme(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }
}

impl Default for Theme {
    /// The styles used by the built-in renderers.
    fn default() -> Self {
        let plain = Style::new();
        Theme::new()
            .add("rule.line", Style::new().fg(Color::Standard(10)))
            .add("rule.text", plain.clone())
            .add("table.header", Style::new().bold())
            .add("table.border", plain.clone())
            .add("table.title", Style::new().italic())
            .add("table.caption", Style::new().italic().dim())
            .add("panel.border", plain.clone())
            .add("panel.title", plain.clone())
            .add("tree.line", plain)
            .add("bar.back", Style::new().fg(Color::Palette(237)))
            .add("bar.complete", Style::new().fg(Color::Rgb(249, 38, 114)))
            .add("bar.finished", Style::new().fg(Color::Rgb(114, 156, 31)))
            .add("bar.pulse", Style::new().fg(Color::Rgb(249, 38, 114)))
            .add("progress.description", Style::new())
            .add("progress.percentage", Style::new().fg(Color::Standard(5)))
            .add("progress.count", Style::new().fg(Color::Standard(2)))
            .add("progress.elapsed", Style::new().fg(Color::Standard(3)))
            .add("progress.remaining", Style::new().fg(Color::Standard(6)))
            .add("info", Style::new().fg(Color::Standard(6)))
            .add("warning", Style::new().fg(Color::Standard(3)).bold())
            .add("danger", Style::new().fg(Color::Standard(9)).bold())
    }
}
