//! The [`Style`] value type and its merge logic.
//!
//! A style is a bundle of optional visual attributes. Every field is
//! tri-state: `None` inherits from whatever the style is merged onto,
//! `Some(true)` switches the attribute on and `Some(false)` explicitly
//! switches it off.
//!
//! # Merging
//!
//! [`Style::merge`] layers an overlay onto a base: `Some` values in the
//! overlay replace base values, `None` values preserve the base. Nested
//! markup resolves with exactly this rule, so the innermost tag wins.
//!
//! ```rust
//! use glint_style::{Color, Style};
//!
//! let base = Style::new().bold().fg(Color::Standard(1));
//! let overlay = Style::new().italic().fg(Color::Standard(4));
//! let merged = base.merge(&overlay);
//!
//! assert_eq!(merged.bold, Some(true));
//! assert_eq!(merged.italic, Some(true));
//! assert_eq!(merged.fg, Some(Color::Standard(4)));
//! ```
//!
//! # Spec strings
//!
//! [`Style::parse`] reads the space-separated form used inside markup tags:
//! `"bold red on white"`, `"not italic"`, `"#ff8800 u"`,
//! `"link=https://example.com"`.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{Result, StyleError};

/// A boolean text attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Bold,
    Dim,
    Italic,
    Underline,
    Reverse,
    Strike,
}

impl Attribute {
    /// All attributes, in SGR emission order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Bold,
        Attribute::Dim,
        Attribute::Italic,
        Attribute::Underline,
        Attribute::Reverse,
        Attribute::Strike,
    ];

    /// Looks up an attribute by its keyword or one-letter alias.
    pub fn from_keyword(word: &str) -> Option<Attribute> {
        Some(match word {
            "bold" | "b" => Attribute::Bold,
            "dim" | "d" => Attribute::Dim,
            "italic" | "i" => Attribute::Italic,
            "underline" | "u" => Attribute::Underline,
            "reverse" | "r" => Attribute::Reverse,
            "strike" | "s" | "strikethrough" => Attribute::Strike,
            _ => return None,
        })
    }

    /// The canonical keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Attribute::Bold => "bold",
            Attribute::Dim => "dim",
            Attribute::Italic => "italic",
            Attribute::Underline => "underline",
            Attribute::Reverse => "reverse",
            Attribute::Strike => "strike",
        }
    }
}

/// Visual attributes applied to a run of text.
///
/// All fields are optional so a style can be a full definition or a partial
/// override. `Style::default()` is the identity: merging it changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground (text) color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    pub bold: Option<bool>,
    /// Dimmed/faint text.
    pub dim: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    /// Swap foreground and background.
    pub reverse: Option<bool>,
    /// Strikethrough text.
    pub strike: Option<bool>,
    /// Hyperlink target, emitted as OSC 8.
    pub link: Option<String>,
}

impl Style {
    /// Creates the identity style (all `None`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers `overlay` on top of `self`.
    ///
    /// `Some` values in `overlay` override, `None` values preserve `self`.
    pub fn merge(&self, overlay: &Style) -> Style {
        Style {
            fg: overlay.fg.or(self.fg),
            bg: overlay.bg.or(self.bg),
            bold: overlay.bold.or(self.bold),
            dim: overlay.dim.or(self.dim),
            italic: overlay.italic.or(self.italic),
            underline: overlay.underline.or(self.underline),
            reverse: overlay.reverse.or(self.reverse),
            strike: overlay.strike.or(self.strike),
            link: overlay.link.clone().or_else(|| self.link.clone()),
        }
    }

    /// Returns true if no field is set.
    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }

    /// Reads the tri-state value of an attribute.
    pub fn get(&self, attr: Attribute) -> Option<bool> {
        match attr {
            Attribute::Bold => self.bold,
            Attribute::Dim => self.dim,
            Attribute::Italic => self.italic,
            Attribute::Underline => self.underline,
            Attribute::Reverse => self.reverse,
            Attribute::Strike => self.strike,
        }
    }

    /// True when the attribute is explicitly on.
    pub fn has(&self, attr: Attribute) -> bool {
        self.get(attr) == Some(true)
    }

    /// Sets an attribute on or off explicitly.
    pub fn set(mut self, attr: Attribute, on: bool) -> Self {
        let slot = match attr {
            Attribute::Bold => &mut self.bold,
            Attribute::Dim => &mut self.dim,
            Attribute::Italic => &mut self.italic,
            Attribute::Underline => &mut self.underline,
            Attribute::Reverse => &mut self.reverse,
            Attribute::Strike => &mut self.strike,
        };
        *slot = Some(on);
        self
    }

    /// Explicitly negates an attribute, overriding anything beneath it.
    pub fn not(self, attr: Attribute) -> Self {
        self.set(attr, false)
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Sets the background color.
    pub fn on(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    pub fn bold(self) -> Self {
        self.set(Attribute::Bold, true)
    }

    pub fn not_bold(self) -> Self {
        self.not(Attribute::Bold)
    }

    pub fn dim(self) -> Self {
        self.set(Attribute::Dim, true)
    }

    pub fn italic(self) -> Self {
        self.set(Attribute::Italic, true)
    }

    pub fn underline(self) -> Self {
        self.set(Attribute::Underline, true)
    }

    pub fn reverse(self) -> Self {
        self.set(Attribute::Reverse, true)
    }

    pub fn strike(self) -> Self {
        self.set(Attribute::Strike, true)
    }

    /// Parses a space-separated style spec.
    ///
    /// Tokens:
    /// - attribute keywords and aliases: `bold`/`b`, `dim`/`d`, `italic`/`i`,
    ///   `underline`/`u`, `reverse`/`r`, `strike`/`s`
    /// - `not <attribute>` for an explicit negation
    /// - `on <color>` for the background
    /// - `link=<url>` for a hyperlink
    /// - any other token is a foreground color
    /// - `none` contributes nothing
    pub fn parse(spec: &str) -> Result<Style> {
        let mut style = Style::new();
        let mut tokens = SpecTokens::new(spec);

        while let Some(token) = tokens.next() {
            if let Some(url) = token.strip_prefix("link=") {
                style.link = Some(url.to_string());
                continue;
            }

            let word = token.to_ascii_lowercase();
            match word.as_str() {
                "none" => {}
                "not" => {
                    let target = tokens
                        .next()
                        .ok_or_else(|| StyleError::spec(spec, "'not' without an attribute"))?;
                    let attr = Attribute::from_keyword(&target.to_ascii_lowercase())
                        .ok_or_else(|| StyleError::UnknownAttribute(target.to_string()))?;
                    style = style.not(attr);
                }
                "on" => {
                    let color = tokens
                        .next()
                        .ok_or_else(|| StyleError::spec(spec, "'on' without a color"))?;
                    style.bg = Some(Color::parse(&color)?);
                }
                other => match Attribute::from_keyword(other) {
                    Some(attr) => style = style.set(attr, true),
                    None => style.fg = Some(Color::parse(&token)?),
                },
            }
        }

        Ok(style)
    }
}

impl FromStr for Style {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        Style::parse(s)
    }
}

impl fmt::Display for Style {
    /// Writes the style back as a spec string that [`Style::parse`] accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        for attr in Attribute::ALL {
            match self.get(attr) {
                Some(true) => parts.push(attr.keyword().to_string()),
                Some(false) => parts.push(format!("not {}", attr.keyword())),
                None => {}
            }
        }
        if let Some(fg) = self.fg {
            parts.push(fg.to_string());
        }
        if let Some(bg) = self.bg {
            parts.push(format!("on {bg}"));
        }
        if let Some(link) = &self.link {
            parts.push(format!("link={link}"));
        }

        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// Splits a spec on whitespace, keeping `rgb( 1, 2, 3 )` together.
struct SpecTokens<'a> {
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> SpecTokens<'a> {
    fn new(spec: &'a str) -> Self {
        Self {
            words: spec.split_whitespace(),
        }
    }
}

impl Iterator for SpecTokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.words.next()?;
        let mut token = first.to_string();
        if first.contains('(') && !first.contains(')') {
            for word in self.words.by_ref() {
                token.push_str(word);
                if word.contains(')') {
                    break;
                }
            }
        }
        Some(token)
    }
}
