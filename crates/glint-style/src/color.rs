//! Color values, capability levels and color downgrading.
//!
//! Supported color spellings (case-insensitive):
//!
//! - Named colors: `black`, `red`, `green`, `yellow`, `blue`, `magenta`,
//!   `cyan`, `white`
//! - Bright variants: `bright_red`, `bright_white`, ... (`grey`/`gray` are
//!   bright black)
//! - `default`: the terminal's own foreground or background
//! - 256-color palette: `color(208)`
//! - RGB hex: `#ff6b35` or `#f63`
//! - RGB function: `rgb(255, 107, 53)`
//!
//! # Example
//!
//! ```rust
//! use glint_style::{resolve_color, Capability, Color, EmissionColor};
//!
//! let red = Color::parse("rgb(255,0,0)").unwrap();
//! assert_eq!(
//!     resolve_color(&red, Capability::Ansi16),
//!     Some(EmissionColor::Ansi16 { index: 1, bright: true })
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};
use crate::palette::{self, Rgb, EIGHT_BIT_PALETTE, STANDARD_PALETTE};

const NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// A color as written by the user, before capability resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The terminal's default color.
    Default,
    /// One of the 16 system colors (0–7 normal, 8–15 bright).
    Standard(u8),
    /// An index into the xterm 256-color table.
    Palette(u8),
    /// A 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parses a single color token.
    pub fn parse(spec: &str) -> Result<Self> {
        let s = spec.trim().to_ascii_lowercase();
        let invalid = || StyleError::InvalidColorSpec(spec.to_string());

        if s == "default" {
            return Ok(Color::Default);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
            if parts.len() != 3 {
                return Err(invalid());
            }
            let mut channels = [0u8; 3];
            for (slot, part) in channels.iter_mut().zip(&parts) {
                *slot = part.parse().map_err(|_| invalid())?;
            }
            return Ok(Color::Rgb(channels[0], channels[1], channels[2]));
        }

        if let Some(inner) = s.strip_prefix("color(").and_then(|r| r.strip_suffix(')')) {
            let index: u8 = inner.trim().parse().map_err(|_| invalid())?;
            return Ok(Color::Palette(index));
        }

        if s == "grey" || s == "gray" {
            return Ok(Color::Standard(8));
        }

        let (base, offset) = match s.strip_prefix("bright_") {
            Some(base) => (base, 8),
            None => (s.as_str(), 0),
        };
        NAMES
            .iter()
            .position(|name| *name == base)
            .map(|i| Color::Standard(i as u8 + offset))
            .ok_or_else(invalid)
    }

    /// Returns the RGB value this color stands for, if it has one.
    pub fn to_rgb(self) -> Option<Rgb> {
        match self {
            Color::Default => None,
            Color::Standard(i) => STANDARD_PALETTE.get(i as usize).copied(),
            Color::Palette(i) => Some(EIGHT_BIT_PALETTE[i as usize]),
            Color::Rgb(r, g, b) => Some(Rgb(r, g, b)),
        }
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Default => f.write_str("default"),
            Color::Standard(i) if i < 8 => f.write_str(NAMES[i as usize]),
            Color::Standard(i) if i < 16 => write!(f, "bright_{}", NAMES[i as usize - 8]),
            Color::Standard(i) | Color::Palette(i) => write!(f, "color({i})"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => Some(Color::Rgb(
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

/// Color richness supported by the output sink. Fixed for a session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Plain text only.
    None,
    /// 8 colors plus bold-for-bright.
    Ansi16,
    /// xterm 256-color table.
    Ansi256,
    /// 24-bit color.
    #[default]
    TrueColor,
}

impl FromStr for Capability {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no" | "off" => Ok(Capability::None),
            "ansi16" | "16" => Ok(Capability::Ansi16),
            "ansi256" | "256" => Ok(Capability::Ansi256),
            "truecolor" | "24bit" => Ok(Capability::TrueColor),
            _ => Err(StyleError::spec(s, "expected none, ansi16, ansi256 or truecolor")),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::None => "none",
            Capability::Ansi16 => "ansi16",
            Capability::Ansi256 => "ansi256",
            Capability::TrueColor => "truecolor",
        })
    }
}

/// A color ready to be written as an escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmissionColor {
    /// Reset to the terminal default.
    Default,
    /// System color `index` (0–7); `bright` selects the 8–15 variant.
    Ansi16 { index: u8, bright: bool },
    /// xterm 256-color index.
    Ansi256(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

/// Resolves `color` for a sink with the given capability.
///
/// Returns `None` at [`Capability::None`]. Downgrades pick the nearest entry
/// by Euclidean distance in RGB space with ties going to the lower index.
pub fn resolve_color(color: &Color, capability: Capability) -> Option<EmissionColor> {
    if capability == Capability::None {
        return None;
    }

    let emitted = match (*color, capability) {
        (Color::Default, _) => EmissionColor::Default,
        (Color::Standard(i), _) => standard(i % 16),
        (Color::Palette(i), Capability::Ansi16) if i < 16 => standard(i),
        (Color::Palette(i), Capability::Ansi16) => {
            standard(palette::nearest(&STANDARD_PALETTE, EIGHT_BIT_PALETTE[i as usize]) as u8)
        }
        (Color::Palette(i), _) => EmissionColor::Ansi256(i),
        (Color::Rgb(r, g, b), Capability::Ansi16) => {
            standard(palette::nearest(&STANDARD_PALETTE, Rgb(r, g, b)) as u8)
        }
        (Color::Rgb(r, g, b), Capability::Ansi256) => {
            EmissionColor::Ansi256(palette::nearest(&EIGHT_BIT_PALETTE[..], Rgb(r, g, b)) as u8)
        }
        (Color::Rgb(r, g, b), _) => EmissionColor::Rgb(r, g, b),
    };
    Some(emitted)
}

fn standard(index: u8) -> EmissionColor {
    EmissionColor::Ansi16 {
        index: index % 8,
        bright: index >= 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse {
        use super::*;

        #[test]
        fn named_colors() {
            assert_eq!(Color::parse("red").unwrap(), Color::Standard(1));
            assert_eq!(Color::parse("WHITE").unwrap(), Color::Standard(7));
            assert_eq!(Color::parse("bright_cyan").unwrap(), Color::Standard(14));
            assert_eq!(Color::parse("grey").unwrap(), Color::Standard(8));
            assert_eq!(Color::parse("default").unwrap(), Color::Default);
        }

        #[test]
        fn hex_colors() {
            assert_eq!(Color::parse("#ff6b35").unwrap(), Color::Rgb(255, 107, 53));
            assert_eq!(Color::parse("#fff").unwrap(), Color::Rgb(255, 255, 255));
            assert!(Color::parse("#ff").is_err());
            assert!(Color::parse("#gggggg").is_err());
            assert!(Color::parse("#ééé").is_err());
        }

        #[test]
        fn rgb_and_palette_functions() {
            assert_eq!(Color::parse("rgb(1, 2, 3)").unwrap(), Color::Rgb(1, 2, 3));
            assert_eq!(Color::parse("color(208)").unwrap(), Color::Palette(208));
            assert!(Color::parse("rgb(1,2)").is_err());
            assert!(Color::parse("rgb(256,0,0)").is_err());
            assert!(Color::parse("color(300)").is_err());
        }

        #[test]
        fn unknown_name_is_invalid_color_spec() {
            assert_eq!(
                Color::parse("chartreuse"),
                Err(StyleError::InvalidColorSpec("chartreuse".into()))
            );
            assert!(Color::parse("bright_grey").is_err());
        }

        #[test]
        fn display_parses_back() {
            for color in [
                Color::Default,
                Color::Standard(3),
                Color::Standard(12),
                Color::Palette(200),
                Color::Rgb(1, 2, 250),
            ] {
                assert_eq!(Color::parse(&color.to_string()).unwrap(), color);
            }
        }
    }

    mod capability {
        use super::*;

        #[test]
        fn ordered_by_richness() {
            assert!(Capability::None < Capability::Ansi16);
            assert!(Capability::Ansi16 < Capability::Ansi256);
            assert!(Capability::Ansi256 < Capability::TrueColor);
        }

        #[test]
        fn from_str_and_serde() {
            assert_eq!("ansi256".parse::<Capability>().unwrap(), Capability::Ansi256);
            assert_eq!("TrueColor".parse::<Capability>().unwrap(), Capability::TrueColor);
            assert!("rainbow".parse::<Capability>().is_err());

            let cap: Capability = serde_yaml::from_str("ansi16").unwrap();
            assert_eq!(cap, Capability::Ansi16);
        }
    }

    mod resolve {
        use super::*;

        #[test]
        fn none_drops_color() {
            assert_eq!(resolve_color(&Color::Rgb(1, 2, 3), Capability::None), None);
            assert_eq!(resolve_color(&Color::Standard(1), Capability::None), None);
        }

        #[test]
        fn truecolor_passes_rgb_through() {
            assert_eq!(
                resolve_color(&Color::Rgb(12, 34, 56), Capability::TrueColor),
                Some(EmissionColor::Rgb(12, 34, 56))
            );
            assert_eq!(
                resolve_color(&Color::Palette(208), Capability::TrueColor),
                Some(EmissionColor::Ansi256(208))
            );
        }

        #[test]
        fn pure_red_at_ansi16_is_bright_red() {
            assert_eq!(
                resolve_color(&Color::Rgb(255, 0, 0), Capability::Ansi16),
                Some(EmissionColor::Ansi16 {
                    index: 1,
                    bright: true
                })
            );
        }

        #[test]
        fn dark_red_at_ansi16_is_red() {
            assert_eq!(
                resolve_color(&Color::Rgb(150, 10, 10), Capability::Ansi16),
                Some(EmissionColor::Ansi16 {
                    index: 1,
                    bright: false
                })
            );
        }

        #[test]
        fn rgb_at_ansi256_is_nearest_palette_entry() {
            assert_eq!(
                resolve_color(&Color::Rgb(95, 135, 175), Capability::Ansi256),
                Some(EmissionColor::Ansi256(67))
            );
            // tie between 9 and 196 goes to the lower index
            assert_eq!(
                resolve_color(&Color::Rgb(255, 0, 0), Capability::Ansi256),
                Some(EmissionColor::Ansi256(9))
            );
        }

        #[test]
        fn palette_at_ansi16_downgrades() {
            assert_eq!(
                resolve_color(&Color::Palette(196), Capability::Ansi16),
                Some(EmissionColor::Ansi16 {
                    index: 1,
                    bright: true
                })
            );
            assert_eq!(
                resolve_color(&Color::Palette(4), Capability::Ansi16),
                Some(EmissionColor::Ansi16 {
                    index: 4,
                    bright: false
                })
            );
        }

        #[test]
        fn standard_keeps_its_index() {
            assert_eq!(
                resolve_color(&Color::Standard(10), Capability::Ansi256),
                Some(EmissionColor::Ansi16 {
                    index: 2,
                    bright: true
                })
            );
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn resolution_is_deterministic(r: u8, g: u8, b: u8) {
            let color = Color::Rgb(r, g, b);
            for cap in [Capability::Ansi16, Capability::Ansi256, Capability::TrueColor] {
                prop_assert_eq!(resolve_color(&color, cap), resolve_color(&color, cap));
            }
        }

        #[test]
        fn ansi16_choice_is_a_nearest_entry(r: u8, g: u8, b: u8) {
            let target = Rgb(r, g, b);
            let Some(EmissionColor::Ansi16 { index, bright }) =
                resolve_color(&Color::Rgb(r, g, b), Capability::Ansi16)
            else {
                return Err(TestCaseError::fail("expected an ansi16 color"));
            };
            let chosen = (index + if bright { 8 } else { 0 }) as usize;
            let chosen_distance = STANDARD_PALETTE[chosen].distance_sq(target);
            for (i, entry) in STANDARD_PALETTE.iter().enumerate() {
                let d = entry.distance_sq(target);
                prop_assert!(d >= chosen_distance);
                if d == chosen_distance {
                    prop_assert!(i >= chosen);
                }
            }
        }
    }
}
