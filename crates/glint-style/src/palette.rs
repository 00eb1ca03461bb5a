//! Fixed terminal palettes and nearest-color matching.
//!
//! Two palettes are used for downgrading colors:
//!
//! - [`STANDARD_PALETTE`]: the 16 xterm system colors (indices 0–15)
//! - [`EIGHT_BIT_PALETTE`]: the full xterm 256-color table (system colors,
//!   the 6×6×6 cube at 16–231 and the 24-step grayscale ramp at 232–255)
//!
//! Matching uses plain Euclidean distance in RGB space. Ties resolve to the
//! lower index, so the result for a given input never changes.

use once_cell::sync::Lazy;

/// A simple RGB color triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Squared Euclidean distance to another color.
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.0 as i32 - other.0 as i32;
        let dg = self.1 as i32 - other.1 as i32;
        let db = self.2 as i32 - other.2 as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// The 16 xterm system colors.
pub const STANDARD_PALETTE: [Rgb; 16] = [
    Rgb(0, 0, 0),
    Rgb(128, 0, 0),
    Rgb(0, 128, 0),
    Rgb(128, 128, 0),
    Rgb(0, 0, 128),
    Rgb(128, 0, 128),
    Rgb(0, 128, 128),
    Rgb(192, 192, 192),
    Rgb(128, 128, 128),
    Rgb(255, 0, 0),
    Rgb(0, 255, 0),
    Rgb(255, 255, 0),
    Rgb(0, 0, 255),
    Rgb(255, 0, 255),
    Rgb(0, 255, 255),
    Rgb(255, 255, 255),
];

/// Channel values of the 6×6×6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// The xterm 256-color table.
pub static EIGHT_BIT_PALETTE: Lazy<[Rgb; 256]> = Lazy::new(|| {
    let mut palette = [Rgb(0, 0, 0); 256];
    palette[..16].copy_from_slice(&STANDARD_PALETTE);

    for r in 0..6 {
        for g in 0..6 {
            for b in 0..6 {
                let index = 16 + 36 * r + 6 * g + b;
                palette[index] = Rgb(CUBE_LEVELS[r], CUBE_LEVELS[g], CUBE_LEVELS[b]);
            }
        }
    }

    for i in 0..24 {
        let level = 8 + 10 * i as u8;
        palette[232 + i] = Rgb(level, level, level);
    }

    palette
});

/// Returns the index of the palette entry closest to `color`.
///
/// Only a strictly smaller distance replaces the current best match, so the
/// lowest index wins among equally distant entries.
pub fn nearest(palette: &[Rgb], color: Rgb) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (index, candidate) in palette.iter().enumerate() {
        let distance = candidate.distance_sq(color);
        if distance < best_distance {
            best = index;
            best_distance = distance;
            if distance == 0 {
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_bit_palette_starts_with_standard_colors() {
        assert_eq!(&EIGHT_BIT_PALETTE[..16], &STANDARD_PALETTE[..]);
    }

    #[test]
    fn cube_and_grayscale_entries() {
        assert_eq!(EIGHT_BIT_PALETTE[16], Rgb(0, 0, 0));
        assert_eq!(EIGHT_BIT_PALETTE[67], Rgb(95, 135, 175));
        assert_eq!(EIGHT_BIT_PALETTE[196], Rgb(255, 0, 0));
        assert_eq!(EIGHT_BIT_PALETTE[231], Rgb(255, 255, 255));
        assert_eq!(EIGHT_BIT_PALETTE[232], Rgb(8, 8, 8));
        assert_eq!(EIGHT_BIT_PALETTE[255], Rgb(238, 238, 238));
    }

    #[test]
    fn nearest_exact_match() {
        assert_eq!(nearest(&STANDARD_PALETTE, Rgb(0, 128, 128)), 6);
        assert_eq!(nearest(&EIGHT_BIT_PALETTE[..], Rgb(95, 135, 175)), 67);
    }

    #[test]
    fn nearest_prefers_lower_index_on_tie() {
        // (255, 0, 0) appears at 9 and at 196
        assert_eq!(nearest(&EIGHT_BIT_PALETTE[..], Rgb(255, 0, 0)), 9);
    }

    #[test]
    fn nearest_standard_by_distance() {
        // 72² to maroon versus 55² to red
        assert_eq!(nearest(&STANDARD_PALETTE, Rgb(200, 0, 0)), 9);
        // 28² to maroon versus 99² to red
        assert_eq!(nearest(&STANDARD_PALETTE, Rgb(156, 0, 0)), 1);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Rgb(10, 200, 30);
        let b = Rgb(250, 0, 99);
        assert_eq!(a.distance_sq(b), b.distance_sq(a));
        assert_eq!(a.distance_sq(a), 0);
    }
}
