//! Intrinsic width of renderables.

/// The range of widths a renderable can be drawn at.
///
/// `minimum` is the narrowest width that avoids breaking words (or other
/// indivisible content); `maximum` is the width it takes when nothing needs
/// to wrap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Measurement {
    pub minimum: usize,
    pub maximum: usize,
}

impl Measurement {
    pub fn new(minimum: usize, maximum: usize) -> Self {
        Self {
            minimum: minimum.min(maximum),
            maximum,
        }
    }

    /// A measurement that is the same at both ends.
    pub fn exact(width: usize) -> Self {
        Self::new(width, width)
    }

    /// Limits both ends to `max_width`.
    pub fn clamp(self, max_width: usize) -> Self {
        Self::new(self.minimum.min(max_width), self.maximum.min(max_width))
    }

    /// Adds `extra` cells (borders, padding, guides) to both ends.
    pub fn add(self, extra: usize) -> Self {
        Self::new(self.minimum + extra, self.maximum + extra)
    }

    /// The widest of two measurements, end by end.
    pub fn union(self, other: Measurement) -> Self {
        Self::new(
            self.minimum.max(other.minimum),
            self.maximum.max(other.maximum),
        )
    }

    /// Range of the width, the difference of `maximum` and `minimum`.
    pub fn span(&self) -> usize {
        self.maximum - self.minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_minimum_below_maximum() {
        assert_eq!(Measurement::new(10, 4), Measurement::new(4, 4));
    }

    #[test]
    fn clamp_and_add() {
        let m = Measurement::new(5, 30);
        assert_eq!(m.clamp(20), Measurement::new(5, 20));
        assert_eq!(m.clamp(3), Measurement::exact(3));
        assert_eq!(m.add(4), Measurement::new(9, 34));
        assert_eq!(m.span(), 25);
    }

    #[test]
    fn union() {
        let a = Measurement::new(3, 10);
        let b = Measurement::new(6, 8);
        assert_eq!(a.union(b), Measurement::new(6, 10));
    }
}
