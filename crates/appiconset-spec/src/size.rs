//! Logical icon sizes in points.

use crate::idiom::Scale;

/// Logical icon size in points. Sizes may be fractional (83.5pt iPad Pro icon).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSize {
    pub width: f64,
    pub height: f64,
}

impl IconSize {
    /// A square size.
    pub const fn square(side: f64) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// A width x height size, for non-square glyphs.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions at the given scale, rounded to whole pixels.
    pub fn pixels(&self, scale: Scale) -> (u32, u32) {
        let factor = scale.factor() as f64;
        (
            (self.width * factor).round() as u32,
            (self.height * factor).round() as u32,
        )
    }
}

/// Formats as `"{width}x{height}"` with no trailing `.0` on whole numbers.
impl std::fmt::Display for IconSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
