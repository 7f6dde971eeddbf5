use crate::foundation::error::{InkError, InkResult};

pub use kurbo::{Affine, BezPath, CubicBez, Point, Rect, Vec2};

/// Largest canvas edge the CPU rasterizer can address.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

/// Square pixel canvas dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a square canvas with the given edge length.
    pub fn square(size: u32) -> InkResult<Self> {
        if size == 0 || size > MAX_CANVAS_EDGE {
            return Err(InkError::config(format!(
                "canvas edge must be in 1..={MAX_CANVAS_EDGE}, got {size}"
            )));
        }
        Ok(Self {
            width: size,
            height: size,
        })
    }

    /// Canvas extent as floating-point `(width, height)`.
    pub fn size_f64(self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }

    /// Number of bytes in a tightly packed buffer with `channels` bytes per pixel.
    pub fn byte_len(self, channels: usize) -> usize {
        (self.width as usize) * (self.height as usize) * channels
    }
}

/// Opaque RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as an SVG/CSS `rgb(r,g,b)` color.
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
