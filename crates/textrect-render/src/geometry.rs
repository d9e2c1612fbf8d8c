//! Pixel geometry shared by the engine and glyph sources.

use serde::{Deserialize, Serialize};

/// Width and height of a surface or bounding box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Measured rectangle of a rendered text fragment.
///
/// `x`/`y` place the rectangle on a surface (zero for a bare measurement);
/// `baseline` is the distance from the rectangle's top edge to the text
/// baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub baseline: u32,
}

impl TextRect {
    #[must_use]
    pub const fn new(width: u32, height: u32, baseline: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            baseline,
        }
    }

    /// Same rectangle moved to `(x, y)`.
    #[must_use]
    pub const fn at(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bottom edge (exclusive), saturating at `i32::MAX`.
    #[must_use]
    pub fn bottom(self) -> i32 {
        self.y
            .saturating_add(i32::try_from(self.height).unwrap_or(i32::MAX))
    }

    /// Right edge (exclusive), saturating at `i32::MAX`.
    #[must_use]
    pub fn right(self) -> i32 {
        self.x
            .saturating_add(i32::try_from(self.width).unwrap_or(i32::MAX))
    }
}
