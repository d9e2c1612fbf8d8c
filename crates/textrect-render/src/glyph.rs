//! The font capability consumed by the layout engine.

use crate::color::PackedRgba;
use crate::geometry::TextRect;
use crate::image::Image;

/// A font at a fixed pixel size.
///
/// Implementations must be deterministic: the same text always measures to
/// the same rectangle and draws to the same pixels. The engine memoizes both
/// results and relies on that.
pub trait GlyphSource {
    /// Bounding rectangle of `text` rendered in this font, positioned at the
    /// origin.
    fn measure(&self, text: &str) -> TextRect;

    /// Render `text` as a standalone image in `color`.
    ///
    /// The image is expected to match [`GlyphSource::measure`]'s size; pixels
    /// without glyph coverage are transparent.
    fn draw(&self, text: &str, color: PackedRgba) -> Image;
}

impl<T: GlyphSource + ?Sized> GlyphSource for &T {
    fn measure(&self, text: &str) -> TextRect {
        (**self).measure(text)
    }

    fn draw(&self, text: &str, color: PackedRgba) -> Image {
        (**self).draw(text, color)
    }
}

impl<T: GlyphSource + ?Sized> GlyphSource for Box<T> {
    fn measure(&self, text: &str) -> TextRect {
        (**self).measure(text)
    }

    fn draw(&self, text: &str, color: PackedRgba) -> Image {
        (**self).draw(text, color)
    }
}
