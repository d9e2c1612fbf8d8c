//! Deterministic monospace glyph source.
//!
//! `BlockFont` lays text out on a fixed cell grid and draws every visible
//! grapheme as a solid block inset one pixel from its cell. Wide graphemes
//! (CJK, most emoji) span two cells; whitespace and zero-width graphemes draw
//! nothing. Metrics are exact integers, so layouts built on it are stable
//! across platforms, which makes it the reference backend for tests and a
//! usable placeholder on hosts without a rasterizer.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::color::PackedRgba;
use crate::geometry::TextRect;
use crate::glyph::GlyphSource;
use crate::image::Image;

/// Monospace block font with a fixed cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockFont {
    cell_width: u32,
    cell_height: u32,
    ascent: u32,
}

impl BlockFont {
    /// Create a font with the given cell size.
    ///
    /// The ascent (top of cell to baseline) defaults to three quarters of the
    /// cell height, leaving the rest as descender space.
    #[must_use]
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        let cell_width = cell_width.max(1);
        let cell_height = cell_height.max(1);
        Self {
            cell_width,
            cell_height,
            ascent: (cell_height * 3).div_ceil(4),
        }
    }

    /// Override the ascent, clamped to the cell height.
    #[must_use]
    pub fn with_ascent(mut self, ascent: u32) -> Self {
        self.ascent = ascent.min(self.cell_height);
        self
    }

    #[must_use]
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    #[must_use]
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    #[must_use]
    pub const fn ascent(&self) -> u32 {
        self.ascent
    }

    /// Number of cells `text` occupies.
    #[must_use]
    pub fn cells(&self, text: &str) -> u32 {
        text.graphemes(true).map(grapheme_cells).sum()
    }
}

impl Default for BlockFont {
    fn default() -> Self {
        Self::new(6, 11)
    }
}

fn grapheme_cells(grapheme: &str) -> u32 {
    if grapheme.chars().all(char::is_control) {
        return 0;
    }
    u32::try_from(grapheme.width().min(2)).unwrap_or(2)
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

impl GlyphSource for BlockFont {
    fn measure(&self, text: &str) -> TextRect {
        TextRect::new(
            self.cells(text).saturating_mul(self.cell_width),
            self.cell_height,
            self.ascent,
        )
    }

    fn draw(&self, text: &str, color: PackedRgba) -> Image {
        let rect = self.measure(text);
        let mut image = Image::new(rect.width, rect.height);

        // Blocks sit on the baseline and leave a one-pixel gutter on every
        // side when the cell is large enough to afford it.
        let pad_x = u32::from(self.cell_width > 2);
        let top = u32::from(self.ascent > 2);
        let bottom = self.ascent;

        let mut x = 0u32;
        for grapheme in text.graphemes(true) {
            let cells = grapheme_cells(grapheme);
            let advance = cells * self.cell_width;
            if cells > 0 && !is_blank(grapheme) && bottom > top {
                let w = advance.saturating_sub(pad_x * 2);
                image.fill_rect(x + pad_x, top, w, bottom - top, color);
            }
            x += advance;
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_with_cells() {
        let font = BlockFont::new(6, 12);
        assert_eq!(font.measure("HELLO"), TextRect::new(30, 12, 9));
        assert_eq!(font.measure("HELLO WORLD").width, 66);
        assert_eq!(font.measure("").width, 0);
        assert_eq!(font.measure("").height, 12);
    }

    #[test]
    fn wide_graphemes_take_two_cells() {
        let font = BlockFont::new(6, 12);
        assert_eq!(font.cells("你好"), 4);
        assert_eq!(font.measure("a你").width, 18);
    }

    #[test]
    fn zero_sized_cells_are_clamped() {
        let font = BlockFont::new(0, 0);
        assert_eq!(font.cell_width(), 1);
        assert_eq!(font.cell_height(), 1);
    }

    #[test]
    fn draw_matches_measure() {
        let font = BlockFont::new(6, 12);
        let img = font.draw("AB C", PackedRgba::GREEN);
        assert_eq!(img.size(), font.measure("AB C").size());
    }

    #[test]
    fn draw_inks_visible_graphemes_only() {
        let font = BlockFont::new(6, 12);
        let img = font.draw("A B", PackedRgba::GREEN);
        // Inside the first block.
        assert_eq!(img.get_pixel(2, 4), Some(PackedRgba::GREEN));
        // Gutter column of the first cell.
        assert_eq!(img.get_pixel(0, 4), Some(PackedRgba::TRANSPARENT));
        // The space cell stays empty.
        assert_eq!(img.get_pixel(8, 4), Some(PackedRgba::TRANSPARENT));
        // Third cell is inked again.
        assert_eq!(img.get_pixel(14, 4), Some(PackedRgba::GREEN));
        // Descender rows stay empty.
        assert_eq!(img.get_pixel(2, 10), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn whitespace_draws_nothing() {
        let font = BlockFont::default();
        let img = font.draw("   ", PackedRgba::WHITE);
        assert_eq!(img.width(), 18);
        assert!(img.is_transparent());
    }

    #[test]
    fn ascent_is_clamped() {
        let font = BlockFont::new(4, 8).with_ascent(20);
        assert_eq!(font.ascent(), 8);
    }
}
