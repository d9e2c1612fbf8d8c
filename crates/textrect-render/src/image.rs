//! RGBA8 pixel surface.
//!
//! Images are row-major with one [`PackedRgba`] per pixel. A fresh image is
//! fully transparent. Blits composite source-over and clip to the destination,
//! so callers may place sources partially (or entirely) off-surface.

use crate::color::PackedRgba;
use crate::geometry::Size;

/// Fixed-size RGBA surface.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl Image {
    /// Create a fully transparent image.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, PackedRgba::TRANSPARENT)
    }

    /// Create an image with every pixel set to `color`.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: PackedRgba) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    #[must_use]
    pub fn with_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<PackedRgba> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: PackedRgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Overwrite a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: PackedRgba) {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        if x >= x1 || y >= y1 {
            return;
        }
        let stride = self.width as usize;
        for row in y as usize..y1 as usize {
            let start = row * stride + x as usize;
            let end = row * stride + x1 as usize;
            self.pixels[start..end].fill(color);
        }
    }

    /// Row-major pixel storage.
    #[must_use]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    /// Pixels flattened to RGBA bytes, for handing to a display driver.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// `true` when no pixel carries any alpha.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.pixels.iter().all(|p| p.a() == 0)
    }

    /// Composite `src` over this image with its top-left corner at `(x, y)`.
    ///
    /// The source is clipped to the destination bounds; negative offsets skip
    /// the source's leading rows/columns.
    pub fn blit(&mut self, src: &Image, x: i32, y: i32) {
        let Some(span) = ClipSpan::new(self.size(), src.size(), x, y) else {
            return;
        };

        let dst_stride = self.width as usize;
        let src_stride = src.width as usize;
        for row in 0..span.rows {
            let src_row = (span.src_y + row) * src_stride + span.src_x;
            let dst_row = (span.dst_y + row) * dst_stride + span.dst_x;
            let src_px = &src.pixels[src_row..src_row + span.cols];
            let dst_px = &mut self.pixels[dst_row..dst_row + span.cols];
            for (d, s) in dst_px.iter_mut().zip(src_px) {
                *d = s.over(*d);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            x,
            y,
            rows = span.rows,
            cols = span.cols,
            "blit"
        );
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let opaque = self.pixels.iter().filter(|p| p.a() != 0).count();
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("covered_pixels", &opaque)
            .finish()
    }
}

/// Intersection of a placed source with the destination, in pixel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClipSpan {
    src_x: usize,
    src_y: usize,
    dst_x: usize,
    dst_y: usize,
    cols: usize,
    rows: usize,
}

impl ClipSpan {
    fn new(dst: Size, src: Size, x: i32, y: i32) -> Option<Self> {
        let (src_x, dst_x, cols) = clip_axis(dst.width, src.width, x)?;
        let (src_y, dst_y, rows) = clip_axis(dst.height, src.height, y)?;
        Some(Self {
            src_x,
            src_y,
            dst_x,
            dst_y,
            cols,
            rows,
        })
    }
}

fn clip_axis(dst_len: u32, src_len: u32, offset: i32) -> Option<(usize, usize, usize)> {
    let dst_len = i64::from(dst_len);
    let src_len = i64::from(src_len);
    let offset = i64::from(offset);

    let start = offset.max(0);
    let end = (offset + src_len).min(dst_len);
    if start >= end {
        return None;
    }
    let src_start = start - offset;
    Some((src_start as usize, start as usize, (end - start) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: PackedRgba = PackedRgba::rgb(255, 0, 0);

    #[test]
    fn new_image_is_transparent() {
        let img = Image::new(4, 3);
        assert_eq!(img.size(), Size::new(4, 3));
        assert_eq!(img.pixels().len(), 12);
        assert!(img.is_transparent());
    }

    #[test]
    fn zero_sized_image_has_no_pixels() {
        let img = Image::new(0, 5);
        assert!(img.pixels().is_empty());
        assert!(img.is_transparent());
        assert_eq!(img.get_pixel(0, 0), None);
    }

    #[test]
    fn blit_places_source_at_offset() {
        let mut dst = Image::new(5, 5);
        let src = Image::filled(2, 2, RED);
        dst.blit(&src, 1, 2);
        assert_eq!(dst.get_pixel(1, 2), Some(RED));
        assert_eq!(dst.get_pixel(2, 3), Some(RED));
        assert_eq!(dst.get_pixel(0, 2), Some(PackedRgba::TRANSPARENT));
        assert_eq!(dst.get_pixel(3, 2), Some(PackedRgba::TRANSPARENT));
        assert_eq!(dst.get_pixel(1, 4), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn blit_clips_right_and_bottom() {
        let mut dst = Image::new(3, 3);
        let src = Image::filled(4, 4, RED);
        dst.blit(&src, 2, 2);
        assert_eq!(dst.get_pixel(2, 2), Some(RED));
        let covered = dst.pixels().iter().filter(|p| p.a() != 0).count();
        assert_eq!(covered, 1);
    }

    #[test]
    fn blit_clips_negative_offsets() {
        let mut dst = Image::new(3, 3);
        let mut src = Image::new(3, 3);
        src.set_pixel(2, 2, RED);
        dst.blit(&src, -2, -2);
        assert_eq!(dst.get_pixel(0, 0), Some(RED));
        let covered = dst.pixels().iter().filter(|p| p.a() != 0).count();
        assert_eq!(covered, 1);
    }

    #[test]
    fn blit_fully_outside_is_noop() {
        let mut dst = Image::new(3, 3);
        let src = Image::filled(2, 2, RED);
        dst.blit(&src, 3, 0);
        dst.blit(&src, 0, -2);
        dst.blit(&src, i32::MIN, i32::MAX);
        assert!(dst.is_transparent());
    }

    #[test]
    fn transparent_source_pixels_do_not_erase() {
        let mut dst = Image::filled(2, 1, RED);
        let src = Image::new(2, 1);
        dst.blit(&src, 0, 0);
        assert_eq!(dst.get_pixel(0, 0), Some(RED));
        assert_eq!(dst.get_pixel(1, 0), Some(RED));
    }

    #[test]
    fn fill_rect_clips() {
        let mut img = Image::new(4, 4);
        img.fill_rect(3, 3, 10, 10, RED);
        assert_eq!(img.get_pixel(3, 3), Some(RED));
        assert_eq!(img.pixels().iter().filter(|p| p.a() != 0).count(), 1);
        img.fill_rect(5, 0, 1, 1, RED);
        assert_eq!(img.pixels().iter().filter(|p| p.a() != 0).count(), 1);
    }

    #[test]
    fn rgba_bytes_are_row_major() {
        let mut img = Image::new(2, 1);
        img.set_pixel(1, 0, PackedRgba::rgba(1, 2, 3, 4));
        assert_eq!(img.to_rgba_bytes(), vec![0, 0, 0, 0, 1, 2, 3, 4]);
    }
}
