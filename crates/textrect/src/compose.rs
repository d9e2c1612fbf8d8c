//! Prefix-memoized line composition.
//!
//! A composed image for lines `[l0, .., ln]` is the image for `[l0, .., ln-1]`
//! with `ln` blitted on top. Every prefix is cached under its exact ordered
//! `(text, offset)` content, so:
//!
//! - an unchanged layout is a single cache hit returning a shared image;
//! - a layout that grew by one line (someone typing into a wrapped field)
//!   copies the cached prefix and blits one line;
//! - an evicted prefix is rebuilt from the longest prefix still cached.
//!
//! Composition runs as a loop over the missing suffix rather than recursing,
//! so arbitrarily long layouts cannot exhaust the stack.

use std::sync::Arc;

use textrect_render::{GlyphSource, Image, PackedRgba, Size};

use crate::cache::{BoundedCache, CacheStats};
use crate::wrap::PlacedLine;

/// Draws placed lines into box-sized images, reusing cached prefixes.
pub struct Composer<F> {
    font: Arc<F>,
    size: Size,
    color: PackedRgba,
    blank: Arc<Image>,
    cache: BoundedCache<Vec<PlacedLine>, Arc<Image>>,
}

impl<F: GlyphSource> Composer<F> {
    #[must_use]
    pub fn new(font: Arc<F>, size: Size, color: PackedRgba, capacity: usize) -> Self {
        Self {
            font,
            size,
            color,
            blank: Arc::new(Image::with_size(size)),
            cache: BoundedCache::new(capacity),
        }
    }

    /// Compose `lines` into one image of the composer's size.
    ///
    /// Lines are drawn at `(0, offset)` in order; later lines paint over
    /// earlier ones where they overlap.
    pub fn compose(&mut self, lines: &[PlacedLine]) -> Arc<Image> {
        if lines.is_empty() {
            return Arc::clone(&self.blank);
        }
        if let Some(hit) = self.cache.get(lines) {
            return Arc::clone(hit);
        }

        let (reused, base) = self.longest_cached_prefix(lines);
        tracing::debug!(
            lines = lines.len(),
            reused,
            blitted = lines.len() - reused,
            "composing suffix"
        );

        let mut image = base;
        for end in reused + 1..=lines.len() {
            let mut next = Image::clone(&image);
            self.blit_line(&mut next, &lines[end - 1]);
            let next = Arc::new(next);
            self.cache.insert(lines[..end].to_vec(), Arc::clone(&next));
            image = next;
        }
        image
    }

    /// Longest proper prefix of `lines` with a cached image, falling back to
    /// the blank image (the empty prefix).
    fn longest_cached_prefix(&mut self, lines: &[PlacedLine]) -> (usize, Arc<Image>) {
        for len in (1..lines.len()).rev() {
            let prefix = &lines[..len];
            if self.cache.contains(prefix)
                && let Some(image) = self.cache.get(prefix)
            {
                return (len, Arc::clone(image));
            }
        }
        (0, Arc::clone(&self.blank))
    }

    fn blit_line(&self, target: &mut Image, line: &PlacedLine) {
        if line.text.is_empty() {
            return;
        }
        let glyphs = self.font.draw(&line.text, self.color);
        let y = i32::try_from(line.offset).unwrap_or(i32::MAX);
        target.blit(&glyphs, 0, y);
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn color(&self) -> PackedRgba {
        self.color
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<F> std::fmt::Debug for Composer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("size", &self.size)
            .field("color", &self.color)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingFont;

    const BOX: Size = Size::new(64, 40);

    fn composer(font: &Arc<CountingFont>, capacity: usize) -> Composer<CountingFont> {
        Composer::new(Arc::clone(font), BOX, PackedRgba::GREEN, capacity)
    }

    fn lines(texts: &[&str]) -> Vec<PlacedLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| PlacedLine::new(*t, (i as u32) * 13))
            .collect()
    }

    #[test]
    fn empty_sequence_is_blank_box() {
        let font = Arc::new(CountingFont::new(6, 12));
        let mut composer = composer(&font, 8);
        let image = composer.compose(&[]);
        assert_eq!(image.size(), BOX);
        assert!(image.is_transparent());
        assert_eq!(font.draw_calls(), 0);
    }

    #[test]
    fn identical_sequence_hits_the_cache() {
        let font = Arc::new(CountingFont::new(6, 12));
        let mut composer = composer(&font, 8);
        let seq = lines(&["AB", "CD"]);

        let first = composer.compose(&seq);
        let draws = font.draw_calls();
        let second = composer.compose(&seq);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(font.draw_calls(), draws);
        assert_eq!(composer.stats().hits, 1);
    }

    #[test]
    fn growing_by_one_line_blits_once() {
        let font = Arc::new(CountingFont::new(6, 12));
        let mut composer = composer(&font, 8);

        composer.compose(&lines(&["AB", "CD"]));
        assert_eq!(font.draw_calls(), 2);

        composer.compose(&lines(&["AB", "CD", "EF"]));
        assert_eq!(font.draw_calls(), 3);
    }

    #[test]
    fn changed_last_line_reuses_shared_prefix() {
        let font = Arc::new(CountingFont::new(6, 12));
        let mut composer = composer(&font, 8);

        composer.compose(&lines(&["AB", "CD"]));
        composer.compose(&lines(&["AB", "CX"]));
        assert_eq!(font.draw_calls(), 3);
    }

    #[test]
    fn incremental_matches_cold_composition() {
        let font = Arc::new(CountingFont::new(6, 12));
        let mut warm = composer(&font, 8);
        warm.compose(&lines(&["AB"]));
        warm.compose(&lines(&["AB", "C D"]));
        let incremental = warm.compose(&lines(&["AB", "C D", "EFG"]));

        let mut cold = composer(&font, 8);
        let direct = cold.compose(&lines(&["AB", "C D", "EFG"]));

        assert_eq!(*incremental, *direct);
    }

    #[test]
    fn lines_land_at_their_offsets() {
        let font = Arc::new(CountingFont::new(6, 12));
        let mut composer = composer(&font, 8);
        let image = composer.compose(&lines(&["A", "", "B"]));

        // Inside the first block (row 4), the blank line's band, and the third
        // line's block 26 rows down.
        assert_eq!(image.get_pixel(2, 4), Some(PackedRgba::GREEN));
        assert_eq!(image.get_pixel(2, 17), Some(PackedRgba::TRANSPARENT));
        assert_eq!(image.get_pixel(2, 30), Some(PackedRgba::GREEN));
        assert_eq!(image.get_pixel(8, 4), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn eviction_rebuilds_from_longest_surviving_prefix() {
        let font = Arc::new(CountingFont::new(6, 12));
        // Room for exactly the three prefixes of one 3-line sequence.
        let mut composer = composer(&font, 3);
        let abc = lines(&["A", "B", "C"]);
        let reference = composer.compose(&abc);

        // Displace everything with an unrelated 3-line sequence.
        composer.compose(&lines(&["X", "Y", "Z"]));
        assert!(composer.stats().evictions >= 3);

        let draws = font.draw_calls();
        let rebuilt = composer.compose(&abc);
        assert_eq!(font.draw_calls(), draws + 3);
        assert_eq!(*rebuilt, *reference);
    }

    #[test]
    fn offsets_are_part_of_the_key() {
        let font = Arc::new(CountingFont::new(6, 12));
        let mut composer = composer(&font, 8);
        let a = composer.compose(&[PlacedLine::new("A", 0)]);
        let b = composer.compose(&[PlacedLine::new("A", 13)]);
        assert_ne!(*a, *b);
    }
}
