//! Packed RGBA colors and source-over compositing.

use serde::{Deserialize, Serialize};

/// 32-bit RGBA color packed as `0xRRGGBBAA`.
///
/// Channels are straight (not premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREEN: Self = Self::rgb(0, 255, 0);

    /// Opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[must_use]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Composite `self` over `dst` (Porter-Duff source-over).
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let sa = self.a() as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a() as u32;
        // out_a = sa + da * (1 - sa), all scaled by 255.
        let dst_weight = da * (255 - sa) / 255;
        let out_a = sa + dst_weight;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let blend = |s: u8, d: u8| -> u8 {
            let v = (s as u32 * sa + d as u32 * dst_weight + out_a / 2) / out_a;
            v.min(255) as u8
        };
        Self::rgba(
            blend(self.r(), dst.r()),
            blend(self.g(), dst.g()),
            blend(self.b(), dst.b()),
            out_a.min(255) as u8,
        )
    }

    /// Channels in RGBA byte order.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip_through_packing() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
        assert_eq!(c.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(PackedRgba::from_bytes([1, 2, 3, 4]), c);
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let src = PackedRgba::rgb(10, 20, 30);
        assert_eq!(src.over(PackedRgba::WHITE), src);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        let dst = PackedRgba::rgb(10, 20, 30);
        assert_eq!(PackedRgba::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn half_alpha_over_transparent_keeps_color() {
        let src = PackedRgba::rgba(200, 100, 50, 128);
        let out = src.over(PackedRgba::TRANSPARENT);
        assert_eq!(out, src);
    }

    #[test]
    fn half_alpha_over_opaque_blends() {
        let src = PackedRgba::rgba(255, 255, 255, 128);
        let out = src.over(PackedRgba::BLACK);
        assert_eq!(out.a(), 255);
        assert!((127..=129).contains(&out.r()), "r = {}", out.r());
    }
}
