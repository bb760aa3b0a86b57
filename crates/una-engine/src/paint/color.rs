/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Premultiplication lets an inherited opacity be folded in by scaling all four
/// channels, see [`Color::with_opacity`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a color from a `0xRRGGBBAA` literal (straight alpha).
    #[inline]
    pub fn from_rgba_u32(v: u32) -> Self {
        let [r, g, b, a] = v.to_be_bytes();
        Self::from_srgb_u8(r, g, b, a)
    }

    /// Creates a color from an ImGui-packed `0xAABBGGRR` value (straight alpha).
    #[inline]
    pub fn from_abgr_u32(v: u32) -> Self {
        let [a, b, g, r] = v.to_be_bytes();
        Self::from_srgb_u8(r, g, b, a)
    }

    /// Packs the color as straight-alpha `0xAABBGGRR`, the layout ImGui draw lists expect.
    #[inline]
    pub fn to_abgr_u32(self) -> u32 {
        let (r, g, b, a) = self.to_straight();
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        u32::from_be_bytes([q(a), q(b), q(g), q(r)])
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Scales the color by an opacity factor in `[0, 1]`.
    #[inline]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self { r: self.r * o, g: self.g * o, b: self.b * o, a: self.a * o }
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_literal_premultiplies() {
        let c = Color::from_rgba_u32(0xFF000080);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn abgr_pack_round_trips_opaque_colors() {
        let packed = 0xFF336699;
        assert_eq!(Color::from_abgr_u32(packed).to_abgr_u32(), packed);
    }

    #[test]
    fn with_opacity_scales_every_channel() {
        let c = Color::white().with_opacity(0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.5, 0.5, 0.5));
        assert_eq!(c.to_straight(), (1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn with_opacity_clamps_factor() {
        assert_eq!(Color::white().with_opacity(3.0), Color::white());
        assert!(Color::white().with_opacity(-1.0).is_transparent());
    }
}
