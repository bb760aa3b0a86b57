use super::Color;

/// Four-corner gradient.
///
/// Hosts render this as a quad with one color per vertex (ImGui's
/// `AddRectFilledMultiColor`). Linear gradients are the special case where two
/// corners share a color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Gradient {
    pub top_left: Color,
    pub top_right: Color,
    pub bottom_right: Color,
    pub bottom_left: Color,
}

impl Gradient {
    #[inline]
    pub const fn new(top_left: Color, top_right: Color, bottom_right: Color, bottom_left: Color) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Left-to-right gradient.
    #[inline]
    pub const fn horizontal(left: Color, right: Color) -> Self {
        Self::new(left, right, right, left)
    }

    /// Top-to-bottom gradient.
    #[inline]
    pub const fn vertical(top: Color, bottom: Color) -> Self {
        Self::new(top, top, bottom, bottom)
    }

    /// Per-vertex colors in `[top_left, top_right, bottom_right, bottom_left]`
    /// order, each scaled by `opacity`.
    #[inline]
    pub fn resolve(&self, opacity: f32) -> [Color; 4] {
        [
            self.top_left.with_opacity(opacity),
            self.top_right.with_opacity(opacity),
            self.bottom_right.with_opacity(opacity),
            self.bottom_left.with_opacity(opacity),
        ]
    }

    /// True when all four corners are fully transparent.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.top_left.is_transparent()
            && self.top_right.is_transparent()
            && self.bottom_right.is_transparent()
            && self.bottom_left.is_transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_shares_top_and_bottom_rows() {
        let g = Gradient::vertical(Color::white(), Color::black());
        assert_eq!(g.top_left, g.top_right);
        assert_eq!(g.bottom_left, g.bottom_right);
    }

    #[test]
    fn resolve_applies_opacity_per_vertex() {
        let g = Gradient::horizontal(Color::white(), Color::black());
        let [tl, tr, br, bl] = g.resolve(0.5);
        assert_eq!(tl.a, 0.5);
        assert_eq!(tr.a, 0.5);
        assert_eq!(br, tr);
        assert_eq!(bl, tl);
    }
}
