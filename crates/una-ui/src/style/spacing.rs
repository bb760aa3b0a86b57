use una_engine::coords::Rect;

// ── Spacing ───────────────────────────────────────────────────────────────

/// Insets on all four sides (margin, padding, border width, image inset).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn all(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    #[inline]
    pub fn horizontal(v: f32) -> Self {
        Self { left: v, right: v, ..Self::default() }
    }

    #[inline]
    pub fn vertical(v: f32) -> Self {
        Self { top: v, bottom: v, ..Self::default() }
    }

    /// CSS shorthand: 1 value = all, 2 = vertical horizontal,
    /// 3 = top horizontal bottom, 4 = top right bottom left.
    pub fn from_shorthand(values: &[f32]) -> Option<Self> {
        match *values {
            [a] => Some(Self::all(a)),
            [v, h] => Some(Self::symmetric(v, h)),
            [t, h, b] => Some(Self::new(t, h, b, h)),
            [t, r, b, l] => Some(Self::new(t, r, b, l)),
            _ => None,
        }
    }

    /// Total inset on the horizontal axis.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Total inset on the vertical axis.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }

    #[inline]
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.top * factor, self.right * factor, self.bottom * factor, self.left * factor)
    }

    /// Negative sides clamp to zero.
    #[inline]
    #[must_use]
    pub fn non_negative(self) -> Self {
        Self::new(self.top.max(0.0), self.right.max(0.0), self.bottom.max(0.0), self.left.max(0.0))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// `true` when all four sides are equal.
    #[inline]
    pub fn is_uniform(self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }

    /// Shrinks `rect` by these insets. Never produces a negative size.
    #[inline]
    pub fn inset(self, rect: Rect) -> Rect {
        rect.shrink(self.top, self.right, self.bottom, self.left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_and_v() {
        let e = Spacing::symmetric(4.0, 8.0);
        assert_eq!(e.h(), 16.0); // left + right
        assert_eq!(e.v(), 8.0);  // top + bottom
    }

    #[test]
    fn shorthand_follows_css_order() {
        assert_eq!(Spacing::from_shorthand(&[2.0]), Some(Spacing::all(2.0)));
        assert_eq!(Spacing::from_shorthand(&[1.0, 2.0]), Some(Spacing::new(1.0, 2.0, 1.0, 2.0)));
        assert_eq!(Spacing::from_shorthand(&[1.0, 2.0, 3.0]), Some(Spacing::new(1.0, 2.0, 3.0, 2.0)));
        assert_eq!(Spacing::from_shorthand(&[1.0, 2.0, 3.0, 4.0]), Some(Spacing::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(Spacing::from_shorthand(&[]), None);
        assert_eq!(Spacing::from_shorthand(&[1.0; 5]), None);
    }

    #[test]
    fn inset_asymmetric() {
        let rect = Rect::new(5.0, 5.0, 100.0, 60.0);
        let inner = Spacing::new(4.0, 10.0, 8.0, 6.0).inset(rect);
        assert_eq!(inner.origin.x, 11.0); // 5 + 6
        assert_eq!(inner.origin.y, 9.0);  // 5 + 4
        assert_eq!(inner.size.x, 84.0);   // 100 - 6 - 10
        assert_eq!(inner.size.y, 48.0);   // 60 - 4 - 8
    }

    #[test]
    fn inset_never_goes_negative() {
        let inner = Spacing::all(20.0).inset(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(inner.size.x, 0.0);
        assert_eq!(inner.size.y, 0.0);
    }

    #[test]
    fn scaled_and_uniform() {
        let s = Spacing::all(2.0).scaled(1.5);
        assert_eq!(s, Spacing::all(3.0));
        assert!(s.is_uniform());
        assert!(!Spacing::horizontal(1.0).is_uniform());
    }
}
