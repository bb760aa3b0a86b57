use super::Vec2;

/// Axis-aligned rectangle in screen pixels (top-left origin).
///
/// Every constructor and mutating helper except [`Rect::new`] returns a
/// normalized rect, so `x1 <= x2` and `y1 <= y2` hold afterwards.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Builds a rect from two arbitrary corner points.
    #[inline]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::from_origin_size(min, max - min)
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn x1(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn y1(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn x2(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn y2(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Smallest rect containing both `self` and `other`.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        let a = self.normalized();
        let b = other.normalized();
        Rect::from_corners(a.min().min(b.min()), a.max().max(b.max()))
    }

    #[inline]
    pub fn translate(self, delta: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + delta, self.size).normalized()
    }

    /// Grows the rect outwards by the given amounts per side.
    ///
    /// Negative amounts shrink; the result never has negative size and stays
    /// centred on the collapsed edge when it would cross over.
    #[inline]
    pub fn expand(self, top: f32, right: f32, bottom: f32, left: f32) -> Rect {
        let r = self.normalized();
        let mut x1 = r.x1() - left;
        let mut y1 = r.y1() - top;
        let mut x2 = r.x2() + right;
        let mut y2 = r.y2() + bottom;
        if x2 < x1 {
            let mid = (x1 + x2) * 0.5;
            x1 = mid;
            x2 = mid;
        }
        if y2 < y1 {
            let mid = (y1 + y2) * 0.5;
            y1 = mid;
            y2 = mid;
        }
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Shrinks the rect inwards; the inverse of [`expand`](Self::expand).
    #[inline]
    pub fn shrink(self, top: f32, right: f32, bottom: f32, left: f32) -> Rect {
        self.expand(-top, -right, -bottom, -left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let rect = r(10.0, 0.0, -4.0, 5.0);
        let n = rect.normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    #[test]
    fn from_corners_orders_points() {
        let rect = Rect::from_corners(Vec2::new(10.0, 8.0), Vec2::new(2.0, 4.0));
        assert_eq!(rect, r(2.0, 4.0, 8.0, 4.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    // ── intersect / union ─────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b), Some(r(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_none());
    }

    #[test]
    fn union_covers_both() {
        let u = r(0.0, 0.0, 5.0, 5.0).union(r(10.0, -2.0, 5.0, 5.0));
        assert_eq!(u, r(0.0, -2.0, 15.0, 7.0));
    }

    // ── expand / shrink ───────────────────────────────────────────────────

    #[test]
    fn expand_grows_each_side() {
        let e = r(10.0, 10.0, 10.0, 10.0).expand(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e, r(6.0, 9.0, 16.0, 14.0));
    }

    #[test]
    fn shrink_past_zero_collapses_instead_of_inverting() {
        let s = r(0.0, 0.0, 10.0, 4.0).shrink(5.0, 8.0, 5.0, 8.0);
        assert!(s.x1() <= s.x2());
        assert!(s.y1() <= s.y2());
        assert_eq!(s.size, Vec2::zero());
        assert_eq!(s.center(), Vec2::new(5.0, 2.0));
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
