use una_engine::coords::Vec2;
use una_engine::paint::Color;

// ── Size ──────────────────────────────────────────────────────────────────

/// Padding-box size of a node. `0` on an axis means *auto* on that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Auto on both axes.
    #[inline]
    pub const fn auto() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

// ── Flow ──────────────────────────────────────────────────────────────────

/// Axis along which a node stacks its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    #[default]
    Horizontal,
    Vertical,
    /// Children overlap, each placed at its own anchor.
    None,
}

impl Flow {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "horizontal" => Some(Flow::Horizontal),
            "vertical" => Some(Flow::Vertical),
            "none" => Some(Flow::None),
            _ => None,
        }
    }
}

// ── Anchor ────────────────────────────────────────────────────────────────

/// Position along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Start,
    Center,
    End,
}

impl Align {
    /// Offset of an item of `extent` placed inside `[start, start + avail]`.
    #[inline]
    pub fn place(self, start: f32, avail: f32, extent: f32) -> f32 {
        match self {
            Align::Start => start,
            Align::Center => start + (avail - extent) * 0.5,
            Align::End => start + avail - extent,
        }
    }
}

/// One of nine reference points inside a box.
///
/// `None` behaves as `TopLeft` for layout but keeps "unset by the author"
/// distinguishable from an explicit top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    #[default]
    None,
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Parses the kebab-case form used in stylesheets, e.g. `middle-left`.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "none" => Anchor::None,
            "top-left" => Anchor::TopLeft,
            "top-center" => Anchor::TopCenter,
            "top-right" => Anchor::TopRight,
            "middle-left" => Anchor::MiddleLeft,
            "middle-center" => Anchor::MiddleCenter,
            "middle-right" => Anchor::MiddleRight,
            "bottom-left" => Anchor::BottomLeft,
            "bottom-center" => Anchor::BottomCenter,
            "bottom-right" => Anchor::BottomRight,
            _ => return None,
        })
    }

    /// `None` folded into `TopLeft`; children are grouped by this value.
    #[inline]
    pub fn resolved(self) -> Self {
        match self {
            Anchor::None => Anchor::TopLeft,
            a => a,
        }
    }

    /// Alignment on the x axis.
    #[inline]
    pub fn horizontal(self) -> Align {
        match self.resolved() {
            Anchor::TopCenter | Anchor::MiddleCenter | Anchor::BottomCenter => Align::Center,
            Anchor::TopRight | Anchor::MiddleRight | Anchor::BottomRight => Align::End,
            _ => Align::Start,
        }
    }

    /// Alignment on the y axis.
    #[inline]
    pub fn vertical(self) -> Align {
        match self.resolved() {
            Anchor::MiddleLeft | Anchor::MiddleCenter | Anchor::MiddleRight => Align::Center,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight => Align::End,
            _ => Align::Start,
        }
    }

    /// Top-left corner of a box of `size` anchored inside `[origin, origin + avail]`.
    #[inline]
    pub fn place(self, origin: Vec2, avail: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            self.horizontal().place(origin.x, avail.x, size.x),
            self.vertical().place(origin.y, avail.y, size.y),
        )
    }
}

// ── BorderColor ───────────────────────────────────────────────────────────

/// Per-side border colors. An unset side draws nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BorderColor {
    pub top: Option<Color>,
    pub right: Option<Color>,
    pub bottom: Option<Color>,
    pub left: Option<Color>,
}

impl BorderColor {
    #[inline]
    pub fn all(color: Color) -> Self {
        Self { top: Some(color), right: Some(color), bottom: Some(color), left: Some(color) }
    }

    /// CSS shorthand order, like [`Spacing::from_shorthand`](super::Spacing::from_shorthand).
    pub fn from_shorthand(colors: &[Color]) -> Option<Self> {
        let side = |c: Color| Some(c);
        match *colors {
            [a] => Some(Self::all(a)),
            [v, h] => Some(Self { top: side(v), right: side(h), bottom: side(v), left: side(h) }),
            [t, h, b] => Some(Self { top: side(t), right: side(h), bottom: side(b), left: side(h) }),
            [t, r, b, l] => Some(Self { top: side(t), right: side(r), bottom: side(b), left: side(l) }),
            _ => None,
        }
    }

    /// The shared color when all four sides are set and equal.
    #[inline]
    pub fn uniform(self) -> Option<Color> {
        let c = self.top?;
        (self.right == Some(c) && self.bottom == Some(c) && self.left == Some(c)).then_some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_anchor_behaves_as_top_left() {
        assert_eq!(Anchor::None.horizontal(), Align::Start);
        assert_eq!(Anchor::None.vertical(), Align::Start);
        assert_eq!(Anchor::None.resolved(), Anchor::TopLeft);
    }

    #[test]
    fn anchor_components() {
        assert_eq!(Anchor::MiddleRight.horizontal(), Align::End);
        assert_eq!(Anchor::MiddleRight.vertical(), Align::Center);
        assert_eq!(Anchor::BottomCenter.horizontal(), Align::Center);
        assert_eq!(Anchor::BottomCenter.vertical(), Align::End);
    }

    #[test]
    fn anchor_place_centers() {
        let p = Anchor::MiddleCenter.place(Vec2::new(10.0, 10.0), Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(p, Vec2::new(50.0, 30.0));
    }

    #[test]
    fn names_parse() {
        assert_eq!(Anchor::from_name("bottom-right"), Some(Anchor::BottomRight));
        assert_eq!(Anchor::from_name("left"), None);
        assert_eq!(Flow::from_name("vertical"), Some(Flow::Vertical));
        assert_eq!(Flow::from_name("column"), None);
    }

    #[test]
    fn border_uniform_requires_all_sides() {
        let red = Color::from_rgba_u32(0xff0000ff);
        assert_eq!(BorderColor::all(red).uniform(), Some(red));
        let partial = BorderColor { top: Some(red), ..BorderColor::default() };
        assert_eq!(partial.uniform(), None);
    }
}
