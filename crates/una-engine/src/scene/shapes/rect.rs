use crate::coords::{CornerRadii, Rect};
use crate::paint::{Color, Gradient};
use crate::scene::{DrawCmd, DrawList};

/// Solid rectangle payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRectCmd {
    pub rect: Rect,
    pub color: Color,
    pub radii: CornerRadii,
}

/// Rectangle with one color per corner.
///
/// Hosts without rounded multi-color quads ignore rounding here, which is why
/// the payload carries no radii.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientRectCmd {
    pub rect: Rect,
    pub gradient: Gradient,
}

/// Stroked rectangle outline. The stroke is centred on the rect edge.
#[derive(Debug, Clone, PartialEq)]
pub struct RectOutlineCmd {
    pub rect: Rect,
    pub color: Color,
    pub radii: CornerRadii,
    pub thickness: f32,
}

impl DrawList {
    /// Records a solid rectangle.
    #[inline]
    pub fn push_filled_rect(&mut self, rect: Rect, color: Color, radii: CornerRadii) {
        if rect.is_empty() || color.is_transparent() {
            return;
        }
        self.push(DrawCmd::FilledRect(FilledRectCmd { rect, color, radii }));
    }

    /// Records a four-corner gradient rectangle.
    #[inline]
    pub fn push_gradient_rect(&mut self, rect: Rect, gradient: Gradient) {
        if rect.is_empty() || gradient.is_transparent() {
            return;
        }
        self.push(DrawCmd::GradientRect(GradientRectCmd { rect, gradient }));
    }

    /// Records a rectangle outline.
    #[inline]
    pub fn push_rect_outline(&mut self, rect: Rect, color: Color, radii: CornerRadii, thickness: f32) {
        if thickness <= 0.0 || color.is_transparent() {
            return;
        }
        self.push(DrawCmd::RectOutline(RectOutlineCmd { rect, color, radii, thickness }));
    }
}
