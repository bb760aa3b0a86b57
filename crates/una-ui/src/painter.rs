use una_engine::coords::{CornerRadii, Rect, Vec2};
use una_engine::paint::{Color, Gradient};
use una_engine::scene::{DrawList, TextureId};

use crate::node::{NodeBounds, NodeKind};
use crate::style::ComputedStyle;

/// Largest text outline ring, in pixels.
const MAX_OUTLINE_RING: i32 = 4;

/// Emits the primitives of one node into a [`DrawList`].
///
/// Carries the node's effective opacity (own × ancestors) and the scale
/// factor; every style length goes through [`Painter::px`] and every color
/// through [`Painter::tint`].
pub(crate) struct Painter<'a> {
    pub(crate) draw_list: &'a mut DrawList,
    pub scale: f32,
    pub opacity: f32,
    /// Draw the text outline ring.
    pub text_outline: bool,
}

/// Text run of a node, already measured by layout.
pub(crate) struct TextRun<'t> {
    pub text: &'t str,
    pub size: Vec2,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(draw_list: &'a mut DrawList, scale: f32, opacity: f32, text_outline: bool) -> Self {
        Self { draw_list, scale, opacity, text_outline }
    }

    #[inline]
    fn px(&self, v: f32) -> f32 {
        (v * self.scale).max(0.0)
    }

    #[inline]
    fn tint(&self, c: Color) -> Color {
        c.with_opacity(self.opacity)
    }

    // ── node ──────────────────────────────────────────────────────────────

    /// Background, image, border, stroke, kind primitives, then text.
    pub(crate) fn paint_node(
        &mut self,
        b: &NodeBounds,
        s: &ComputedStyle,
        kind: NodeKind,
        texture: Option<TextureId>,
        text: Option<TextRun<'_>>,
    ) {
        let radii = CornerRadii::all(self.px(s.border_radius)).fit(b.padding.size.x, b.padding.size.y);

        self.background(b.padding, s, radii);
        if let Some(texture) = texture {
            self.image(b.padding, s, texture, radii);
        }
        self.border(b.padding, s, radii);
        self.stroke(b.padding, s, radii);
        self.kind(b.content, s, kind);
        if let Some(run) = text {
            self.text(b.content, s, run);
        }
    }

    fn background(&mut self, rect: Rect, s: &ComputedStyle, radii: CornerRadii) {
        if let Some(g) = s.background_gradient {
            let [tl, tr, br, bl] = g.resolve(self.opacity);
            self.draw_list.push_gradient_rect(rect, Gradient::new(tl, tr, br, bl));
        } else if let Some(c) = s.background_color {
            let c = self.tint(c);
            self.draw_list.push_filled_rect(rect, c, radii);
        }
    }

    fn image(&mut self, rect: Rect, s: &ComputedStyle, texture: TextureId, radii: CornerRadii) {
        let target = s.image_inset.scaled(self.scale).non_negative().inset(rect);
        let tint = self.tint(Color::white());
        self.draw_list.push_image(texture, target, s.image_uv.min(), s.image_uv.max(), tint, radii);
    }

    /// One rect outline when every side shares color and width, else one
    /// line per side drawn along the inside edge.
    fn border(&mut self, rect: Rect, s: &ComputedStyle, radii: CornerRadii) {
        let w = s.border_width.scaled(self.scale).non_negative();
        if w.is_zero() {
            return;
        }
        if let Some(c) = s.border_color.uniform().filter(|_| w.is_uniform()) {
            let half = w.top * 0.5;
            let c = self.tint(c);
            self.draw_list.push_rect_outline(rect.shrink(half, half, half, half), c, radii, w.top);
            return;
        }

        let (x1, y1, x2, y2) = (rect.x1(), rect.y1(), rect.x2(), rect.y2());
        let sides = [
            (s.border_color.top, w.top, Vec2::new(x1, y1 + w.top * 0.5), Vec2::new(x2, y1 + w.top * 0.5)),
            (s.border_color.right, w.right, Vec2::new(x2 - w.right * 0.5, y1), Vec2::new(x2 - w.right * 0.5, y2)),
            (s.border_color.bottom, w.bottom, Vec2::new(x1, y2 - w.bottom * 0.5), Vec2::new(x2, y2 - w.bottom * 0.5)),
            (s.border_color.left, w.left, Vec2::new(x1 + w.left * 0.5, y1), Vec2::new(x1 + w.left * 0.5, y2)),
        ];
        for (color, width, from, to) in sides {
            if let Some(c) = color {
                let c = self.tint(c);
                self.draw_list.push_line(from, to, c, width);
            }
        }
    }

    /// Inset outline fully inside the padding box.
    fn stroke(&mut self, rect: Rect, s: &ComputedStyle, radii: CornerRadii) {
        let Some(c) = s.stroke_color else { return };
        let w = self.px(s.stroke_width);
        if w <= 0.0 {
            return;
        }
        let half = w * 0.5;
        let c = self.tint(c);
        self.draw_list.push_rect_outline(rect.shrink(half, half, half, half), c, radii, w);
    }

    fn kind(&mut self, content: Rect, s: &ComputedStyle, kind: NodeKind) {
        match kind {
            NodeKind::Element => {}
            NodeKind::ProgressBar { value, max } => {
                let fraction = if max > 0.0 && value.is_finite() { (value / max).clamp(0.0, 1.0) } else { 0.0 };
                let fill = Rect::from_origin_size(content.origin, Vec2::new(content.size.x * fraction, content.size.y));
                let c = self.tint(s.color);
                let radii = CornerRadii::all(self.px(s.border_radius)).fit(fill.size.x, fill.size.y);
                self.draw_list.push_filled_rect(fill, c, radii);
            }
            NodeKind::Separator => {
                let thickness = self.px(1.0).max(1.0);
                let mid = content.center();
                let (from, to) = if content.size.x >= content.size.y {
                    (Vec2::new(content.x1(), mid.y), Vec2::new(content.x2(), mid.y))
                } else {
                    (Vec2::new(mid.x, content.y1()), Vec2::new(mid.x, content.y2()))
                };
                let c = self.tint(s.color);
                self.draw_list.push_line(from, to, c, thickness);
            }
        }
    }

    // ── text ──────────────────────────────────────────────────────────────

    fn text(&mut self, content: Rect, s: &ComputedStyle, run: TextRun<'_>) {
        let origin = s.text_align.place(content.origin, content.size, run.size) + s.text_offset * self.scale;
        let size = self.px(s.font_size);
        let max_width = s.word_wrap.then_some(content.size.x);

        let ring = (self.px(s.outline_size).round() as i32).min(MAX_OUTLINE_RING);
        let outline = s.outline_color.filter(|_| self.text_outline && ring > 0);
        if let Some(outline) = outline {
            let outline = self.tint(outline);
            for dy in -ring..=ring {
                for dx in -ring..=ring {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let at = origin + Vec2::new(dx as f32, dy as f32);
                    self.draw_list.push_text(run.text, s.font, size, outline, at, max_width);
                }
            }
        }

        let c = self.tint(s.color);
        self.draw_list.push_text(run.text, s.font, size, c, origin, max_width);
    }

    // ── debug ─────────────────────────────────────────────────────────────

    /// Margin box in orange, content box in cyan.
    pub(crate) fn debug_bounds(&mut self, b: &NodeBounds) {
        let margin = Color::from_rgba_u32(0xff9900ff);
        let content = Color::from_rgba_u32(0x00ccffff);
        self.draw_list.push_rect_outline(b.margin, margin, CornerRadii::zero(), 1.0);
        self.draw_list.push_rect_outline(b.content, content, CornerRadii::zero(), 1.0);
    }
}
