use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Opaque handle to a texture owned by the host.
///
/// The engine never loads or frees textures; it only forwards handles the host
/// resolved beforehand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u64);

/// Image blit payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub texture: TextureId,
    pub rect: Rect,
    /// Top-left texture coordinate in `[0, 1]`.
    pub uv0: Vec2,
    /// Bottom-right texture coordinate in `[0, 1]`.
    pub uv1: Vec2,
    /// Multiplied into the texel color; carries opacity.
    pub tint: Color,
    pub radii: CornerRadii,
}

impl DrawList {
    /// Records an image blit of the `[uv0, uv1]` sub-rect of `texture`.
    #[inline]
    pub fn push_image(
        &mut self,
        texture: TextureId,
        rect: Rect,
        uv0: Vec2,
        uv1: Vec2,
        tint: Color,
        radii: CornerRadii,
    ) {
        if rect.is_empty() || tint.is_transparent() {
            return;
        }
        self.push(DrawCmd::Image(ImageCmd { texture, rect, uv0, uv1, tint, radii }));
    }
}
