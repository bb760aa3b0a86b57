use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Straight line payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color,
    pub thickness: f32,
}

impl DrawList {
    /// Records a straight line.
    #[inline]
    pub fn push_line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32) {
        if thickness <= 0.0 || color.is_transparent() {
            return;
        }
        self.push(DrawCmd::Line(LineCmd { from, to, color, thickness }));
    }
}
