use crate::coords::Vec2;

use super::types::{Modifiers, MouseButton};

/// Snapshot of pointer input for one frame.
///
/// Edge flags (`*_clicked`, `double_clicked`) are `true` for exactly the frame
/// on which the host observed the transition. Positions are in screen pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Current cursor position. `None` when the cursor is outside the host window.
    pub mouse_pos: Option<Vec2>,
    /// `true` while the left button is held down.
    pub left_down: bool,
    /// `true` while the right button is held down.
    pub right_down: bool,
    /// Left button released this frame.
    pub left_clicked: bool,
    /// Right button released this frame.
    pub right_clicked: bool,
    /// Host-detected double click of the left button this frame.
    pub double_clicked: bool,
    /// Modifier keys held this frame.
    pub modifiers: Modifiers,
    /// Accumulated wheel delta this frame (positive = scroll down).
    pub scroll_delta: f32,
}

impl FrameInput {
    /// Input with the cursor at `pos` and nothing pressed.
    #[inline]
    pub fn at(pos: Vec2) -> Self {
        Self { mouse_pos: Some(pos), ..Self::default() }
    }

    #[inline]
    pub fn with_click(mut self, button: MouseButton) -> Self {
        match button {
            MouseButton::Left => self.left_clicked = true,
            MouseButton::Right => self.right_clicked = true,
            MouseButton::Middle => {}
        }
        self
    }

    #[inline]
    pub fn with_left_down(mut self) -> Self {
        self.left_down = true;
        self
    }

    #[inline]
    pub fn with_double_click(mut self) -> Self {
        self.double_clicked = true;
        self
    }

    #[inline]
    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self
    }

    #[inline]
    pub fn is_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left_down,
            MouseButton::Right => self.right_down,
            MouseButton::Middle => false,
        }
    }
}
