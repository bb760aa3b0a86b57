use crate::coords::Rect;

use super::DrawCmd;

/// A single draw item: command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Scissor rect in screen pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
}

/// One level of the clip stack.
#[derive(Debug, Copy, Clone, PartialEq)]
enum ClipEntry {
    /// Already intersected with the nearest enclosing `Rect` entry.
    Rect(Rect),
    /// Escapes all parent clips until popped.
    FullScreen,
}

/// Recorded draw stream for a frame.
///
/// Items are kept in insertion order, which is paint order (back-to-front):
/// the render pass already walks the node tree in sort order.
///
/// # Clipping
///
/// Use [`push_clip`] / [`pop_clip`] to scope draw commands to a scissor rect.
/// Clips are intersected with the current parent, so nested overflow
/// containers only ever narrow the scissor. [`push_fullscreen_clip`] lifts
/// all clipping until the matching pop.
///
/// ```ignore
/// draw_list.push_clip(scroll_container_rect);
/// // ... push children ...
/// draw_list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,

    clip_stack: Vec<ClipEntry>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.clip_stack.clear();
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command. The item inherits the current clip rect.
    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem { cmd, clip_rect: self.current_clip() });
    }

    /// The effective clip rect for the next pushed command.
    #[inline]
    pub fn current_clip(&self) -> Option<Rect> {
        match self.clip_stack.last() {
            None | Some(ClipEntry::FullScreen) => None,
            Some(ClipEntry::Rect(r)) => Some(*r),
        }
    }

    /// Current nesting depth of the clip stack.
    #[inline]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Begins a scissor region. All draw commands pushed until [`pop_clip`] are clipped
    /// to `rect` (intersected with any parent clip rect).
    ///
    /// Calls must be balanced with [`pop_clip`].
    #[inline]
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.current_clip() {
            None => rect.normalized(),
            // Intersect with the parent; if no overlap, produce a zero-area rect so
            // the host skips those draw calls.
            Some(parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(ClipEntry::Rect(effective));
    }

    /// Begins a region with no clipping at all, regardless of enclosing clips.
    #[inline]
    pub fn push_fullscreen_clip(&mut self) {
        self.clip_stack.push(ClipEntry::FullScreen);
    }

    /// Ends the most recent region started by [`push_clip`] or [`push_fullscreen_clip`].
    ///
    /// An unbalanced pop is logged and ignored.
    #[inline]
    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("DrawList::pop_clip called without matching push_clip");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Vec2};
    use crate::paint::Color;

    fn clip_of_last(list: &DrawList) -> Option<Rect> {
        list.items().last().and_then(|i| i.clip_rect)
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut list = DrawList::new();
        list.push_filled_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white(), CornerRadii::zero());
        list.push_line(Vec2::zero(), Vec2::new(4.0, 0.0), Color::white(), 1.0);
        assert!(matches!(list.items()[0].cmd, DrawCmd::FilledRect(_)));
        assert!(matches!(list.items()[1].cmd, DrawCmd::Line(_)));
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.push_filled_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::white(), CornerRadii::zero());
        assert_eq!(clip_of_last(&list), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        list.pop_clip();
        list.pop_clip();
        assert_eq!(list.clip_depth(), 0);
    }

    #[test]
    fn disjoint_clip_becomes_zero_area() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        assert_eq!(list.current_clip(), Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn fullscreen_clip_escapes_parent() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_fullscreen_clip();
        assert_eq!(list.current_clip(), None);
        list.pop_clip();
        assert_eq!(list.current_clip(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn unbalanced_pop_is_ignored() {
        let mut list = DrawList::new();
        list.pop_clip();
        assert_eq!(list.clip_depth(), 0);
    }

    #[test]
    fn transparent_and_empty_primitives_are_skipped() {
        let mut list = DrawList::new();
        list.push_filled_rect(Rect::new(0.0, 0.0, 0.0, 5.0), Color::white(), CornerRadii::zero());
        list.push_filled_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::transparent(), CornerRadii::zero());
        assert!(list.is_empty());
    }
}
