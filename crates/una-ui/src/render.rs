//! Per-frame driver.
//!
//! One call to [`UiRoot::render`] runs the whole frame for one root:
//! interaction against the previous frame's geometry, style resolution,
//! layout when something is dirty, the draw walk, and clip publishing.

use una_engine::coords::{Rect, Vec2};
use una_engine::input::FrameInput;
use una_engine::scene::DrawList;

use crate::config::UiConfig;
use crate::context::{IconKey, RenderContext, TextureCache};
use crate::event::NodeEvent;
use crate::layout::compute_layout;
use crate::node::{NodeError, NodeId, NodeTree};
use crate::painter::{Painter, TextRun};

/// Input snapshot consumed by [`UiRoot::render`].
pub type UiInput = FrameInput;

const HOVER: &str = "hover";
const ACTIVE: &str = "active";

// ── UiRoot ────────────────────────────────────────────────────────────────

/// Renders one root node of a [`NodeTree`] every frame and keeps the state
/// that has to survive between frames (hit list, hover set, press).
///
/// ```rust
/// use una_engine::coords::Vec2;
/// use una_engine::scene::DrawList;
/// use una_ui::node::NodeTree;
/// use una_ui::render::{UiInput, UiRoot};
/// use una_ui::style::{Size, Style};
///
/// let mut tree = NodeTree::new();
/// let root = tree.build().style(Style::new().size(Size::new(40.0, 20.0))).finish().unwrap();
///
/// let mut ui = UiRoot::default();
/// let mut dl = DrawList::new();
/// ui.render(&mut tree, root, &mut dl, Vec2::new(10.0, 10.0), &UiInput::default()).unwrap();
/// assert_eq!(tree.bounds(root).unwrap().padding.origin, Vec2::new(10.0, 10.0));
/// ```
pub struct UiRoot {
    pub config: UiConfig,
    pub context: RenderContext,
    interaction: Interaction,
    last_scale: Option<f32>,
}

impl UiRoot {
    pub fn new(config: UiConfig, context: RenderContext) -> Self {
        Self { config, context, interaction: Interaction::default(), last_scale: None }
    }

    /// Runs one frame for `root`, appending its primitives to `draw_list`
    /// with the root's margin box at `origin`.
    ///
    /// Returns [`NodeError::Disposed`] if `root` is gone, including when a
    /// listener disposes it mid-frame.
    pub fn render(
        &mut self,
        tree: &mut NodeTree,
        root: NodeId,
        draw_list: &mut DrawList,
        origin: Vec2,
        input: &UiInput,
    ) -> Result<(), NodeError> {
        tree.get(root)?;

        let scale = self.config.scale;
        if self.last_scale != Some(scale) {
            log::debug!("scale {:?} -> {scale}; reflowing {root:?}", self.last_scale);
            tree.reflow(root)?;
            self.last_scale = Some(scale);
        }

        // ── interaction ───────────────────────────────────────────────────
        self.interact(tree, root, input);
        tree.get(root)?;

        // ── style + layout ────────────────────────────────────────────────
        tree.resolve_styles(root)?;
        if tree.needs_layout(root) {
            emit_subtree(tree, root, NodeEvent::BeforeReflow);
            tree.resolve_styles(root)?;
        }
        compute_layout(tree, root, origin, self.context.text.as_ref(), scale)?;

        emit_subtree(tree, root, NodeEvent::BeforeDraw);
        tree.resolve_styles(root)?;
        if tree.needs_layout(root) {
            compute_layout(tree, root, origin, self.context.text.as_ref(), scale)?;
        }

        // ── draw ──────────────────────────────────────────────────────────
        self.interaction.hits.clear();
        let mut pass = DrawPass {
            tree,
            draw_list,
            textures: &mut self.context.textures,
            hits: &mut self.interaction.hits,
            config: self.config,
        };
        pass.node(root, 1.0);

        self.publish_clip(tree, root);
        Ok(())
    }

    /// Upserts the root's margin box under its clip key, or drops the entry
    /// while the root is hidden. The entry is held by a guard stored on the
    /// node, so disposing or re-keying the node removes it without another
    /// frame.
    fn publish_clip(&self, tree: &mut NodeTree, root: NodeId) {
        let Ok(data) = tree.get_mut(root) else { return };
        let Some(key) = data.clip_key.as_deref() else { return };
        let s = &data.computed;
        if !(s.is_visible && s.opacity > 0.0) {
            data.clip_region = None;
            return;
        }
        let rect = data.bounds.margin;
        if let Some(region) = data.clip_region.as_ref().filter(|r| r.is_in(&self.context.clips)) {
            region.update(rect);
            return;
        }
        data.clip_region = Some(self.context.clips.scoped(key, rect));
    }

    // ── interaction ───────────────────────────────────────────────────────

    fn interact(&mut self, tree: &mut NodeTree, root: NodeId, input: &UiInput) {
        let under: Vec<NodeId> = match input.mouse_pos {
            Some(p) => self
                .interaction
                .hits
                .iter()
                .filter(|(id, r)| r.contains(p) && tree.contains(*id))
                .map(|(id, _)| *id)
                .collect(),
            None => Vec::new(),
        };

        self.update_hover(tree, &under);

        let topmost = under.last().copied();
        let pressed_now = input.left_down && !self.interaction.left_was_down;
        self.interaction.left_was_down = input.left_down;

        if pressed_now {
            self.interaction.press = topmost.map(|node| {
                let _ = tree.set_tag(node, ACTIVE, true);
                Press { node, start: input.mouse_pos.unwrap_or_default(), dragging: false, moved: false }
            });
        }

        let mut suppress_click = false;
        if input.left_down {
            if let (Some(pos), Some(press)) = (input.mouse_pos, self.interaction.press.as_mut()) {
                drag(tree, press, pos, &under, self.config.drag_threshold * self.config.scale);
            }
        } else if let Some(press) = self.interaction.press.take() {
            let _ = tree.set_tag(press.node, ACTIVE, false);
            if press.moved {
                suppress_click = true;
                if let Some(parent) = tree.parent(press.node) {
                    tree.emit(parent, NodeEvent::Sorted);
                }
            }
        }

        if let Some(top) = topmost {
            if input.left_clicked && !suppress_click {
                bubble(tree, root, top, NodeEvent::Click);
            }
            if input.right_clicked {
                bubble(tree, root, top, NodeEvent::RightClick);
            }
            if input.double_clicked {
                bubble(tree, root, top, NodeEvent::DoubleClick);
            }
            if input.scroll_delta != 0.0 {
                let step = input.scroll_delta * self.config.scroll_step * self.config.scale;
                scroll(tree, root, top, step);
            }
        }
    }

    /// Every node under the cursor is hovered, not only the topmost one.
    fn update_hover(&mut self, tree: &mut NodeTree, under: &[NodeId]) {
        let previous = std::mem::take(&mut self.interaction.hovered);
        for &left in previous.iter().filter(|n| !under.contains(n)) {
            if tree.contains(left) {
                let _ = tree.set_tag(left, HOVER, false);
                tree.emit(left, NodeEvent::MouseLeave);
            }
        }
        for &entered in under.iter().filter(|n| !previous.contains(n)) {
            if tree.contains(entered) {
                let _ = tree.set_tag(entered, HOVER, true);
                tree.emit(entered, NodeEvent::MouseEnter);
            }
        }
        self.interaction.hovered = under.iter().copied().filter(|&n| tree.contains(n)).collect();
    }
}

impl Default for UiRoot {
    fn default() -> Self {
        Self::new(UiConfig::default(), RenderContext::default())
    }
}

// ── Interaction state ─────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Interaction {
    /// Visible padding boxes of the last frame in paint order, clipped.
    hits: Vec<(NodeId, Rect)>,
    hovered: Vec<NodeId>,
    press: Option<Press>,
    left_was_down: bool,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    node: NodeId,
    start: Vec2,
    dragging: bool,
    /// At least one reorder happened during this press.
    moved: bool,
}

/// Drag-sort: once the pointer travels past `threshold`, moving over a
/// sibling gives the pressed node that sibling's slot.
fn drag(tree: &mut NodeTree, press: &mut Press, pos: Vec2, under: &[NodeId], threshold: f32) {
    let Some(parent) = tree.parent(press.node) else { return };
    if !tree.is_sortable(parent) {
        return;
    }
    if !press.dragging {
        let d = pos - press.start;
        if (d.x * d.x + d.y * d.y).sqrt() <= threshold {
            return;
        }
        press.dragging = true;
        log::debug!("drag-sort of {:?} started", press.node);
    }

    let Some(target) = under.iter().rev().copied().find(|&n| n != press.node && tree.parent(n) == Some(parent))
    else {
        return;
    };

    let mut order = tree.children(parent);
    let Some(to) = order.iter().position(|&n| n == target) else { return };
    order.retain(|&n| n != press.node);
    order.insert(to.min(order.len()), press.node);
    for (i, &n) in order.iter().enumerate() {
        let _ = tree.set_sort_index(n, i as i32);
    }
    press.moved = true;
}

/// Emits `event` on `from` and each ancestor up to and including `root`.
fn bubble(tree: &mut NodeTree, root: NodeId, from: NodeId, event: NodeEvent) {
    let mut cur = Some(from);
    while let Some(id) = cur {
        let next = tree.parent(id);
        tree.emit(id, event);
        if id == root {
            break;
        }
        cur = next;
    }
}

/// Scrolls the nearest clipping container at or above `from`.
fn scroll(tree: &mut NodeTree, root: NodeId, from: NodeId, step: f32) {
    let mut cur = Some(from);
    while let Some(id) = cur {
        if tree.computed_style(id).is_some_and(|s| !s.overflow) {
            let next = tree.scroll(id) + Vec2::new(0.0, step);
            let _ = tree.set_scroll(id, next);
            return;
        }
        if id == root {
            return;
        }
        cur = tree.parent(id);
    }
}

fn emit_subtree(tree: &mut NodeTree, root: NodeId, event: NodeEvent) {
    for n in tree.subtree(root) {
        tree.emit(n, event);
    }
}

// ── Draw ──────────────────────────────────────────────────────────────────

struct DrawPass<'a> {
    tree: &'a NodeTree,
    draw_list: &'a mut DrawList,
    textures: &'a mut TextureCache,
    hits: &'a mut Vec<(NodeId, Rect)>,
    config: UiConfig,
}

impl DrawPass<'_> {
    fn node(&mut self, id: NodeId, parent_opacity: f32) {
        let Ok(data) = self.tree.get(id) else { return };
        let s = &data.computed;
        let opacity = parent_opacity * s.opacity;
        if !s.is_visible || opacity <= 0.0 {
            return;
        }

        let b = data.bounds;
        let hit = match self.draw_list.current_clip() {
            Some(clip) => b.padding.intersect(clip),
            None => Some(b.padding),
        };
        if let Some(hit) = hit {
            self.hits.push((id, hit));
        }

        let texture = s.image.or_else(|| {
            s.icon_id.and_then(|icon_id| self.textures.resolve(IconKey { icon_id, grayscale: s.image_grayscale }))
        });
        let text = data.text().map(|text| TextRun { text, size: data.text.size });
        Painter::new(self.draw_list, self.config.scale, opacity, self.config.text_outline)
            .paint_node(&b, s, data.kind, texture, text);

        let clip = !s.overflow;
        if clip {
            self.draw_list.push_clip(b.padding);
        }
        for child in self.tree.children(id) {
            self.node(child, opacity);
        }
        if clip {
            self.draw_list.pop_clip();
        }

        if self.config.debug_bounds {
            Painter::new(self.draw_list, self.config.scale, 1.0, false).debug_bounds(&b);
        }
    }
}
