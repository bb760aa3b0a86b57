//! Two-pass box layout.
//!
//! **Measure** runs bottom-up and stores every node's padding-box size from
//! its explicit size, its children's stacked extent and its text. **Arrange**
//! runs top-down, resolves fill/stretch against the parent's content box,
//! places anchor groups along the flow axis and writes absolute
//! [`NodeBounds`](crate::node::NodeBounds).
//!
//! All lengths from the style are multiplied by the scale factor before use.

use una_engine::coords::{Rect, Vec2};
use una_engine::text::TextMeasure;

use crate::node::{NodeError, NodeId, NodeTree, TextCache};
use crate::style::{Align, Anchor, ComputedStyle, Flow, Spacing};

/// Lays out `root`'s subtree with its margin box at `origin`.
///
/// Does nothing but translate the existing bounds when no node under `root`
/// is layout-dirty. Text measurements are cached per node; invalidate them
/// with [`NodeTree::reflow`] when `scale` changes between calls.
pub fn compute_layout(
    tree: &mut NodeTree,
    root: NodeId,
    origin: Vec2,
    measure: &dyn TextMeasure,
    scale: f32,
) -> Result<(), NodeError> {
    let data = tree.get(root)?;
    if !data.dirty.layout {
        let delta = origin - data.bounds.margin.origin;
        if delta != Vec2::zero() {
            tree.translate_subtree(root, delta);
        }
        return Ok(());
    }

    let mut pass = LayoutPass { tree, measurer: measure, scale: scale.max(0.0), nodes: 0 };
    let outer = pass.measure(root, None);
    pass.arrange(root, Rect::from_origin_size(origin, outer));
    log::trace!("layout under {root:?}: {} nodes at scale {scale}", pass.nodes);
    Ok(())
}

// ── Metrics ───────────────────────────────────────────────────────────────

/// Layout-relevant style of one node, scaled and clamped.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    size: Vec2,
    margin: Spacing,
    padding: Spacing,
    gap: f32,
    flow: Flow,
    anchor: Anchor,
    stretch: bool,
    overflow: bool,
    visible: bool,
    word_wrap: bool,
}

impl Metrics {
    fn of(c: &ComputedStyle, k: f32) -> Self {
        Self {
            size: (c.size.to_vec2() * k).non_negative(),
            margin: c.margin.scaled(k).non_negative(),
            padding: c.padding.scaled(k).non_negative(),
            gap: (c.gap * k).max(0.0),
            flow: c.flow,
            anchor: c.anchor.resolved(),
            stretch: c.stretch,
            overflow: c.overflow,
            visible: c.is_visible,
            word_wrap: c.word_wrap,
        }
    }

    #[inline]
    fn margin_size(&self) -> Vec2 {
        Vec2::new(self.margin.h(), self.margin.v())
    }

    #[inline]
    fn padding_size(&self) -> Vec2 {
        Vec2::new(self.padding.h(), self.padding.v())
    }
}

// ── Axis helpers ──────────────────────────────────────────────────────────

#[inline]
fn main_of(v: Vec2, flow: Flow) -> f32 {
    if flow == Flow::Vertical { v.y } else { v.x }
}

#[inline]
fn cross_of(v: Vec2, flow: Flow) -> f32 {
    if flow == Flow::Vertical { v.x } else { v.y }
}

#[inline]
fn from_axes(main: f32, cross: f32, flow: Flow) -> Vec2 {
    if flow == Flow::Vertical { Vec2::new(cross, main) } else { Vec2::new(main, cross) }
}

/// Children sharing one anchor point, in sort order.
struct Group {
    anchor: Anchor,
    members: Vec<(NodeId, Vec2)>,
    main: f32,
    cross: f32,
}

fn group_by_anchor(items: &[(NodeId, Anchor, Vec2)], flow: Flow, gap: f32) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for &(id, anchor, outer) in items {
        let idx = match groups.iter().position(|g| g.anchor == anchor) {
            Some(i) => i,
            None => {
                groups.push(Group { anchor, members: Vec::new(), main: 0.0, cross: 0.0 });
                groups.len() - 1
            }
        };
        let g = &mut groups[idx];
        if !g.members.is_empty() {
            g.main += gap;
        }
        g.main += main_of(outer, flow);
        g.cross = g.cross.max(cross_of(outer, flow));
        g.members.push((id, outer));
    }
    groups
}

/// Margin rects of `items` inside `content`, before scrolling.
fn place(content: Rect, flow: Flow, gap: f32, items: &[(NodeId, Anchor, Vec2)]) -> Vec<(NodeId, Rect)> {
    if flow == Flow::None {
        return items
            .iter()
            .map(|&(id, anchor, outer)| {
                (id, Rect::from_origin_size(anchor.place(content.origin, content.size, outer), outer))
            })
            .collect();
    }

    let mut out = Vec::with_capacity(items.len());
    for group in group_by_anchor(items, flow, gap) {
        let (main_align, cross_align) = match flow {
            Flow::Vertical => (group.anchor.vertical(), group.anchor.horizontal()),
            _ => (group.anchor.horizontal(), group.anchor.vertical()),
        };
        let main_start = main_of(content.origin, flow);
        let cross_start = cross_of(content.origin, flow);
        let mut cursor = main_align.place(main_start, main_of(content.size, flow), group.main);

        let mut members = group.members;
        if main_align == Align::End {
            // first child nearest the end edge
            members.reverse();
        }
        for (id, outer) in members {
            let cross = cross_align.place(cross_start, cross_of(content.size, flow), cross_of(outer, flow));
            out.push((id, Rect::from_origin_size(from_axes(cursor, cross, flow), outer)));
            cursor += main_of(outer, flow) + gap;
        }
    }
    out
}

// ── Pass ──────────────────────────────────────────────────────────────────

struct LayoutPass<'a> {
    tree: &'a mut NodeTree,
    measurer: &'a dyn TextMeasure,
    scale: f32,
    nodes: usize,
}

impl LayoutPass<'_> {
    fn metrics(&self, id: NodeId) -> Option<Metrics> {
        self.tree.nodes.get(id).map(|n| Metrics::of(&n.computed, self.scale))
    }

    /// Returns the margin-box size of `id`. `avail` is the width its parent
    /// can offer, when known.
    fn measure(&mut self, id: NodeId, avail: Option<f32>) -> Vec2 {
        let Some(m) = self.metrics(id) else { return Vec2::zero() };
        if !m.visible {
            if let Some(data) = self.tree.nodes.get_mut(id) {
                data.measured = Vec2::zero();
                data.content_extent = Vec2::zero();
            }
            return Vec2::zero();
        }

        let padding_w = if m.size.x > 0.0 { Some(m.size.x) } else { avail.map(|w| (w - m.margin.h()).max(0.0)) };
        let inner_w = padding_w.map(|w| (w - m.padding.h()).max(0.0));

        let stacked = self.measure_children(id, &m, inner_w);
        let text = self.text_size(id, if m.word_wrap { inner_w } else { None });
        let content = stacked.max(text) + m.padding_size();
        let size = Vec2::new(
            if m.size.x > 0.0 { m.size.x } else { content.x },
            if m.size.y > 0.0 { m.size.y } else { content.y },
        );

        if let Some(data) = self.tree.nodes.get_mut(id) {
            data.measured = size;
            data.content_extent = stacked;
        }
        size + m.margin_size()
    }

    fn measure_children(&mut self, id: NodeId, m: &Metrics, inner_w: Option<f32>) -> Vec2 {
        let mut items = Vec::new();
        for child in self.tree.children(id) {
            let outer = self.measure(child, inner_w);
            let Some(cm) = self.metrics(child) else { continue };
            if cm.visible {
                items.push((child, cm.anchor, outer));
            }
        }

        if m.flow == Flow::None {
            return items.iter().fold(Vec2::zero(), |acc, &(_, _, outer)| acc.max(outer));
        }
        let groups = group_by_anchor(&items, m.flow, m.gap);
        let main = groups.iter().map(|g| g.main).sum();
        let cross = groups.iter().map(|g| g.cross).fold(0.0, f32::max);
        from_axes(main, cross, m.flow)
    }

    /// Measured text size, wrapped at `wrap` when given. Cached per node.
    fn text_size(&mut self, id: NodeId, wrap: Option<f32>) -> Vec2 {
        let Some(data) = self.tree.nodes.get_mut(id) else { return Vec2::zero() };
        let Some(text) = data.value.as_deref().filter(|s| !s.is_empty()) else {
            return Vec2::zero();
        };
        if data.text.valid && data.text.max_width == wrap {
            return data.text.size;
        }
        let c = &data.computed;
        let raw = self.measurer.measure(text, c.font, c.font_size * self.scale, wrap);
        let size = Vec2::new(raw.x, raw.y * c.line_height).non_negative();
        data.text = TextCache { size, max_width: wrap, valid: true };
        size
    }

    fn arrange(&mut self, id: NodeId, margin_rect: Rect) {
        let Some(m) = self.metrics(id) else { return };
        self.nodes += 1;

        if !m.visible {
            let collapsed = Rect::from_origin_size(margin_rect.origin, Vec2::zero());
            if let Some(data) = self.tree.nodes.get_mut(id) {
                data.bounds.margin = collapsed;
                data.bounds.padding = collapsed;
                data.bounds.content = collapsed;
                data.dirty.layout = false;
            }
            return;
        }

        let padding = m.margin.inset(margin_rect);
        let content = m.padding.inset(padding);

        let mut items = Vec::new();
        for child in self.tree.children(id) {
            let Some(cm) = self.metrics(child) else { continue };
            if !cm.visible {
                self.arrange(child, Rect::from_origin_size(content.origin, Vec2::zero()));
                continue;
            }
            let outer = self.resolve_outer(child, &cm, m.flow, content.size);
            items.push((child, cm.anchor, outer));
        }

        let placed = place(content, m.flow, m.gap, &items);

        let Some(data) = self.tree.nodes.get_mut(id) else { return };
        let mut extent = data.content_extent;
        for (_, r) in &placed {
            extent = extent.max(r.max() - content.origin);
        }
        let scroll = if m.overflow {
            Vec2::zero()
        } else {
            let clamped = data.scroll.min((extent - content.size).non_negative()).non_negative();
            data.scroll = clamped;
            clamped
        };
        data.bounds.margin = margin_rect;
        data.bounds.padding = padding;
        data.bounds.content = content;
        data.dirty.layout = false;

        for (child, rect) in placed {
            self.arrange(child, rect.translate(-scroll));
        }
    }

    /// Final margin-box size of a visible child inside a content box of
    /// `avail`: fill, stretch and the wrapped-text second pass.
    fn resolve_outer(&mut self, child: NodeId, cm: &Metrics, parent_flow: Flow, avail: Vec2) -> Vec2 {
        let Some(data) = self.tree.nodes.get(child) else { return Vec2::zero() };
        let measured = data.measured;
        let stacked = data.content_extent;
        let has_text = data.text().is_some();

        let stretch_x = cm.stretch && parent_flow != Flow::Horizontal;
        let stretch_y = cm.stretch && parent_flow != Flow::Vertical;

        let mut outer = measured + cm.margin_size();
        if outer.x <= 0.0 || stretch_x {
            outer.x = avail.x;
        }

        let padding_w = (outer.x - cm.margin.h()).max(0.0);
        if cm.word_wrap && has_text && cm.size.x <= 0.0 && padding_w != measured.x {
            let text = self.text_size(child, Some((padding_w - cm.padding.h()).max(0.0)));
            if cm.size.y <= 0.0 {
                let h = text.y.max(stacked.y) + cm.padding.v();
                outer.y = h + cm.margin.v();
                if let Some(data) = self.tree.nodes.get_mut(child) {
                    data.measured.y = h;
                }
            }
        }

        if outer.y <= 0.0 || stretch_y {
            outer.y = avail.y;
        }
        outer
    }
}

#[cfg(test)]
mod tests {
    use una_engine::text::FixedAdvance;

    use super::*;
    use crate::style::{Size, Style};

    const TEXT: FixedAdvance = FixedAdvance::new(0.5, 1.0);

    fn run(tree: &mut NodeTree, root: NodeId) {
        tree.resolve_styles(root).unwrap();
        compute_layout(tree, root, Vec2::zero(), &TEXT, 1.0).unwrap();
    }

    fn boxed(tree: &mut NodeTree, w: f32, h: f32) -> NodeId {
        tree.build().style(Style::new().size(Size::new(w, h))).finish().unwrap()
    }

    fn padding_of(tree: &NodeTree, n: NodeId) -> Rect {
        tree.bounds(n).unwrap().padding
    }

    #[test]
    fn horizontal_stack_scenario() {
        let mut tree = NodeTree::new();
        let root = tree.build().style(Style::new().flow(Flow::Horizontal).gap(5.0)).finish().unwrap();
        let kids: Vec<_> = [10.0, 20.0, 30.0].iter().map(|&w| boxed(&mut tree, w, 8.0)).collect();
        for &k in &kids {
            tree.append_child(root, k).unwrap();
        }
        run(&mut tree, root);

        assert_eq!(tree.bounds(root).unwrap().content.size.x, 70.0);
        let xs: Vec<f32> = kids.iter().map(|&k| padding_of(&tree, k).origin.x).collect();
        assert_eq!(xs, vec![0.0, 15.0, 40.0]);
    }

    #[test]
    fn vertical_conservation() {
        for n in 0..5 {
            let mut tree = NodeTree::new();
            let root = tree.build().style(Style::new().flow(Flow::Vertical).gap(4.0)).finish().unwrap();
            for _ in 0..n {
                let k = boxed(&mut tree, 10.0, 12.0);
                tree.append_child(root, k).unwrap();
            }
            run(&mut tree, root);
            let expected = if n == 0 { 0.0 } else { n as f32 * 12.0 + (n - 1) as f32 * 4.0 };
            assert_eq!(tree.bounds(root).unwrap().content.size.y, expected, "n = {n}");
        }
    }

    #[test]
    fn padding_and_margin() {
        let mut tree = NodeTree::new();
        let root = tree.build().style(Style::new().padding(Spacing::all(5.0))).finish().unwrap();
        let child = tree
            .build()
            .style(Style::new().size(Size::new(10.0, 10.0)).margin(Spacing::all(2.0)))
            .finish()
            .unwrap();
        tree.append_child(root, child).unwrap();
        run(&mut tree, root);

        let b = tree.bounds(child).unwrap();
        assert_eq!(b.margin, Rect::new(5.0, 5.0, 14.0, 14.0));
        assert_eq!(b.padding, Rect::new(7.0, 7.0, 10.0, 10.0));
        assert_eq!(padding_of(&tree, root), Rect::new(0.0, 0.0, 24.0, 24.0));
    }

    #[test]
    fn layout_is_idempotent() {
        let mut tree = NodeTree::new();
        let root = tree.build().style(Style::new().flow(Flow::Vertical).gap(3.0)).finish().unwrap();
        for w in [4.0, 9.0] {
            let k = boxed(&mut tree, w, w);
            tree.append_child(root, k).unwrap();
        }
        let text = tree.build().value("hello").finish().unwrap();
        tree.append_child(root, text).unwrap();
        run(&mut tree, root);
        let first: Vec<_> = tree.subtree(root).iter().map(|&n| tree.bounds(n)).collect();

        tree.reflow(root).unwrap();
        run(&mut tree, root);
        let second: Vec<_> = tree.subtree(root).iter().map(|&n| tree.bounds(n)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_child_fills_parent() {
        let mut tree = NodeTree::new();
        let root = boxed(&mut tree, 100.0, 50.0);
        let child = tree.create();
        tree.append_child(root, child).unwrap();
        run(&mut tree, root);
        assert_eq!(padding_of(&tree, child), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn stretch_fills_cross_axis() {
        let mut tree = NodeTree::new();
        let root = tree
            .build()
            .style(Style::new().size(Size::new(100.0, 50.0)).flow(Flow::Vertical))
            .finish()
            .unwrap();
        let child = tree.build().style(Style::new().size(Size::new(0.0, 10.0)).stretch(true)).finish().unwrap();
        let plain = boxed(&mut tree, 20.0, 10.0);
        tree.append_child(root, child).unwrap();
        tree.append_child(root, plain).unwrap();
        run(&mut tree, root);
        assert_eq!(padding_of(&tree, child), Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(padding_of(&tree, plain), Rect::new(0.0, 10.0, 20.0, 10.0));
    }

    #[test]
    fn anchors_place_groups() {
        let mut tree = NodeTree::new();
        let root = boxed(&mut tree, 100.0, 100.0);
        let right: Vec<_> = (0..2)
            .map(|_| tree.build().style(Style::new().size(Size::new(10.0, 10.0)).anchor(Anchor::TopRight)).finish().unwrap())
            .collect();
        let bottom = tree
            .build()
            .style(Style::new().size(Size::new(10.0, 10.0)).anchor(Anchor::BottomLeft))
            .finish()
            .unwrap();
        let center = tree
            .build()
            .style(Style::new().size(Size::new(10.0, 10.0)).anchor(Anchor::MiddleCenter))
            .finish()
            .unwrap();
        for &n in right.iter().chain([&bottom, &center]) {
            tree.append_child(root, n).unwrap();
        }
        run(&mut tree, root);

        // end-anchored groups are reversed: the first child hugs the edge
        assert_eq!(padding_of(&tree, right[0]).origin, Vec2::new(90.0, 0.0));
        assert_eq!(padding_of(&tree, right[1]).origin, Vec2::new(80.0, 0.0));
        assert_eq!(padding_of(&tree, bottom).origin, Vec2::new(0.0, 90.0));
        assert_eq!(padding_of(&tree, center).origin, Vec2::new(45.0, 45.0));
    }

    #[test]
    fn invisible_children_take_no_space() {
        let mut tree = NodeTree::new();
        let root = tree.build().style(Style::new().gap(5.0)).finish().unwrap();
        let a = boxed(&mut tree, 10.0, 10.0);
        let hidden = tree.build().style(Style::new().size(Size::new(20.0, 10.0)).is_visible(false)).finish().unwrap();
        let c = boxed(&mut tree, 30.0, 10.0);
        for n in [a, hidden, c] {
            tree.append_child(root, n).unwrap();
        }
        run(&mut tree, root);
        assert_eq!(tree.bounds(root).unwrap().content.size.x, 45.0);
        assert_eq!(padding_of(&tree, c).origin.x, 15.0);
    }

    #[test]
    fn negative_lengths_clamp_to_zero() {
        let mut tree = NodeTree::new();
        let root = tree
            .build()
            .style(Style::new().size(Size::new(-10.0, 20.0)).padding(Spacing::all(-4.0)).gap(-3.0))
            .finish()
            .unwrap();
        let child = boxed(&mut tree, 6.0, 6.0);
        tree.append_child(root, child).unwrap();
        run(&mut tree, root);
        assert_eq!(padding_of(&tree, root), Rect::new(0.0, 0.0, 6.0, 20.0));
        assert_eq!(padding_of(&tree, child).origin, Vec2::zero());
    }

    #[test]
    fn scale_multiplies_lengths() {
        let mut tree = NodeTree::new();
        let root = tree.build().style(Style::new().gap(5.0)).finish().unwrap();
        let kids: Vec<_> = [10.0, 20.0, 30.0].iter().map(|&w| boxed(&mut tree, w, 8.0)).collect();
        for &k in &kids {
            tree.append_child(root, k).unwrap();
        }
        tree.resolve_styles(root).unwrap();
        compute_layout(&mut tree, root, Vec2::zero(), &TEXT, 2.0).unwrap();

        assert_eq!(tree.bounds(root).unwrap().content.size, Vec2::new(140.0, 16.0));
        assert_eq!(padding_of(&tree, kids[2]).origin.x, 80.0);
    }

    #[test]
    fn clean_tree_is_translated() {
        let mut tree = NodeTree::new();
        let root = boxed(&mut tree, 20.0, 20.0);
        let child = boxed(&mut tree, 5.0, 5.0);
        tree.append_child(root, child).unwrap();
        run(&mut tree, root);
        assert!(!tree.needs_layout(root));

        compute_layout(&mut tree, root, Vec2::new(10.0, 7.0), &TEXT, 1.0).unwrap();
        assert_eq!(padding_of(&tree, root).origin, Vec2::new(10.0, 7.0));
        assert_eq!(padding_of(&tree, child).origin, Vec2::new(10.0, 7.0));
    }

    #[test]
    fn text_sizes_auto_boxes() {
        let mut tree = NodeTree::new();
        let root = tree
            .build()
            .value("abcd")
            .style(Style::new().font_size(10.0).line_height(1.5).padding(Spacing::all(1.0)))
            .finish()
            .unwrap();
        run(&mut tree, root);
        // 4 chars * 5px, one 10px line * 1.5, plus padding
        assert_eq!(padding_of(&tree, root).size, Vec2::new(22.0, 17.0));
    }

    #[test]
    fn wrapped_text_uses_available_width() {
        let mut tree = NodeTree::new();
        let root = tree
            .build()
            .style(Style::new().size(Size::new(30.0, 0.0)).flow(Flow::Vertical).font_size(10.0))
            .finish()
            .unwrap();
        let label = tree.build().value("aa bb cc").style(Style::new().word_wrap(true)).finish().unwrap();
        tree.append_child(root, label).unwrap();
        run(&mut tree, root);

        assert_eq!(padding_of(&tree, label).size, Vec2::new(25.0, 20.0));
        assert_eq!(padding_of(&tree, root).size, Vec2::new(30.0, 20.0));
    }

    #[test]
    fn stretched_wrapped_text_is_measured_again() {
        let mut tree = NodeTree::new();
        let root = tree
            .build()
            .style(Style::new().flow(Flow::Vertical).font_size(10.0))
            .finish()
            .unwrap();
        let wide = boxed(&mut tree, 60.0, 5.0);
        let label = tree
            .build()
            .value("aa bb cc dd ee ff gg hh")
            .style(Style::new().word_wrap(true).stretch(true).size(Size::new(0.0, 0.0)))
            .finish()
            .unwrap();
        tree.append_child(root, wide).unwrap();
        tree.append_child(root, label).unwrap();
        tree.update_style(root, |s| *s = s.size(Size::new(60.0, 0.0))).unwrap();
        run(&mut tree, root);

        // 60px fits "aa bb cc dd" (55px); two lines
        let b = padding_of(&tree, label);
        assert_eq!(b.size.x, 60.0);
        assert_eq!(b.size.y, 20.0);
    }

    #[test]
    fn overflow_container_clamps_scroll() {
        let mut tree = NodeTree::new();
        let root = tree
            .build()
            .style(Style::new().size(Size::new(50.0, 50.0)).flow(Flow::Vertical).overflow(false))
            .finish()
            .unwrap();
        let kids: Vec<_> = (0..3).map(|_| boxed(&mut tree, 10.0, 40.0)).collect();
        for &k in &kids {
            tree.append_child(root, k).unwrap();
        }
        tree.set_scroll(root, Vec2::new(30.0, 500.0)).unwrap();
        run(&mut tree, root);

        assert_eq!(tree.scroll(root), Vec2::new(0.0, 70.0));
        assert_eq!(padding_of(&tree, kids[0]).origin.y, -70.0);
        assert_eq!(padding_of(&tree, kids[2]).origin.y, 10.0);
    }
}
