use std::collections::BTreeSet;
use std::rc::Rc;

use slotmap::SlotMap;
use una_engine::coords::Vec2;

use super::{NodeBounds, NodeData, NodeError, NodeId, NodeKind};
use crate::event::{NodeEvent, Subscription};
use crate::style::{ComputedStyle, Style};
use crate::stylesheet::StyleSheet;

/// Arena of nodes.
///
/// Every structural mutator and setter takes the target's [`NodeId`] and
/// returns [`NodeError::Disposed`] when it is no longer alive. Setters only
/// flag the caches they invalidate; the work happens in the next
/// [`UiRoot::render`](crate::render::UiRoot::render) (or
/// [`compute_layout`](crate::layout::compute_layout)).
///
/// ```rust
/// use una_ui::node::NodeTree;
///
/// let mut tree = NodeTree::new();
/// let root = tree.create();
/// let item = tree.build().id("A").class("x").value("Hello").finish().unwrap();
/// tree.append_child(root, item).unwrap();
///
/// assert_eq!(tree.query_selector_all(root, ".x").unwrap(), vec![item]);
/// ```
pub struct NodeTree {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    next_serial: u64,
}

impl NodeTree {
    pub fn new() -> Self {
        Self { nodes: SlotMap::with_key(), next_serial: 0 }
    }

    // ── lookup ────────────────────────────────────────────────────────────

    pub(crate) fn get(&self, id: NodeId) -> Result<&NodeData, NodeError> {
        self.nodes.get(id).ok_or(NodeError::Disposed)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeData, NodeError> {
        self.nodes.get_mut(id).ok_or(NodeError::Disposed)
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// `true` once `id` has been disposed.
    #[inline]
    pub fn is_disposed(&self, id: NodeId) -> bool {
        !self.contains(id)
    }

    // ── creation ──────────────────────────────────────────────────────────

    /// Creates a detached [`NodeKind::Element`].
    pub fn create(&mut self) -> NodeId {
        self.create_with(NodeKind::Element)
    }

    pub fn create_with(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.insert(NodeData::new(kind))
    }

    // ── structure ─────────────────────────────────────────────────────────

    /// Appends `child` as the last child of `parent`.
    ///
    /// `child` must be detached: a node that already has a parent is
    /// rejected rather than moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        let index = self.get(parent)?.children.len();
        self.insert_child(parent, index, child)
    }

    /// Inserts `child` at `index` in `parent`'s insertion order (clamped).
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<(), NodeError> {
        self.get(parent)?;
        if self.get(child)?.parent.is_some() {
            return Err(NodeError::AlreadyHasParent);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(NodeError::WouldCreateCycle);
        }

        let siblings = &mut self.get_mut(parent)?.children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);

        self.mark_subtree_style_dirty(child);
        self.mark_layout_dirty(parent);
        log::debug!("attached {child:?} to {parent:?}");
        Ok(())
    }

    /// Detaches `child` from `parent`. The child stays alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        if self.get(child)?.parent != Some(parent) {
            self.get(parent)?;
            return Err(NodeError::NotAChild);
        }
        self.detach(child);
        Ok(())
    }

    /// Detaches `id` from its parent, if any. The node stays alive and can be
    /// appended elsewhere.
    pub fn remove(&mut self, id: NodeId) -> Result<(), NodeError> {
        self.get(id)?;
        self.detach(id);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        self.mark_subtree_style_dirty(id);
        self.mark_layout_dirty(parent);
        self.mark_layout_dirty(id);
        log::debug!("detached {id:?} from {parent:?}");
    }

    /// Disposes `id` and its whole subtree.
    ///
    /// `Disposed` listeners run first (pre-order, while the nodes are still
    /// readable), then the subtree is detached and freed. Disposing a node
    /// that is already gone is a no-op.
    pub fn dispose(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        for node in self.subtree(id) {
            self.emit(node, NodeEvent::Disposed);
        }
        if !self.contains(id) {
            // a listener disposed it already
            return;
        }

        self.detach(id);
        let doomed = self.subtree(id);
        // dropping a node's clip guard unpublishes its region
        for node in &doomed {
            self.nodes.remove(*node);
        }
        log::debug!("disposed {id:?} ({} nodes)", doomed.len());
    }

    /// Disposes every child of `id`.
    pub fn clear(&mut self, id: NodeId) -> Result<(), NodeError> {
        let children = self.get(id)?.children.clone();
        for child in children {
            self.dispose(child);
        }
        Ok(())
    }

    // ── traversal ─────────────────────────────────────────────────────────

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children in ascending `sort_index`, ties in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut children = node.children.clone();
        children.sort_by_key(|c| self.nodes.get(*c).map_or(0, |n| n.sort_index));
        children
    }

    /// `id` and all its descendants, depth-first pre-order in sort order.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).into_iter().rev());
        }
        out
    }

    /// `true` if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    // ── attributes ────────────────────────────────────────────────────────

    pub fn set_id(&mut self, node: NodeId, id: Option<&str>) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if data.id.as_deref() != id {
            data.id = id.map(str::to_owned);
            data.dirty.style = true;
        }
        Ok(())
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).and_then(|n| n.id.as_deref())
    }

    /// Adds `class` unless already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_owned());
            data.dirty.style = true;
        }
        Ok(())
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        let before = data.classes.len();
        data.classes.retain(|c| c != class);
        if data.classes.len() != before {
            data.dirty.style = true;
        }
        Ok(())
    }

    /// Adds or removes `class`; returns whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> Result<bool, NodeError> {
        if self.has_class(node, class) {
            self.remove_class(node, class)?;
            Ok(false)
        } else {
            self.add_class(node, class)?;
            Ok(true)
        }
    }

    /// Replaces the class list. Duplicates are dropped, order is kept.
    pub fn set_classes<S: AsRef<str>>(&mut self, node: NodeId, classes: &[S]) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        let mut next: Vec<String> = Vec::with_capacity(classes.len());
        for c in classes {
            if !next.iter().any(|n| n == c.as_ref()) {
                next.push(c.as_ref().to_owned());
            }
        }
        if data.classes != next {
            data.classes = next;
            data.dirty.style = true;
        }
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes.get(node).map(|n| n.classes.as_slice()).unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    /// Sets or clears one pseudo-state tag (`hover`, `disabled`, ...).
    pub fn set_tag(&mut self, node: NodeId, tag: &str, on: bool) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        let changed = if on { data.tags.insert(tag.to_owned()) } else { data.tags.remove(tag) };
        if changed {
            data.dirty.style = true;
        }
        Ok(())
    }

    pub fn set_tags<S: AsRef<str>>(&mut self, node: NodeId, tags: &[S]) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        let next: BTreeSet<String> = tags.iter().map(|t| t.as_ref().to_owned()).collect();
        if data.tags != next {
            data.tags = next;
            data.dirty.style = true;
        }
        Ok(())
    }

    pub fn has_tag(&self, node: NodeId, tag: &str) -> bool {
        self.nodes.get(node).is_some_and(|n| n.tags.contains(tag))
    }

    pub fn tags(&self, node: NodeId) -> Vec<&str> {
        self.nodes.get(node).map_or_else(Vec::new, |n| n.tags.iter().map(String::as_str).collect())
    }

    /// Own tags plus, when `inherit_tags` is set, the parent's effective tags.
    pub fn effective_tags(&self, node: NodeId) -> BTreeSet<String> {
        let Some(data) = self.nodes.get(node) else {
            return BTreeSet::new();
        };
        let mut tags = data.tags.clone();
        if data.inherit_tags {
            if let Some(parent) = data.parent {
                tags.extend(self.effective_tags(parent));
            }
        }
        tags
    }

    /// Match selectors against the parent's tags too (a label inside a
    /// hovered button matching `:hover`).
    pub fn set_inherit_tags(&mut self, node: NodeId, inherit: bool) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if data.inherit_tags != inherit {
            data.inherit_tags = inherit;
            data.dirty.style = true;
        }
        Ok(())
    }

    // ── style ─────────────────────────────────────────────────────────────

    /// Replaces the inline style, which overrides every stylesheet rule.
    pub fn set_style(&mut self, node: NodeId, style: Style) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if data.inline_style != style {
            data.inline_style = style;
            data.dirty.style = true;
        }
        Ok(())
    }

    /// Edits the inline style in place.
    pub fn update_style(&mut self, node: NodeId, f: impl FnOnce(&mut Style)) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        let before = data.inline_style;
        f(&mut data.inline_style);
        if data.inline_style != before {
            data.dirty.style = true;
        }
        Ok(())
    }

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.nodes.get(node).map(|n| &n.inline_style)
    }

    /// Sets the stylesheet applied to `node` and its descendants.
    pub fn set_stylesheet(&mut self, node: NodeId, sheet: Option<Rc<StyleSheet>>) -> Result<(), NodeError> {
        self.get_mut(node)?.stylesheet = sheet;
        self.mark_subtree_style_dirty(node);
        Ok(())
    }

    pub fn stylesheet(&self, node: NodeId) -> Option<&Rc<StyleSheet>> {
        self.nodes.get(node).and_then(|n| n.stylesheet.as_ref())
    }

    /// Computed style from the last style pass.
    pub fn computed_style(&self, node: NodeId) -> Option<&ComputedStyle> {
        self.nodes.get(node).map(|n| &n.computed)
    }

    // ── content ───────────────────────────────────────────────────────────

    /// Sets the text content. `None` or `""` means no text.
    pub fn set_value(&mut self, node: NodeId, value: Option<&str>) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if data.value.as_deref() == value {
            return Ok(());
        }
        data.value = value.map(str::to_owned);
        data.text.valid = false;
        self.mark_layout_dirty(node);
        Ok(())
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).and_then(|n| n.value.as_deref())
    }

    pub fn set_kind(&mut self, node: NodeId, kind: NodeKind) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if data.kind.tag_name() != kind.tag_name() {
            data.dirty.style = true;
        }
        data.kind = kind;
        Ok(())
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(node).map(|n| n.kind)
    }

    // ── ordering & scrolling ──────────────────────────────────────────────

    pub fn set_sort_index(&mut self, node: NodeId, index: i32) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if data.sort_index != index {
            data.sort_index = index;
            if let Some(parent) = data.parent {
                self.mark_layout_dirty(parent);
            }
        }
        Ok(())
    }

    pub fn sort_index(&self, node: NodeId) -> Option<i32> {
        self.nodes.get(node).map(|n| n.sort_index)
    }

    /// Lets the user reorder this node's children by dragging them.
    pub fn set_sortable(&mut self, node: NodeId, sortable: bool) -> Result<(), NodeError> {
        self.get_mut(node)?.sortable = sortable;
        Ok(())
    }

    pub fn is_sortable(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.sortable)
    }

    /// Sets the scroll offset of an overflow container. Clamped to the
    /// scrollable range by the next layout pass.
    pub fn set_scroll(&mut self, node: NodeId, scroll: Vec2) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        let scroll = scroll.non_negative();
        if data.scroll != scroll {
            data.scroll = scroll;
            self.mark_layout_dirty(node);
        }
        Ok(())
    }

    pub fn scroll(&self, node: NodeId) -> Vec2 {
        self.nodes.get(node).map_or(Vec2::zero(), |n| n.scroll)
    }

    // ── clip key ──────────────────────────────────────────────────────────

    /// Names the clip-registry entry this node publishes when rendered as a
    /// root. Replacing or clearing the key releases the old entry.
    pub fn set_clip_key(&mut self, node: NodeId, key: Option<&str>) -> Result<(), NodeError> {
        let data = self.get_mut(node)?;
        if data.clip_key.as_deref() == key {
            return Ok(());
        }
        data.clip_key = key.map(str::to_owned);
        data.clip_region = None;
        Ok(())
    }

    pub fn clip_key(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).and_then(|n| n.clip_key.as_deref())
    }

    // ── geometry ──────────────────────────────────────────────────────────

    /// Geometry from the last layout pass.
    pub fn bounds(&self, node: NodeId) -> Option<NodeBounds> {
        self.nodes.get(node).map(|n| n.bounds)
    }

    /// Forces style resolution and a full layout of `node`'s subtree on the
    /// next pass, including text re-measurement.
    pub fn reflow(&mut self, node: NodeId) -> Result<(), NodeError> {
        self.get(node)?;
        for n in self.subtree(node) {
            if let Some(data) = self.nodes.get_mut(n) {
                data.dirty.style = true;
                data.dirty.layout = true;
                data.text.valid = false;
            }
        }
        self.mark_layout_dirty(node);
        Ok(())
    }

    pub(crate) fn needs_layout(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|n| n.dirty.layout)
    }

    pub(crate) fn mark_layout_dirty(&mut self, node: NodeId) {
        let mut cur = Some(node);
        while let Some(id) = cur {
            let Some(data) = self.nodes.get_mut(id) else { break };
            data.dirty.layout = true;
            cur = data.parent;
        }
    }

    fn mark_subtree_style_dirty(&mut self, node: NodeId) {
        for n in self.subtree(node) {
            if let Some(data) = self.nodes.get_mut(n) {
                data.dirty.style = true;
            }
        }
    }

    pub(crate) fn translate_subtree(&mut self, node: NodeId, delta: Vec2) {
        for n in self.subtree(node) {
            if let Some(data) = self.nodes.get_mut(n) {
                data.bounds.translate(delta);
            }
        }
    }

    // ── events ────────────────────────────────────────────────────────────

    pub fn subscribe(
        &mut self,
        node: NodeId,
        event: NodeEvent,
        listener: impl FnMut(&mut NodeTree, NodeId) + 'static,
    ) -> Result<Subscription, NodeError> {
        let serial = self.next_serial;
        self.get_mut(node)?.listeners.add(event, serial, Box::new(listener));
        self.next_serial += 1;
        Ok(Subscription { node, event, serial })
    }

    /// Removes the listener behind `sub`. Returns `false` if it was already
    /// removed or its node disposed.
    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        self.nodes.get_mut(sub.node).is_some_and(|n| n.listeners.remove(sub.serial))
    }

    pub fn has_listeners(&self, node: NodeId, event: NodeEvent) -> bool {
        self.nodes.get(node).is_some_and(|n| n.listeners.has(event))
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.nodes.get(node).map_or(0, |n| n.listeners.len())
    }

    /// Runs `node`'s listeners for `event` synchronously. Returns how many ran.
    pub fn emit(&mut self, node: NodeId, event: NodeEvent) -> usize {
        let Some(data) = self.nodes.get_mut(node) else {
            return 0;
        };
        if !data.listeners.has(event) {
            return 0;
        }
        let mut taken = data.listeners.take();
        let called = taken.call(event, self, node);
        if let Some(data) = self.nodes.get_mut(node) {
            data.listeners.restore(taken);
        }
        log::trace!("{event:?} on {node:?}: {called} listeners");
        called
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn chain(tree: &mut NodeTree, depth: usize) -> Vec<NodeId> {
        let mut ids = vec![tree.create()];
        for _ in 1..depth {
            let n = tree.create();
            tree.append_child(*ids.last().unwrap(), n).unwrap();
            ids.push(n);
        }
        ids
    }

    #[test]
    fn append_sets_both_links() {
        let mut tree = NodeTree::new();
        let p = tree.create();
        let c = tree.create();
        tree.append_child(p, c).unwrap();
        assert_eq!(tree.parent(c), Some(p));
        assert_eq!(tree.children(p), vec![c]);
    }

    #[test]
    fn append_requires_detached_child() {
        let mut tree = NodeTree::new();
        let (a, b, c) = (tree.create(), tree.create(), tree.create());
        tree.append_child(a, c).unwrap();
        assert_eq!(tree.append_child(b, c), Err(NodeError::AlreadyHasParent));
        assert_eq!(tree.children(b), Vec::<NodeId>::new());

        tree.remove(c).unwrap();
        tree.append_child(b, c).unwrap();
        assert_eq!(tree.parent(c), Some(b));
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = NodeTree::new();
        let ids = chain(&mut tree, 3);
        assert_eq!(tree.append_child(ids[2], ids[0]), Err(NodeError::WouldCreateCycle));
        assert_eq!(tree.append_child(ids[1], ids[1]), Err(NodeError::WouldCreateCycle));
        assert_eq!(tree.parent(ids[0]), None);
    }

    #[test]
    fn insert_child_respects_index() {
        let mut tree = NodeTree::new();
        let p = tree.create();
        let (a, b, c) = (tree.create(), tree.create(), tree.create());
        tree.append_child(p, a).unwrap();
        tree.append_child(p, b).unwrap();
        tree.insert_child(p, 1, c).unwrap();
        assert_eq!(tree.children(p), vec![a, c, b]);
        let d = tree.create();
        tree.insert_child(p, 99, d).unwrap();
        assert_eq!(tree.children(p).last(), Some(&d));
    }

    #[test]
    fn remove_child_checks_parentage() {
        let mut tree = NodeTree::new();
        let (p, q, c) = (tree.create(), tree.create(), tree.create());
        tree.append_child(p, c).unwrap();
        assert_eq!(tree.remove_child(q, c), Err(NodeError::NotAChild));
        tree.remove_child(p, c).unwrap();
        assert!(tree.contains(c));
        assert_eq!(tree.parent(c), None);
    }

    #[test]
    fn dispose_is_recursive() {
        let mut tree = NodeTree::new();
        let root = tree.create();
        let ids = chain(&mut tree, 4);
        let sibling = tree.create();
        tree.append_child(ids[1], sibling).unwrap();
        tree.append_child(root, ids[0]).unwrap();

        // ids[0] has K = 4 descendants
        tree.dispose(ids[0]);
        assert!(ids.iter().all(|&n| tree.is_disposed(n)));
        assert!(tree.is_disposed(sibling));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.subtree(root), vec![root]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut tree = NodeTree::new();
        let ids = chain(&mut tree, 2);
        tree.dispose(ids[0]);
        tree.dispose(ids[0]);
        tree.dispose(ids[1]);
        assert!(tree.is_empty());
    }

    #[test]
    fn disposed_ids_are_rejected() {
        let mut tree = NodeTree::new();
        let (a, b) = (tree.create(), tree.create());
        tree.dispose(b);
        assert_eq!(tree.append_child(a, b), Err(NodeError::Disposed));
        assert_eq!(tree.append_child(b, a), Err(NodeError::Disposed));
        assert_eq!(tree.add_class(b, "x"), Err(NodeError::Disposed));
        // a reused slot does not revive the old id
        let c = tree.create();
        assert_ne!(b, c);
        assert!(tree.is_disposed(b));
    }

    #[test]
    fn disposed_listeners_fire_before_removal() {
        let mut tree = NodeTree::new();
        let ids = chain(&mut tree, 3);
        let seen = Rc::new(Cell::new(0));
        for &n in &ids {
            let s = seen.clone();
            tree.subscribe(n, NodeEvent::Disposed, move |tree, id| {
                assert!(tree.contains(id));
                s.set(s.get() + 1);
            })
            .unwrap();
        }
        tree.dispose(ids[0]);
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn clear_disposes_children_only() {
        let mut tree = NodeTree::new();
        let ids = chain(&mut tree, 3);
        tree.clear(ids[0]).unwrap();
        assert!(tree.contains(ids[0]));
        assert!(tree.is_disposed(ids[1]));
        assert!(tree.is_disposed(ids[2]));
    }

    #[test]
    fn sort_index_orders_children_stably() {
        let mut tree = NodeTree::new();
        let p = tree.create();
        let ids: Vec<_> = (0..4).map(|_| tree.create()).collect();
        for &c in &ids {
            tree.append_child(p, c).unwrap();
        }
        tree.set_sort_index(ids[0], 5).unwrap();
        tree.set_sort_index(ids[3], -1).unwrap();
        assert_eq!(tree.children(p), vec![ids[3], ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn class_helpers() {
        let mut tree = NodeTree::new();
        let n = tree.create();
        tree.set_classes(n, &["a", "b", "a"]).unwrap();
        assert_eq!(tree.classes(n), ["a", "b"]);
        assert!(!tree.toggle_class(n, "a").unwrap());
        assert!(tree.toggle_class(n, "c").unwrap());
        assert_eq!(tree.classes(n), ["b", "c"]);
    }

    #[test]
    fn inherited_tags_follow_the_parent() {
        let mut tree = NodeTree::new();
        let ids = chain(&mut tree, 3);
        tree.set_tag(ids[0], "hover", true).unwrap();
        tree.set_inherit_tags(ids[2], true).unwrap();
        // ids[1] does not inherit, so the chain stops there
        assert!(!tree.effective_tags(ids[2]).contains("hover"));
        tree.set_inherit_tags(ids[1], true).unwrap();
        assert!(tree.effective_tags(ids[2]).contains("hover"));
    }
}
