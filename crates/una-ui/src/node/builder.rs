use std::rc::Rc;

use super::{NodeError, NodeId, NodeKind, NodeTree};
use crate::event::NodeEvent;
use crate::style::Style;
use crate::stylesheet::StyleSheet;

/// Chained construction of one node.
///
/// The node is created up front; each call applies one setter. The first
/// failing call is remembered and reported by [`finish`](Self::finish), which
/// then disposes the half-built node (children appended so far are detached
/// first and stay alive).
///
/// ```rust
/// use una_ui::node::NodeTree;
/// use una_ui::style::{Flow, Style};
///
/// let mut tree = NodeTree::new();
/// let label = tree.build().class("label").value("Save").finish().unwrap();
/// let button = tree
///     .build()
///     .id("save")
///     .class("button")
///     .style(Style::new().flow(Flow::Vertical))
///     .child(label)
///     .finish()
///     .unwrap();
/// assert_eq!(tree.parent(label), Some(button));
/// ```
#[must_use = "call finish() to get the node id"]
pub struct NodeBuilder<'t> {
    tree: &'t mut NodeTree,
    node: NodeId,
    appended: Vec<NodeId>,
    error: Option<NodeError>,
}

impl NodeTree {
    /// Starts building a detached [`NodeKind::Element`].
    pub fn build(&mut self) -> NodeBuilder<'_> {
        let node = self.create();
        NodeBuilder { tree: self, node, appended: Vec::new(), error: None }
    }
}

impl<'t> NodeBuilder<'t> {
    fn apply(mut self, f: impl FnOnce(&mut NodeTree, NodeId) -> Result<(), NodeError>) -> Self {
        if self.error.is_none() {
            if let Err(e) = f(&mut *self.tree, self.node) {
                self.error = Some(e);
            }
        }
        self
    }

    /// The id of the node under construction.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn id(self, id: &str) -> Self {
        self.apply(|t, n| t.set_id(n, Some(id)))
    }

    pub fn class(self, class: &str) -> Self {
        self.apply(|t, n| t.add_class(n, class))
    }

    pub fn tag(self, tag: &str) -> Self {
        self.apply(|t, n| t.set_tag(n, tag, true))
    }

    pub fn style(self, style: Style) -> Self {
        self.apply(|t, n| t.set_style(n, style))
    }

    pub fn value(self, value: &str) -> Self {
        self.apply(|t, n| t.set_value(n, Some(value)))
    }

    pub fn kind(self, kind: NodeKind) -> Self {
        self.apply(|t, n| t.set_kind(n, kind))
    }

    pub fn sort_index(self, index: i32) -> Self {
        self.apply(|t, n| t.set_sort_index(n, index))
    }

    pub fn inherit_tags(self, inherit: bool) -> Self {
        self.apply(|t, n| t.set_inherit_tags(n, inherit))
    }

    pub fn sortable(self, sortable: bool) -> Self {
        self.apply(|t, n| t.set_sortable(n, sortable))
    }

    pub fn stylesheet(self, sheet: Rc<StyleSheet>) -> Self {
        self.apply(|t, n| t.set_stylesheet(n, Some(sheet)))
    }

    pub fn clip_key(self, key: &str) -> Self {
        self.apply(|t, n| t.set_clip_key(n, Some(key)))
    }

    pub fn on(self, event: NodeEvent, listener: impl FnMut(&mut NodeTree, NodeId) + 'static) -> Self {
        self.apply(|t, n| t.subscribe(n, event, listener).map(|_| ()))
    }

    /// Appends an existing detached node.
    pub fn child(mut self, child: NodeId) -> Self {
        self = self.apply(|t, n| t.append_child(n, child));
        if self.error.is_none() {
            self.appended.push(child);
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeId>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    pub fn finish(self) -> Result<NodeId, NodeError> {
        let Some(err) = self.error else {
            return Ok(self.node);
        };
        for child in self.appended {
            // appended children are only ever detached here
            let _ = self.tree.remove(child);
        }
        self.tree.dispose(self.node);
        Err(err)
    }
}
