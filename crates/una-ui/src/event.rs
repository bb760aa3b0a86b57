use crate::node::{NodeId, NodeTree};

/// Synchronous node events.
///
/// Pointer events are dispatched by the interaction step of
/// [`UiRoot::render`](crate::render::UiRoot::render); `Click`, `RightClick`
/// and `DoubleClick` bubble from the topmost node under the cursor to the
/// root. Lifecycle events fire on the node itself only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeEvent {
    /// Left button released over the node.
    Click,
    RightClick,
    DoubleClick,
    /// The cursor moved onto the node this frame.
    MouseEnter,
    /// The cursor left the node this frame.
    MouseLeave,
    /// Fired on a sortable parent after a drag reordered its children.
    Sorted,
    /// Before the draw step, every frame.
    BeforeDraw,
    /// Before a layout pass that will move or resize boxes.
    BeforeReflow,
    /// The node is about to be removed from the tree for good.
    Disposed,
}

/// Callback run for a [`NodeEvent`]. Receives the tree and the node the
/// listener was registered on.
pub type Listener = Box<dyn FnMut(&mut NodeTree, NodeId)>;

/// Token returned by [`NodeTree::subscribe`]. Pass it to
/// [`NodeTree::unsubscribe`] to remove exactly that listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub(crate) node: NodeId,
    pub(crate) event: NodeEvent,
    pub(crate) serial: u64,
}

impl Subscription {
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn event(&self) -> NodeEvent {
        self.event
    }
}

// ── Listeners ─────────────────────────────────────────────────────────────

struct Entry {
    event: NodeEvent,
    serial: u64,
    listener: Listener,
}

/// Observer list owned by a node.
///
/// During dispatch the entries are moved out so listeners can borrow the
/// tree mutably. Unsubscribing a moved-out entry is recorded in `cancelled`
/// and applied when the entries are merged back.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<Entry>,
    cancelled: Vec<u64>,
    dispatch_depth: u32,
}

impl Listeners {
    pub(crate) fn add(&mut self, event: NodeEvent, serial: u64, listener: Listener) {
        self.entries.push(Entry { event, serial, listener });
    }

    /// Returns `true` if the listener was found (or is currently dispatching).
    pub(crate) fn remove(&mut self, serial: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.serial != serial);
        if self.entries.len() != before {
            return true;
        }
        if self.dispatch_depth > 0 && !self.cancelled.contains(&serial) {
            self.cancelled.push(serial);
            return true;
        }
        false
    }

    pub(crate) fn has(&self, event: NodeEvent) -> bool {
        self.entries.iter().any(|e| e.event == event)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn take(&mut self) -> Taken {
        self.dispatch_depth += 1;
        Taken(std::mem::take(&mut self.entries))
    }

    /// Puts dispatched entries back in front of any added meanwhile.
    pub(crate) fn restore(&mut self, taken: Taken) {
        self.dispatch_depth = self.dispatch_depth.saturating_sub(1);
        let mut entries = taken.0;
        if !self.cancelled.is_empty() {
            let cancelled = &self.cancelled;
            entries.retain(|e| !cancelled.contains(&e.serial));
        }
        if self.dispatch_depth == 0 {
            self.cancelled.clear();
        }
        entries.append(&mut self.entries);
        self.entries = entries;
    }
}

/// Entries moved out of a [`Listeners`] for dispatch.
pub(crate) struct Taken(Vec<Entry>);

impl Taken {
    pub(crate) fn call(&mut self, event: NodeEvent, tree: &mut NodeTree, node: NodeId) -> usize {
        let mut called = 0;
        for entry in self.0.iter_mut().filter(|e| e.event == event) {
            (entry.listener)(tree, node);
            called += 1;
        }
        called
    }
}
