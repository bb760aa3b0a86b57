//! The node tree.
//!
//! Nodes live in a [`slotmap`] arena owned by [`NodeTree`] and are addressed
//! by [`NodeId`]. A node owns its children; the parent link is a plain id and
//! never keeps anything alive. Disposed ids stay invalid forever, even after
//! their slot is reused.

mod builder;
mod cascade;
mod query;
mod tree;

pub use builder::NodeBuilder;
pub use tree::NodeTree;

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use una_engine::coords::{Rect, Vec2};
use una_style::{ParseError, SelectorSubject};

use crate::clip::ClipRegion;
use crate::event::Listeners;
use crate::style::{ComputedStyle, Style};
use crate::stylesheet::StyleSheet;

slotmap::new_key_type! {
    /// Handle to a node in a [`NodeTree`].
    pub struct NodeId;
}

// ── NodeKind ──────────────────────────────────────────────────────────────

/// Closed set of node kinds. The kind decides the tag name used by selector
/// tag clauses and the kind-specific primitives drawn after the background.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NodeKind {
    /// Plain styled box, optionally with text.
    #[default]
    Element,
    /// Draws a filled sub-rect of the content box, `value / max` wide.
    ProgressBar { value: f32, max: f32 },
    /// A line across the content box along its longer axis.
    Separator,
}

impl NodeKind {
    /// Name matched by selector tag clauses (`progress { ... }`).
    pub fn tag_name(&self) -> &'static str {
        match self {
            NodeKind::Element => "node",
            NodeKind::ProgressBar { .. } => "progress",
            NodeKind::Separator => "separator",
        }
    }
}

// ── NodeBounds ────────────────────────────────────────────────────────────

/// Geometry from the last layout pass, in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeBounds {
    /// Margin box: the space the node takes in its parent.
    pub margin: Rect,
    /// Padding box: background, border and hit-testing use this.
    pub padding: Rect,
    /// Content box: children and text are placed inside it.
    pub content: Rect,
}

impl NodeBounds {
    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.margin = self.margin.translate(delta);
        self.padding = self.padding.translate(delta);
        self.content = self.content.translate(delta);
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Structural misuse of the tree. The tree is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeError {
    /// The id refers to a node that was disposed (or never existed).
    Disposed,
    /// The child must be removed from its current parent first.
    AlreadyHasParent,
    /// The child is the parent itself or one of its ancestors.
    WouldCreateCycle,
    /// The node is not a child of the given parent.
    NotAChild,
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Disposed => write!(f, "node has been disposed"),
            NodeError::AlreadyHasParent => write!(f, "node already has a parent; remove it first"),
            NodeError::WouldCreateCycle => write!(f, "appending would make a node its own ancestor"),
            NodeError::NotAChild => write!(f, "node is not a child of the given parent"),
        }
    }
}

impl std::error::Error for NodeError {}

/// A query selector failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorError {
    pub selector: String,
    pub source: ParseError,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid selector {:?}: {}", self.selector, self.source)
    }
}

impl std::error::Error for SelectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ── NodeData ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Dirty {
    pub style: bool,
    pub layout: bool,
}

/// Cached text measurement. Invalidated explicitly when the value, the
/// font metrics or the scale change, and re-measured when the wrap width
/// differs from the one it was taken at.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TextCache {
    pub size: Vec2,
    pub max_width: Option<f32>,
    pub valid: bool,
}

pub(crate) struct NodeData {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub tags: BTreeSet<String>,
    /// `tags` plus the parent's effective tags when `inherit_tags` is set.
    /// Refreshed by the style pass.
    pub effective_tags: BTreeSet<String>,
    pub inherit_tags: bool,
    pub parent: Option<NodeId>,
    /// Insertion order; sorted by `sort_index` on read.
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    pub value: Option<String>,
    pub inline_style: Style,
    pub stylesheet: Option<Rc<StyleSheet>>,
    pub computed: ComputedStyle,
    pub sort_index: i32,
    pub sortable: bool,
    pub scroll: Vec2,
    pub clip_key: Option<String>,
    /// Guard for the region published under `clip_key`; freeing the node
    /// removes the entry.
    pub clip_region: Option<ClipRegion>,
    pub listeners: Listeners,
    pub dirty: Dirty,
    pub text: TextCache,
    pub bounds: NodeBounds,
    /// Padding-box size from the measure pass.
    pub measured: Vec2,
    /// Stacked size of the children from the measure pass.
    pub content_extent: Vec2,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            id: None,
            classes: Vec::new(),
            tags: BTreeSet::new(),
            effective_tags: BTreeSet::new(),
            inherit_tags: false,
            parent: None,
            children: Vec::new(),
            kind,
            value: None,
            inline_style: Style::new(),
            stylesheet: None,
            computed: ComputedStyle::default(),
            sort_index: 0,
            sortable: false,
            scroll: Vec2::zero(),
            clip_key: None,
            clip_region: None,
            listeners: Listeners::default(),
            dirty: Dirty { style: true, layout: true },
            text: TextCache::default(),
            bounds: NodeBounds::default(),
            measured: Vec2::zero(),
            content_extent: Vec2::zero(),
        }
    }

    /// Non-empty text content.
    pub(crate) fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|s| !s.is_empty())
    }
}

// ── Selector matching ─────────────────────────────────────────────────────

/// A node as seen by selector matching.
pub(crate) struct NodeSubject<'a> {
    pub tag: &'static str,
    pub id: Option<&'a str>,
    pub classes: &'a [String],
    pub tags: &'a BTreeSet<String>,
}

impl<'a> NodeSubject<'a> {
    pub(crate) fn new(data: &'a NodeData, tags: &'a BTreeSet<String>) -> Self {
        Self { tag: data.kind.tag_name(), id: data.id.as_deref(), classes: &data.classes, tags }
    }
}

impl SelectorSubject for NodeSubject<'_> {
    fn tag_name(&self) -> &str {
        self.tag
    }

    fn id(&self) -> Option<&str> {
        self.id
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn has_pseudo(&self, pseudo: &str) -> bool {
        self.tags.contains(pseudo)
    }
}
