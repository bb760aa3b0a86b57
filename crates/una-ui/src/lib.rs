//! Una UI: a retained node tree on top of `una-engine`.
//!
//! Nodes carry classes, pseudo-state tags, an inline [`Style`](style::Style)
//! and an optional [`StyleSheet`](stylesheet::StyleSheet) that applies to
//! their whole subtree. Every frame, [`UiRoot::render`](render::UiRoot::render)
//! dispatches pointer events, resolves styles, lays out what is dirty and
//! records draw commands into a [`DrawList`](una_engine::scene::DrawList)
//! that the host replays.
//!
//! # Quick start
//!
//! ```rust
//! use std::rc::Rc;
//! use una_ui::prelude::*;
//!
//! let sheet: StyleSheet = "
//!     #toolbar { flow: horizontal; gap: 4; padding: 4; }
//!     .item { size: 24 24; background-color: #303030ff; }
//!     .item:hover { background-color: #505050ff; }
//! "
//! .parse()
//! .unwrap();
//!
//! let mut tree = NodeTree::new();
//! let a = tree.build().class("item").finish().unwrap();
//! let b = tree.build().class("item").finish().unwrap();
//! let toolbar = tree.build().id("toolbar").stylesheet(Rc::new(sheet)).children([a, b]).finish().unwrap();
//!
//! let mut ui = UiRoot::new(UiConfig::new(), RenderContext::new(FixedAdvance::default()));
//! let mut draw_list = DrawList::new();
//! ui.render(&mut tree, toolbar, &mut draw_list, Vec2::zero(), &UiInput::default()).unwrap();
//!
//! assert_eq!(tree.bounds(toolbar).unwrap().padding.size, Vec2::new(60.0, 32.0));
//! assert_eq!(draw_list.len(), 2);
//! ```

pub mod clip;
pub mod config;
pub mod context;
pub mod event;
pub mod layout;
pub mod node;
mod painter;
pub mod render;
pub mod style;
pub mod stylesheet;

pub use node::{NodeId, NodeTree};
pub use render::{UiInput, UiRoot};

/// Everything needed to build and render a tree.
pub mod prelude {
    pub use crate::clip::{ClipRegion, ClipRegistry};
    pub use crate::config::UiConfig;
    pub use crate::context::{IconKey, IconLoader, RenderContext, TextureCache};
    pub use crate::event::{NodeEvent, Subscription};
    pub use crate::node::{NodeBounds, NodeError, NodeId, NodeKind, NodeTree, SelectorError};
    pub use crate::render::{UiInput, UiRoot};
    pub use crate::style::{Align, Anchor, BorderColor, ComputedStyle, Flow, Size, Spacing, Style};
    pub use crate::stylesheet::StyleSheet;

    pub use una_engine::coords::{CornerRadii, Rect, Vec2};
    pub use una_engine::input::MouseButton;
    pub use una_engine::paint::{Color, Gradient};
    pub use una_engine::scene::{DrawCmd, DrawList, TextureId};
    pub use una_engine::text::{FixedAdvance, FontId, TextMeasure};
}
