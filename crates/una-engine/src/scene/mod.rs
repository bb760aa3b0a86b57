//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store host-agnostic draw commands in paint order
//! - track the clip-rect stack so every command carries its effective clip
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`
//!
//! The host replays [`DrawList::items`] into its immediate-mode draw list
//! (ImGui `ImDrawList` or equivalent) once the render pass returns.

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use shapes::image::{ImageCmd, TextureId};
pub use shapes::line::LineCmd;
pub use shapes::rect::{FilledRectCmd, GradientRectCmd, RectOutlineCmd};
pub use shapes::text::TextCmd;
