//! Input snapshot types.
//!
//! Public API is host-agnostic. The host translates its own input state
//! (ImGui IO, a window system, a test script) into one [`FrameInput`] per frame.

mod frame;
mod types;

pub use frame::FrameInput;
pub use types::{Modifiers, MouseButton};
