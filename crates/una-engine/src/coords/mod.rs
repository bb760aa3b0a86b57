//! Coordinate and geometry types shared across the draw list and the node tree.
//!
//! Canonical CPU space:
//! - Screen pixels (already multiplied by the UI scale factor)
//! - Origin top-left
//! - +X right, +Y down

mod corner_radii;
mod rect;
mod vec2;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use vec2::Vec2;
