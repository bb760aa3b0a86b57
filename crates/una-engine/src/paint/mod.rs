//! Paint model shared between the node tree and hosts.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - four-corner gradients
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::Gradient;
