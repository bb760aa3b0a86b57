//! Una engine crate.
//!
//! This crate owns the host-facing primitives used by the node tree: geometry,
//! the paint model, the recorded draw list, input snapshots and text
//! measurement. It knows nothing about nodes, styles or layout.

pub mod coords;
pub mod input;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod text;
