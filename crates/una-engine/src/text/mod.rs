//! Text measurement.
//!
//! The node tree never rasterizes glyphs; it only needs sizes for layout. Hosts
//! provide a [`TextMeasure`] implementation: [`FontSystem`] lays text out with
//! `fontdue`, [`FixedAdvance`] is a metrics-only fallback for hosts that
//! measure elsewhere and for tests.

mod fixed;
mod font_system;

pub use fixed::FixedAdvance;
pub use font_system::{FontId, FontLoadError, FontSystem};

use crate::coords::Vec2;

/// Measures laid-out text in screen pixels.
pub trait TextMeasure {
    /// Returns the bounding size of `text` rendered with `font` at `size`
    /// pixels, wrapped at `max_width` when given.
    ///
    /// Must be deterministic: equal arguments give equal results.
    fn measure(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2;
}

impl TextMeasure for FontSystem {
    fn measure(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.measure_text(text, font, size, max_width)
    }
}
