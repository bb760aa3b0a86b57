/// Per-root rendering options.
///
/// ```rust
/// use una_ui::config::UiConfig;
///
/// let config = UiConfig::new().scale(2.0).debug_bounds(true);
/// assert_eq!(config.scale, 2.0);
/// assert!(config.text_outline);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiConfig {
    /// DPI factor multiplied into every length. Changing it reflows the tree.
    pub scale: f32,
    /// Outline every node's margin and content box.
    pub debug_bounds: bool,
    /// Pixels scrolled per unit of wheel delta, before scaling.
    pub scroll_step: f32,
    /// Draw the text outline ring for nodes with an `outline-size`.
    pub text_outline: bool,
    /// Pointer travel in pixels before a press on a sortable child starts
    /// dragging it.
    pub drag_threshold: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { scale: 1.0, debug_bounds: false, scroll_step: 24.0, text_outline: true, drag_threshold: 4.0 }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-finite or non-positive values fall back to `1.0`.
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        self
    }

    pub fn debug_bounds(mut self, on: bool) -> Self {
        self.debug_bounds = on;
        self
    }

    pub fn scroll_step(mut self, step: f32) -> Self {
        self.scroll_step = step.max(0.0);
        self
    }

    pub fn text_outline(mut self, on: bool) -> Self {
        self.text_outline = on;
        self
    }

    pub fn drag_threshold(mut self, px: f32) -> Self {
        self.drag_threshold = px.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = UiConfig::default();
        assert_eq!(c.scale, 1.0);
        assert!(!c.debug_bounds);
        assert_eq!(c.scroll_step, 24.0);
    }

    #[test]
    fn invalid_scale_falls_back() {
        assert_eq!(UiConfig::new().scale(0.0).scale, 1.0);
        assert_eq!(UiConfig::new().scale(f32::NAN).scale, 1.0);
        assert_eq!(UiConfig::new().scale(1.5).scale, 1.5);
    }
}
