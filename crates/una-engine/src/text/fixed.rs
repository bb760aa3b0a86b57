use crate::coords::Vec2;

use super::{FontId, TextMeasure};

/// Monospace metrics: every character advances `advance × size` pixels and
/// every line is `line_height × size` pixels tall.
///
/// Wrapping is greedy on spaces. A word longer than the wrap width is kept
/// on its own line rather than broken.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
    pub line_height: f32,
}

impl FixedAdvance {
    #[inline]
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self { advance, line_height }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(0.5, 1.2)
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str, _font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        let adv = self.advance * size;
        let line_h = self.line_height * size;

        let mut lines = 0usize;
        let mut widest = 0.0f32;

        for paragraph in text.split('\n') {
            let Some(max_w) = max_width else {
                lines += 1;
                widest = widest.max(paragraph.chars().count() as f32 * adv);
                continue;
            };

            let mut line_w = 0.0f32;
            let mut line_open = false;
            for word in paragraph.split(' ') {
                let word_w = word.chars().count() as f32 * adv;
                if !line_open {
                    line_w = word_w;
                    line_open = true;
                } else if line_w + adv + word_w <= max_w {
                    line_w += adv + word_w;
                } else {
                    lines += 1;
                    widest = widest.max(line_w);
                    line_w = word_w;
                }
            }
            lines += 1;
            widest = widest.max(line_w);
        }

        Vec2::new(widest, lines.max(1) as f32 * line_h)
    }
}
