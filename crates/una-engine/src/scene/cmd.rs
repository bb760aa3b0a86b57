use crate::scene::shapes::image::ImageCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::rect::{FilledRectCmd, GradientRectCmd, RectOutlineCmd};
use crate::scene::shapes::text::TextCmd;

/// Host-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - implement push helpers inside that shape module
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FilledRect(FilledRectCmd),
    GradientRect(GradientRectCmd),
    RectOutline(RectOutlineCmd),
    Line(LineCmd),
    Image(ImageCmd),
    Text(TextCmd),
}
