//! Style value model.
//!
//! [`Style`] is a sparse fragment: every property is an `Option`, and `None`
//! means "unset, fall through". Fragments come from stylesheet rules and from
//! a node's inline style, and are overlaid right-biased in cascade order.
//!
//! [`ComputedStyle`] is the dense result for one node after the cascade,
//! inheritance and defaults have been applied.

mod spacing;
mod value;

pub use spacing::Spacing;
pub use value::{Align, Anchor, BorderColor, Flow, Size};

use una_engine::coords::{Rect, Vec2};
use una_engine::paint::{Color, Gradient};
use una_engine::scene::TextureId;
use una_engine::text::FontId;

/// Font size used when neither the node nor any ancestor sets one.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

// ── Style ─────────────────────────────────────────────────────────────────

macro_rules! style_props {
    ($( $(#[$doc:meta])* $name:ident : $ty:ty ),* $(,)?) => {
        /// A sparse set of style properties.
        ///
        /// Build one with the chained setters:
        ///
        /// ```rust
        /// use una_ui::style::{Flow, Spacing, Style};
        ///
        /// let s = Style::new().flow(Flow::Vertical).padding(Spacing::all(4.0)).gap(2.0);
        /// assert_eq!(s.gap, Some(2.0));
        /// assert!(s.color.is_none());
        /// ```
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct Style {
            $( $(#[$doc])* pub $name: Option<$ty>, )*
        }

        impl Style {
            $(
                #[inline]
                #[must_use]
                pub fn $name(mut self, value: $ty) -> Self {
                    self.$name = Some(value);
                    self
                }
            )*

            /// Right-biased overlay: every property set on `top` replaces ours.
            pub fn overlay(&mut self, top: &Style) {
                $( if top.$name.is_some() { self.$name = top.$name; } )*
            }

            /// `true` when no property is set.
            pub fn is_empty(&self) -> bool {
                true $( && self.$name.is_none() )*
            }
        }
    };
}

style_props! {
    /// Padding-box width; `0` is auto.
    width: f32,
    /// Padding-box height; `0` is auto.
    height: f32,
    margin: Spacing,
    padding: Spacing,
    /// Space between consecutive children along the flow axis.
    gap: f32,
    flow: Flow,
    /// Where this node sits inside its parent's content box.
    anchor: Anchor,
    /// Fill the parent's content box on the cross axis.
    stretch: bool,
    /// `false` clips children to the padding box and enables scrolling.
    overflow: bool,
    /// Foreground: text, progress fill, separator line. Inherited.
    color: Color,
    background_color: Color,
    /// Takes precedence over `background_color` when both are set.
    background_gradient: Gradient,
    border_color: BorderColor,
    border_width: Spacing,
    border_radius: f32,
    /// Inset outline drawn inside the padding box.
    stroke_color: Color,
    stroke_width: f32,
    /// Inherited.
    font: FontId,
    /// Inherited.
    font_size: f32,
    /// Multiplier applied to measured text height. Inherited.
    line_height: f32,
    /// Anchor of the text run inside the content box.
    text_align: Anchor,
    /// Inherited.
    word_wrap: bool,
    text_offset: Vec2,
    /// Inherited.
    outline_color: Color,
    /// Radius of the text outline ring in pixels. Inherited.
    outline_size: f32,
    /// Multiplied with the parent's effective opacity.
    opacity: f32,
    is_visible: bool,
    image: TextureId,
    /// Resolved through the render context's texture cache.
    icon_id: u32,
    /// Texture sub-rect in UV space.
    image_uv: Rect,
    image_inset: Spacing,
    image_grayscale: bool,
}

impl Style {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `width` and `height` together.
    #[inline]
    #[must_use]
    pub fn size(self, size: Size) -> Self {
        self.width(size.width).height(size.height)
    }

    /// `self` overlaid with `top`.
    #[inline]
    #[must_use]
    pub fn merged(mut self, top: &Style) -> Self {
        self.overlay(top);
        self
    }
}

// ── ComputedStyle ─────────────────────────────────────────────────────────

/// Fully resolved style of one node, in unscaled units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub size: Size,
    pub margin: Spacing,
    pub padding: Spacing,
    pub gap: f32,
    pub flow: Flow,
    pub anchor: Anchor,
    pub stretch: bool,
    pub overflow: bool,
    pub color: Color,
    pub background_color: Option<Color>,
    pub background_gradient: Option<Gradient>,
    pub border_color: BorderColor,
    pub border_width: Spacing,
    pub border_radius: f32,
    pub stroke_color: Option<Color>,
    pub stroke_width: f32,
    pub font: FontId,
    pub font_size: f32,
    pub line_height: f32,
    pub text_align: Anchor,
    pub word_wrap: bool,
    pub text_offset: Vec2,
    pub outline_color: Option<Color>,
    pub outline_size: f32,
    pub opacity: f32,
    pub is_visible: bool,
    pub image: Option<TextureId>,
    pub icon_id: Option<u32>,
    pub image_uv: Rect,
    pub image_inset: Spacing,
    pub image_grayscale: bool,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            size: Size::auto(),
            margin: Spacing::zero(),
            padding: Spacing::zero(),
            gap: 0.0,
            flow: Flow::Horizontal,
            anchor: Anchor::None,
            stretch: false,
            overflow: true,
            color: Color::white(),
            background_color: None,
            background_gradient: None,
            border_color: BorderColor::default(),
            border_width: Spacing::zero(),
            border_radius: 0.0,
            stroke_color: None,
            stroke_width: 0.0,
            font: FontId::DEFAULT,
            font_size: DEFAULT_FONT_SIZE,
            line_height: 1.0,
            text_align: Anchor::TopLeft,
            word_wrap: false,
            text_offset: Vec2::zero(),
            outline_color: None,
            outline_size: 0.0,
            opacity: 1.0,
            is_visible: true,
            image: None,
            icon_id: None,
            image_uv: Rect::new(0.0, 0.0, 1.0, 1.0),
            image_inset: Spacing::zero(),
            image_grayscale: false,
        }
    }
}

impl ComputedStyle {
    /// Applies `style` over the defaults. Inherited properties that `style`
    /// leaves unset are taken from `parent`.
    pub fn resolve(style: &Style, parent: Option<&ComputedStyle>) -> Self {
        let d = ComputedStyle::default();
        let inherited = parent.unwrap_or(&d);

        Self {
            size: Size::new(style.width.unwrap_or(d.size.width), style.height.unwrap_or(d.size.height)),
            margin: style.margin.unwrap_or(d.margin),
            padding: style.padding.unwrap_or(d.padding),
            gap: style.gap.unwrap_or(d.gap),
            flow: style.flow.unwrap_or(d.flow),
            anchor: style.anchor.unwrap_or(d.anchor),
            stretch: style.stretch.unwrap_or(d.stretch),
            overflow: style.overflow.unwrap_or(d.overflow),
            color: style.color.unwrap_or(inherited.color),
            background_color: style.background_color,
            background_gradient: style.background_gradient,
            border_color: style.border_color.unwrap_or(d.border_color),
            border_width: style.border_width.unwrap_or(d.border_width),
            border_radius: style.border_radius.unwrap_or(d.border_radius),
            stroke_color: style.stroke_color,
            stroke_width: style.stroke_width.unwrap_or(d.stroke_width),
            font: style.font.unwrap_or(inherited.font),
            font_size: style.font_size.unwrap_or(inherited.font_size),
            line_height: style.line_height.unwrap_or(inherited.line_height),
            text_align: style.text_align.unwrap_or(d.text_align),
            word_wrap: style.word_wrap.unwrap_or(inherited.word_wrap),
            text_offset: style.text_offset.unwrap_or(d.text_offset),
            outline_color: style.outline_color.or(inherited.outline_color),
            outline_size: style.outline_size.unwrap_or(inherited.outline_size),
            opacity: style.opacity.unwrap_or(d.opacity).clamp(0.0, 1.0),
            is_visible: style.is_visible.unwrap_or(d.is_visible),
            image: style.image,
            icon_id: style.icon_id,
            image_uv: style.image_uv.unwrap_or(d.image_uv),
            image_inset: style.image_inset.unwrap_or(d.image_inset),
            image_grayscale: style.image_grayscale.unwrap_or(d.image_grayscale),
        }
    }

    /// `true` if switching from `other` to `self` can move or resize boxes.
    pub fn affects_layout(&self, other: &ComputedStyle) -> bool {
        self.size != other.size
            || self.margin != other.margin
            || self.padding != other.padding
            || self.gap != other.gap
            || self.flow != other.flow
            || self.anchor != other.anchor
            || self.stretch != other.stretch
            || self.overflow != other.overflow
            || self.is_visible != other.is_visible
            || self.affects_text(other)
    }

    /// `true` if switching from `other` to `self` invalidates text measurement.
    pub fn affects_text(&self, other: &ComputedStyle) -> bool {
        self.font != other.font
            || self.font_size != other.font_size
            || self.line_height != other.line_height
            || self.word_wrap != other.word_wrap
    }
}
