//! Stylesheets and the cascade.
//!
//! A [`StyleSheet`] is an ordered list of `(selector list, style)` rules.
//! Sheets are either built in code or parsed from source text:
//!
//! ```rust
//! use una_ui::stylesheet::StyleSheet;
//!
//! let sheet: StyleSheet = r#"
//!     .item { padding: 4 8; color: #e0e0e0; }
//!     .item:hover { background-color: #3a3a3aff; }
//! "#.parse().unwrap();
//! assert_eq!(sheet.len(), 2);
//! ```

use std::str::FromStr;

use una_engine::coords::{Rect, Vec2};
use una_engine::paint::{Color, Gradient};
use una_engine::scene::TextureId;
use una_engine::text::FontId;
use una_style::{Declaration, ParseError, SelectorList, SelectorSubject, Specificity, Value};

use crate::style::{Anchor, BorderColor, Flow, Spacing, Style};

// ── Rule ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: SelectorList,
    pub style: Style,
}

// ── StyleSheet ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses stylesheet source text.
    ///
    /// Syntax errors fail the whole sheet. Unknown property names and values
    /// of the wrong shape are skipped with a warning.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        let source = una_style::parse_stylesheet(src)?;
        let mut sheet = Self::new();
        for rule in source.rules {
            let mut style = Style::new();
            for decl in &rule.declarations {
                if let Err(msg) = apply_declaration(&mut style, decl) {
                    log::warn!("stylesheet {}:{}: {msg}; declaration skipped", decl.line, decl.col);
                }
            }
            sheet.add_rule(rule.selectors, style);
        }
        log::debug!("parsed stylesheet with {} rules", sheet.len());
        Ok(sheet)
    }

    /// Appends a rule. Later rules win over earlier ones at equal specificity.
    pub fn add_rule(&mut self, selectors: impl Into<SelectorList>, style: Style) {
        self.rules.push(Rule { selectors: selectors.into(), style });
    }

    /// Builder form of [`add_rule`](Self::add_rule) taking selector source text.
    pub fn rule(mut self, selectors: &str, style: Style) -> Result<Self, ParseError> {
        let selectors: SelectorList = selectors.parse()?;
        self.add_rule(selectors, style);
        Ok(self)
    }

    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merged style of every rule in this sheet matching `subject`.
    pub fn resolve<S: SelectorSubject + ?Sized>(&self, subject: &S) -> Style {
        cascade([self], subject)
    }
}

impl FromStr for StyleSheet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Cascade ───────────────────────────────────────────────────────────────

/// Merges every rule matching `subject` across `sheets`.
///
/// Matches are ordered by `(specificity, declaration order)` and overlaid in
/// that order, so the most specific rule wins and the later one wins a tie.
/// Declaration order runs across the concatenation of `sheets`, which lets a
/// nearer sheet listed last win ties against farther ones.
pub fn cascade<'a, S, I>(sheets: I, subject: &S) -> Style
where
    S: SelectorSubject + ?Sized,
    I: IntoIterator<Item = &'a StyleSheet>,
{
    let mut matched: Vec<(Specificity, usize, &Style)> = Vec::new();
    let mut order = 0usize;
    for sheet in sheets {
        for rule in &sheet.rules {
            if let Some(spec) = rule.selectors.match_specificity(subject) {
                matched.push((spec, order, &rule.style));
            }
            order += 1;
        }
    }
    matched.sort_by_key(|&(spec, order, _)| (spec, order));

    let mut out = Style::new();
    for (_, _, style) in matched {
        out.overlay(style);
    }
    out
}

// ── Declarations ──────────────────────────────────────────────────────────

fn apply_declaration(style: &mut Style, decl: &Declaration) -> Result<(), String> {
    let v = &decl.values;
    match decl.name.as_str() {
        "size" => {
            let n = numbers(v)?;
            let (w, h) = match *n.as_slice() {
                [s] => (s, s),
                [w, h] => (w, h),
                _ => return Err("size takes 1 or 2 numbers".into()),
            };
            style.width = Some(w);
            style.height = Some(h);
        }
        "width" => style.width = Some(number(v)?),
        "height" => style.height = Some(number(v)?),
        "margin" => style.margin = Some(spacing(v)?),
        "padding" => style.padding = Some(spacing(v)?),
        "gap" => style.gap = Some(number(v)?),
        "flow" => style.flow = Some(keyword(v, Flow::from_name)?),
        "anchor" => style.anchor = Some(keyword(v, Anchor::from_name)?),
        "stretch" => style.stretch = Some(boolean(v)?),
        "overflow" => style.overflow = Some(boolean(v)?),
        "color" => style.color = Some(color(v)?),
        "background-color" => style.background_color = Some(color(v)?),
        "background-gradient" => style.background_gradient = Some(gradient(v)?),
        "border-color" => {
            let colors = v.iter().map(|x| color(std::slice::from_ref(x))).collect::<Result<Vec<_>, _>>()?;
            style.border_color = Some(
                BorderColor::from_shorthand(&colors).ok_or("border-color takes 1 to 4 colors")?,
            );
        }
        "border-width" => style.border_width = Some(spacing(v)?),
        "border-radius" => style.border_radius = Some(number(v)?),
        "stroke-color" => style.stroke_color = Some(color(v)?),
        "stroke-width" => style.stroke_width = Some(number(v)?),
        "font" => style.font = Some(FontId::new(index(v)? as usize)),
        "font-size" => style.font_size = Some(number(v)?),
        "line-height" => style.line_height = Some(number(v)?),
        "text-align" => style.text_align = Some(keyword(v, Anchor::from_name)?),
        "word-wrap" => style.word_wrap = Some(boolean(v)?),
        "text-offset" => {
            let n = numbers(v)?;
            let [x, y] = *n.as_slice() else {
                return Err("text-offset takes 2 numbers".into());
            };
            style.text_offset = Some(Vec2::new(x, y));
        }
        "outline-color" => style.outline_color = Some(color(v)?),
        "outline-size" => style.outline_size = Some(number(v)?),
        "opacity" => style.opacity = Some(number(v)?),
        "is-visible" => style.is_visible = Some(boolean(v)?),
        "image" => style.image = Some(TextureId(u64::from(index(v)?))),
        "icon-id" => style.icon_id = Some(index(v)?),
        "image-uv" => {
            let n = numbers(v)?;
            let [u0, v0, u1, v1] = *n.as_slice() else {
                return Err("image-uv takes 4 numbers: u0 v0 u1 v1".into());
            };
            style.image_uv = Some(Rect::from_corners(Vec2::new(u0, v0), Vec2::new(u1, v1)));
        }
        "image-inset" => style.image_inset = Some(spacing(v)?),
        "image-grayscale" => style.image_grayscale = Some(boolean(v)?),
        other => return Err(format!("unknown property '{other}'")),
    }
    Ok(())
}

fn single(values: &[Value]) -> Result<&Value, String> {
    match values {
        [v] => Ok(v),
        _ => Err(format!("expected one value, got {}", values.len())),
    }
}

fn number(values: &[Value]) -> Result<f32, String> {
    single(values)?.as_number().ok_or_else(|| "expected a number".to_string())
}

fn numbers(values: &[Value]) -> Result<Vec<f32>, String> {
    values
        .iter()
        .map(|v| v.as_number().ok_or_else(|| "expected numbers".to_string()))
        .collect()
}

fn index(values: &[Value]) -> Result<u32, String> {
    let n = number(values)?;
    if n < 0.0 || n.fract() != 0.0 || n > u32::MAX as f32 {
        return Err(format!("expected a non-negative integer, got {n}"));
    }
    Ok(n as u32)
}

fn spacing(values: &[Value]) -> Result<Spacing, String> {
    Spacing::from_shorthand(&numbers(values)?).ok_or_else(|| "expected 1 to 4 numbers".to_string())
}

fn boolean(values: &[Value]) -> Result<bool, String> {
    match single(values)?.as_ident() {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        _ => Err("expected true or false".into()),
    }
}

fn keyword<T>(values: &[Value], parse: impl Fn(&str) -> Option<T>) -> Result<T, String> {
    let v = single(values)?;
    v.as_ident()
        .and_then(parse)
        .ok_or_else(|| format!("unknown keyword {v:?}"))
}

fn color(values: &[Value]) -> Result<Color, String> {
    match single(values)? {
        Value::Color([r, g, b, a]) => Ok(Color::from_srgb_u8(*r, *g, *b, *a)),
        Value::Ident(name) if name == "transparent" => Ok(Color::transparent()),
        other => Err(format!("expected a color, got {other:?}")),
    }
}

/// `horizontal <left> <right>`, `vertical <top> <bottom>`, or four corner
/// colors `tl tr br bl`.
fn gradient(values: &[Value]) -> Result<Gradient, String> {
    match values {
        [Value::Ident(dir), a, b] => {
            let (a, b) = (color(std::slice::from_ref(a))?, color(std::slice::from_ref(b))?);
            match dir.as_str() {
                "horizontal" => Ok(Gradient::horizontal(a, b)),
                "vertical" => Ok(Gradient::vertical(a, b)),
                _ => Err(format!("unknown gradient direction '{dir}'")),
            }
        }
        [tl, tr, br, bl] => Ok(Gradient::new(
            color(std::slice::from_ref(tl))?,
            color(std::slice::from_ref(tr))?,
            color(std::slice::from_ref(br))?,
            color(std::slice::from_ref(bl))?,
        )),
        _ => Err("background-gradient takes a direction and 2 colors, or 4 colors".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Subject {
        id: Option<&'static str>,
        classes: Vec<&'static str>,
        pseudos: Vec<&'static str>,
    }

    impl SelectorSubject for Subject {
        fn tag_name(&self) -> &str { "node" }
        fn id(&self) -> Option<&str> { self.id }
        fn has_class(&self, class: &str) -> bool { self.classes.contains(&class) }
        fn has_pseudo(&self, pseudo: &str) -> bool { self.pseudos.contains(&pseudo) }
    }

    fn xy() -> Subject {
        Subject { id: Some("x"), classes: vec!["y"], pseudos: vec![] }
    }

    fn a() -> Color { Color::from_rgba_u32(0xff0000ff) }
    fn b() -> Color { Color::from_rgba_u32(0x00ff00ff) }

    #[test]
    fn id_beats_class_regardless_of_order() {
        let id_first = StyleSheet::new()
            .rule("#x", Style::new().color(a())).unwrap()
            .rule(".y", Style::new().color(b())).unwrap();
        let class_first = StyleSheet::new()
            .rule(".y", Style::new().color(b())).unwrap()
            .rule("#x", Style::new().color(a())).unwrap();
        assert_eq!(id_first.resolve(&xy()).color, Some(a()));
        assert_eq!(class_first.resolve(&xy()).color, Some(a()));
    }

    #[test]
    fn later_rule_wins_at_equal_specificity() {
        let sheet = StyleSheet::new()
            .rule(".y", Style::new().color(a())).unwrap()
            .rule(".y", Style::new().color(b())).unwrap();
        assert_eq!(sheet.resolve(&xy()).color, Some(b()));
    }

    #[test]
    fn unset_properties_fall_through() {
        let sheet = StyleSheet::new()
            .rule(".y", Style::new().gap(3.0).color(b())).unwrap()
            .rule("#x", Style::new().color(a())).unwrap();
        let s = sheet.resolve(&xy());
        assert_eq!(s.color, Some(a()));
        assert_eq!(s.gap, Some(3.0));
    }

    #[test]
    fn pseudo_state_counts_like_a_class() {
        let hovered = Subject { id: None, classes: vec!["y"], pseudos: vec!["hover"] };
        let sheet = StyleSheet::new()
            .rule(".y:hover", Style::new().color(a())).unwrap()
            .rule(".y.z, .y", Style::new().color(b())).unwrap();
        // (0,2,0) beats (0,1,0) even though the second rule is later.
        assert_eq!(sheet.resolve(&hovered).color, Some(a()));
    }

    #[test]
    fn unmatched_subject_resolves_empty() {
        let sheet = StyleSheet::new().rule(".nope", Style::new().gap(1.0)).unwrap();
        assert!(sheet.resolve(&xy()).is_empty());
    }

    #[test]
    fn nearer_sheet_wins_ties_across_sheets() {
        let outer = StyleSheet::new().rule(".y", Style::new().color(a())).unwrap();
        let inner = StyleSheet::new().rule(".y", Style::new().color(b())).unwrap();
        assert_eq!(cascade([&outer, &inner], &xy()).color, Some(b()));
        // specificity still beats proximity
        let outer = StyleSheet::new().rule("#x", Style::new().color(a())).unwrap();
        assert_eq!(cascade([&outer, &inner], &xy()).color, Some(a()));
    }

    #[test]
    fn cascade_is_deterministic() {
        let sheet: StyleSheet = ".y { gap: 2; color: #fff } #x { padding: 1 2 }".parse().unwrap();
        assert_eq!(sheet.resolve(&xy()), sheet.resolve(&xy()));
    }

    #[test]
    fn source_properties_map_to_style() {
        let sheet: StyleSheet = r#"
            .y {
                size: 100 20;
                padding: 4 8;
                flow: vertical;
                anchor: middle-right;
                overflow: false;
                background-color: #ff000080;
                border-color: #fff #000;
                border-width: 1;
                background-gradient: vertical #000 #fff;
                font-size: 16px;
                text-offset: 1 -1;
                icon-id: 60001;
                image-uv: 0 0 0.5 0.5;
            }
        "#.parse().unwrap();
        let s = sheet.resolve(&xy());
        assert_eq!((s.width, s.height), (Some(100.0), Some(20.0)));
        assert_eq!(s.padding, Some(Spacing::symmetric(4.0, 8.0)));
        assert_eq!(s.flow, Some(Flow::Vertical));
        assert_eq!(s.anchor, Some(Anchor::MiddleRight));
        assert_eq!(s.overflow, Some(false));
        assert_eq!(s.background_color, Some(Color::from_srgb_u8(255, 0, 0, 128)));
        assert_eq!(s.border_color.and_then(|c| c.top), Some(Color::white()));
        assert_eq!(s.border_color.and_then(|c| c.right), Some(Color::black()));
        assert_eq!(s.border_width, Some(Spacing::all(1.0)));
        assert_eq!(s.background_gradient, Some(Gradient::vertical(Color::black(), Color::white())));
        assert_eq!(s.font_size, Some(16.0));
        assert_eq!(s.text_offset, Some(Vec2::new(1.0, -1.0)));
        assert_eq!(s.icon_id, Some(60001));
        assert_eq!(s.image_uv, Some(Rect::new(0.0, 0.0, 0.5, 0.5)));
    }

    #[test]
    fn width_and_height_merge_into_size() {
        let sheet: StyleSheet = ".y { width: 30; height: 12 }".parse().unwrap();
        let s = sheet.resolve(&xy());
        assert_eq!((s.width, s.height), (Some(30.0), Some(12.0)));
    }

    #[test]
    fn one_axis_rule_keeps_the_other_axis() {
        let sheet: StyleSheet = ".y { width: 30; } #x.y { height: 12; }".parse().unwrap();
        let s = sheet.resolve(&xy());
        assert_eq!((s.width, s.height), (Some(30.0), Some(12.0)));

        let sheet: StyleSheet = ".y { size: 30 40; } #x { height: 12; }".parse().unwrap();
        let s = sheet.resolve(&xy());
        assert_eq!((s.width, s.height), (Some(30.0), Some(12.0)));
    }

    #[test]
    fn bad_declarations_are_skipped_not_fatal() {
        let sheet: StyleSheet = ".y { bogus: 1; gap: red; flow: sideways; padding: 2 }".parse().unwrap();
        let s = sheet.resolve(&xy());
        assert_eq!(s.padding, Some(Spacing::all(2.0)));
        assert!(s.gap.is_none());
        assert!(s.flow.is_none());
    }

    #[test]
    fn syntax_errors_carry_position() {
        let err = StyleSheet::parse(".y {\n  gap: 1;\n  .z { }").unwrap_err();
        assert_eq!(err.line, 3);
    }
}
