//! Inline style generation.
//!
//! Properties are produced in a fixed precedence order; a later step only
//! overrides an earlier one where it touches the same property. The user's raw
//! `inlineCss` declarations are applied last.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::css_parser::parse_declarations;
use crate::format::{fmt_num, is_zero_width, length, plain};
use crate::state::{Paint, PositionKind, StyleState};

/// An insertion-ordered map of CSS property names to values.
///
/// Re-inserting a property replaces its value in place, keeping the position of
/// the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.entries.iter().position(|(p, _)| p == property)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Renders a `style` attribute body: `prop: value; prop: value`.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(p, v)| format!("{}: {}", p, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (property, value) in &self.entries {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}

/// Generates the inline style map for `state`. Not breakpoint dependent.
pub fn generate_styles(state: &StyleState) -> StyleMap {
    let mut styles = StyleMap::new();

    colors(state, &mut styles);
    typography(state, &mut styles);
    border(state, &mut styles);
    border_radius(state, &mut styles);
    transform(state, &mut styles);
    if state.transforms_3d.perspective > 0.0 {
        styles.insert(
            "perspective",
            format!("{}px", fmt_num(state.transforms_3d.perspective * 100.0)),
        );
    }
    filter(state, &mut styles);
    if state.effects.backdrop_blur > 0.0 {
        styles.insert(
            "backdrop-filter",
            format!("blur({}px)", fmt_num(state.effects.backdrop_blur)),
        );
    }
    if let Some(shadow) = state.effects.shadow.box_shadow() {
        styles.insert("box-shadow", shadow);
    }
    if state.effects.opacity != 100.0 {
        styles.insert("opacity", fmt_num(state.effects.opacity / 100.0));
    }
    spacing(state, &mut styles);
    dimensions(state, &mut styles);
    position(state, &mut styles);

    for (property, value) in parse_declarations(&state.inline_css) {
        styles.insert(property, value);
    }
    styles
}

fn colors(state: &StyleState, styles: &mut StyleMap) {
    match &state.appearance.background_color {
        Paint::Gradient(gradient) => {
            styles.insert("background-color", "transparent");
            styles.insert("background-image", gradient.to_css());
        }
        paint => {
            let color = paint.to_css().unwrap_or_else(|| "transparent".to_string());
            styles.insert("background-color", color);
        }
    }
    let text = plain(&state.typography.text_color).unwrap_or_else(|| "inherit".to_string());
    styles.insert("color", text);
}

fn typography(state: &StyleState, styles: &mut StyleMap) {
    let t = &state.typography;
    let family = match t.font_family.trim() {
        "" | "sans" => "ui-sans-serif, system-ui, sans-serif".to_string(),
        "serif" => "ui-serif, Georgia, serif".to_string(),
        "mono" => "ui-monospace, SFMono-Regular, monospace".to_string(),
        other => other.to_string(),
    };
    styles.insert("font-family", family);
    if let Some(size) = length(&t.font_size) {
        styles.insert("font-size", size);
    }
    if let Some(weight) = plain(&t.font_weight) {
        styles.insert("font-weight", weight);
    }
    if let Some(line_height) = plain(&t.line_height) {
        styles.insert("line-height", line_height);
    }
    if let Some(spacing) = length(&t.letter_spacing) {
        styles.insert("letter-spacing", spacing);
    }
    styles.insert("text-align", t.text_align.as_str());
}

fn border(state: &StyleState, styles: &mut StyleMap) {
    let b = &state.border;
    let width = (!is_zero_width(&b.width)).then(|| length(&b.width)).flatten();
    let color = plain(&b.color);
    match (width, color) {
        (Some(width), Some(color)) => {
            styles.insert("border", format!("{} {} {}", width, b.style.as_str(), color));
        }
        (Some(width), None) => {
            styles.insert("border-width", width);
            styles.insert("border-style", b.style.as_str());
        }
        (None, Some(color)) => styles.insert("border-color", color),
        (None, None) => {}
    }
}

fn border_radius(state: &StyleState, styles: &mut StyleMap) {
    let radius = &state.border.radius;
    if radius.all > 0.0 {
        styles.insert("border-radius", format!("{}px", fmt_num(radius.all)));
        return;
    }
    let corners = radius.corners();
    if corners.iter().any(|c| *c > 0.0) {
        let value = corners
            .iter()
            .map(|c| format!("{}px", fmt_num(*c)))
            .collect::<Vec<_>>()
            .join(" ");
        styles.insert("border-radius", value);
    }
}

fn transform(state: &StyleState, styles: &mut StyleMap) {
    let t = &state.transforms;
    let t3 = &state.transforms_3d;
    let mut functions = Vec::new();

    if t.translate_x != 0.0 {
        functions.push(format!("translateX({}px)", fmt_num(t.translate_x)));
    }
    if t.translate_y != 0.0 {
        functions.push(format!("translateY({}px)", fmt_num(t.translate_y)));
    }
    if t.rotate != 0.0 {
        functions.push(format!("rotate({}deg)", fmt_num(t.rotate)));
    }
    if t.scale != 100.0 {
        functions.push(format!("scale({})", fmt_num(t.scale / 100.0)));
    }
    if t.skew_x != 0.0 {
        functions.push(format!("skewX({}deg)", fmt_num(t.skew_x)));
    }
    if t.skew_y != 0.0 {
        functions.push(format!("skewY({}deg)", fmt_num(t.skew_y)));
    }
    for (name, value) in [
        ("rotateX", t3.rotate_x),
        ("rotateY", t3.rotate_y),
        ("rotateZ", t3.rotate_z),
    ] {
        if value != 0.0 {
            functions.push(format!("{}({}deg)", name, fmt_num(value)));
        }
    }

    if !functions.is_empty() {
        styles.insert("transform", functions.join(" "));
    }
}

fn filter(state: &StyleState, styles: &mut StyleMap) {
    let fx = &state.effects;
    let mut functions = Vec::new();

    if fx.blur != 0.0 {
        functions.push(format!("blur({}px)", fmt_num(fx.blur)));
    }
    for (name, value) in [
        ("brightness", fx.brightness),
        ("contrast", fx.contrast),
        ("saturate", fx.saturation),
    ] {
        if value != 100.0 {
            functions.push(format!("{}({}%)", name, fmt_num(value)));
        }
    }
    if fx.hue_rotate != 0.0 {
        functions.push(format!("hue-rotate({}deg)", fmt_num(fx.hue_rotate)));
    }
    for (name, value) in [
        ("grayscale", fx.grayscale),
        ("invert", fx.invert),
        ("sepia", fx.sepia),
    ] {
        if value != 0.0 {
            functions.push(format!("{}({}%)", name, fmt_num(value)));
        }
    }

    if !functions.is_empty() {
        styles.insert("filter", functions.join(" "));
    }
}

fn spacing(state: &StyleState, styles: &mut StyleMap) {
    let p = &state.padding;
    let sides = [&p.top, &p.right, &p.bottom, &p.left].map(|s| length(s));
    if sides.iter().any(Option::is_some) {
        let value = sides
            .map(|s| s.unwrap_or_else(|| "0".to_string()))
            .join(" ");
        styles.insert("padding", value);
    }

    let y = length(&state.margin.y);
    let x = length(&state.margin.x);
    if y.is_some() || x.is_some() {
        let or_zero = |v: Option<String>| v.unwrap_or_else(|| "0".to_string());
        styles.insert("margin", format!("{} {}", or_zero(y), or_zero(x)));
    }
}

fn dimensions(state: &StyleState, styles: &mut StyleMap) {
    let s = &state.size;
    for (property, value) in [
        ("width", &s.width),
        ("height", &s.height),
        ("max-width", &s.max_width),
        ("max-height", &s.max_height),
        ("min-width", &s.min_width),
        ("min-height", &s.min_height),
    ] {
        if let Some(v) = length(value) {
            styles.insert(property, v);
        }
    }
}

fn position(state: &StyleState, styles: &mut StyleMap) {
    let p = &state.position;
    if p.kind == PositionKind::Static {
        return;
    }
    styles.insert("position", p.kind.as_str());
    for (property, value) in [("left", &p.l), ("top", &p.t), ("right", &p.r), ("bottom", &p.b)] {
        if let Some(v) = length(value) {
            styles.insert(property, v);
        }
    }
    if let Some(z) = plain(&p.z_index) {
        styles.insert("z-index", z);
    }
}
