//! The editable style state of one element.
//!
//! [`StyleState`] is fully defaulted: no field is ever absent. "Unset" is a
//! sentinel per field (empty string for colors and spacing, `"auto"` for
//! sizes, `100` for percentage baselines, `0` for additive offsets).

mod paint;
mod sections;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::merge::deep_merge;
use crate::patch::coerce;

pub use paint::{Gradient, GradientKind, GradientStop, Paint};
pub use sections::{
    Appearance, Border, BorderStyle, Effects, Margin, Padding, Position, PositionKind, Radius,
    Shadow, Size, TextAlign, Transforms, Transforms3D, Typography,
};

/// Allow-listed element tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    #[default]
    Div,
    Section,
    Article,
    Aside,
    Header,
    Footer,
    Main,
    Nav,
    P,
    Span,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    A,
    Button,
    Label,
    Blockquote,
    Ul,
    Ol,
    Li,
}

impl Tag {
    /// The element name as written in markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Section => "section",
            Tag::Article => "article",
            Tag::Aside => "aside",
            Tag::Header => "header",
            Tag::Footer => "footer",
            Tag::Main => "main",
            Tag::Nav => "nav",
            Tag::P => "p",
            Tag::Span => "span",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::A => "a",
            Tag::Button => "button",
            Tag::Label => "label",
            Tag::Blockquote => "blockquote",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every visual attribute of one edited element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleState {
    pub tag: Tag,
    pub element_id: String,
    pub link: String,
    pub text_content: String,
    /// User-authored utility classes appended after the generated ones.
    pub tailwind_classes: String,
    /// User-authored CSS declarations applied over the generated styles.
    pub inline_css: String,
    pub appearance: Appearance,
    pub typography: Typography,
    pub border: Border,
    pub effects: Effects,
    pub padding: Padding,
    pub margin: Margin,
    pub size: Size,
    pub position: Position,
    pub transforms: Transforms,
    #[serde(rename = "transforms3D")]
    pub transforms_3d: Transforms3D,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            tag: Tag::Div,
            element_id: String::new(),
            link: String::new(),
            text_content: "Edit me".to_string(),
            tailwind_classes: String::new(),
            inline_css: String::new(),
            appearance: Appearance::default(),
            typography: Typography::default(),
            border: Border::default(),
            effects: Effects::default(),
            padding: Padding::default(),
            margin: Margin::default(),
            size: Size::default(),
            position: Position::default(),
            transforms: Transforms::default(),
            transforms_3d: Transforms3D::default(),
        }
    }
}

impl StyleState {
    /// Decodes `stored` merged over `defaults`.
    ///
    /// Keys present in `stored` win; keys it lacks keep their value from
    /// `defaults`, at every nesting level. Unknown keys are ignored. A stored
    /// value that does not fit its field is first coerced the way
    /// [`patch::apply`](crate::patch::apply) coerces, and otherwise dropped, so
    /// only that field keeps its default while valid siblings survive. Returns
    /// `None` only if `defaults` itself cannot round-trip.
    pub fn merged_over(defaults: &StyleState, stored: Value) -> Option<StyleState> {
        let mut base = serde_json::to_value(defaults).ok()?;
        let mut merged = base.clone();
        deep_merge(&mut merged, stored.clone());
        if let Ok(state) = serde_json::from_value::<StyleState>(merged) {
            return Some(state.normalized());
        }

        reconcile(&mut base, &mut Vec::new(), stored);
        serde_json::from_value::<StyleState>(base)
            .ok()
            .map(StyleState::normalized)
    }

    /// Applies per-field range policy.
    ///
    /// Percentage baselines and blur radii are never negative, opacity and the
    /// 0-100 filters are capped at 100, radii are non-negative, and any
    /// non-finite number falls back to the field default.
    pub fn normalized(mut self) -> Self {
        let fx_default = Effects::default();
        let fx = &mut self.effects;
        fx.opacity = clamp(fx.opacity, 0.0, 100.0, fx_default.opacity);
        fx.brightness = clamp(fx.brightness, 0.0, f64::MAX, fx_default.brightness);
        fx.contrast = clamp(fx.contrast, 0.0, f64::MAX, fx_default.contrast);
        fx.saturation = clamp(fx.saturation, 0.0, f64::MAX, fx_default.saturation);
        fx.blur = clamp(fx.blur, 0.0, f64::MAX, 0.0);
        fx.backdrop_blur = clamp(fx.backdrop_blur, 0.0, f64::MAX, 0.0);
        fx.grayscale = clamp(fx.grayscale, 0.0, 100.0, 0.0);
        fx.invert = clamp(fx.invert, 0.0, 100.0, 0.0);
        fx.sepia = clamp(fx.sepia, 0.0, 100.0, 0.0);
        fx.hue_rotate = finite_or(fx.hue_rotate, 0.0);

        let r = &mut self.border.radius;
        for corner in [&mut r.all, &mut r.tl, &mut r.tr, &mut r.br, &mut r.bl] {
            *corner = clamp(*corner, 0.0, f64::MAX, 0.0);
        }

        let t = &mut self.transforms;
        t.scale = clamp(t.scale, 0.0, f64::MAX, 100.0);
        for v in [
            &mut t.translate_x,
            &mut t.translate_y,
            &mut t.rotate,
            &mut t.skew_x,
            &mut t.skew_y,
        ] {
            *v = finite_or(*v, 0.0);
        }

        let t3 = &mut self.transforms_3d;
        for v in [&mut t3.rotate_x, &mut t3.rotate_y, &mut t3.rotate_z] {
            *v = finite_or(*v, 0.0);
        }
        t3.perspective = clamp(t3.perspective, 0.0, f64::MAX, 0.0);
        self
    }
}

/// Overlays `stored` onto `root` one leaf at a time, keeping each leaf only if
/// the whole tree still decodes with it in place.
fn reconcile(root: &mut Value, path: &mut Vec<String>, stored: Value) {
    let Value::Object(fields) = stored else {
        return;
    };
    for (key, value) in fields {
        path.push(key);
        let slot_is_object = slot_mut(root, path).map(|slot| slot.is_object());
        match slot_is_object {
            None => {}
            Some(true) if value.is_object() => reconcile(root, path, value),
            Some(_) => accept_leaf(root, path, value),
        }
        path.pop();
    }
}

fn accept_leaf(root: &mut Value, path: &[String], value: Value) {
    let Some(existing) = slot_mut(root, path).map(|slot| slot.clone()) else {
        return;
    };
    let coerced = coerce(&existing, value.clone());
    for candidate in [value, coerced] {
        let mut trial = root.clone();
        if let Some(slot) = slot_mut(&mut trial, path) {
            *slot = candidate;
        }
        if serde_json::from_value::<StyleState>(trial.clone()).is_ok() {
            *root = trial;
            return;
        }
    }
}

fn slot_mut<'a>(root: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    path.iter().try_fold(root, |node, key| node.as_object_mut()?.get_mut(key))
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn clamp(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
