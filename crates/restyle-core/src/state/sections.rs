//! Nested sections of [`StyleState`](super::StyleState).
//!
//! Every section derives `Default` with the editor's baseline values and is
//! `#[serde(default)]`, so payloads written before a field existed still decode.

use serde::{Deserialize, Serialize};

use super::paint::Paint;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Appearance {
    pub background_color: Paint,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub text_color: String,
    /// `sans`, `serif`, `mono` or a literal family name.
    pub font_family: String,
    pub font_weight: String,
    pub font_size: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub text_align: TextAlign,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            text_color: String::new(),
            font_family: "sans".to_string(),
            font_weight: "400".to_string(),
            font_size: "16".to_string(),
            line_height: "1.5".to_string(),
            letter_spacing: String::new(),
            text_align: TextAlign::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
            BorderStyle::None => "none",
        }
    }
}

/// Corner radii in px. A non-zero `all` overrides the four corners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Radius {
    pub all: f64,
    pub tl: f64,
    pub tr: f64,
    pub br: f64,
    pub bl: f64,
}

impl Radius {
    /// Effective `[tl, tr, br, bl]` radii after applying `all` precedence.
    pub fn corners(&self) -> [f64; 4] {
        if self.all > 0.0 {
            [self.all; 4]
        } else {
            [self.tl, self.tr, self.br, self.bl]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Border {
    pub color: String,
    pub ring_color: String,
    /// Width in px, string-encoded; `"0"` is unset.
    pub width: String,
    pub style: BorderStyle,
    pub radius: Radius,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            color: String::new(),
            ring_color: String::new(),
            width: "0".to_string(),
            style: BorderStyle::Solid,
            radius: Radius::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shadow {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
    #[serde(rename = "inner")]
    Inner,
}

impl Shadow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shadow::None => "none",
            Shadow::Sm => "sm",
            Shadow::Md => "md",
            Shadow::Lg => "lg",
            Shadow::Xl => "xl",
            Shadow::Xxl => "2xl",
            Shadow::Inner => "inner",
        }
    }

    /// The `box-shadow` value, `None` for no shadow.
    pub fn box_shadow(&self) -> Option<&'static str> {
        match self {
            Shadow::None => None,
            Shadow::Sm => Some("0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            Shadow::Md => Some("0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
            Shadow::Lg => {
                Some("0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)")
            }
            Shadow::Xl => {
                Some("0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)")
            }
            Shadow::Xxl => Some("0 25px 50px -12px rgb(0 0 0 / 0.25)"),
            Shadow::Inner => Some("inset 0 2px 4px 0 rgb(0 0 0 / 0.05)"),
        }
    }
}

/// Visual effects. Opacity, brightness, contrast and saturation are
/// percentages around a 100 baseline; the rest are additive from 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Effects {
    pub shadow: Shadow,
    pub opacity: f64,
    pub blur: f64,
    pub backdrop_blur: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub hue_rotate: f64,
    pub grayscale: f64,
    pub invert: f64,
    pub sepia: f64,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            shadow: Shadow::None,
            opacity: 100.0,
            blur: 0.0,
            backdrop_blur: 0.0,
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            hue_rotate: 0.0,
            grayscale: 0.0,
            invert: 0.0,
            sepia: 0.0,
        }
    }
}

/// Per-side padding; empty string is unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

/// Axis-pair margin shorthand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub x: String,
    pub y: String,
}

/// Dimensions; `"auto"` is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Size {
    pub width: String,
    pub height: String,
    pub max_width: String,
    pub max_height: String,
    pub min_width: String,
    pub min_height: String,
}

impl Default for Size {
    fn default() -> Self {
        let auto = || "auto".to_string();
        Self {
            width: auto(),
            height: auto(),
            max_width: auto(),
            max_height: auto(),
            min_width: auto(),
            min_height: auto(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionKind {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionKind::Static => "static",
            PositionKind::Relative => "relative",
            PositionKind::Absolute => "absolute",
            PositionKind::Fixed => "fixed",
            PositionKind::Sticky => "sticky",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    #[serde(rename = "type")]
    pub kind: PositionKind,
    pub l: String,
    pub t: String,
    pub r: String,
    pub b: String,
    pub z_index: String,
}

/// 2D transforms: px for translate, deg for rotate/skew, scale as a
/// percentage around 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transforms {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate: f64,
    pub scale: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotate: 0.0,
            scale: 100.0,
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }
}

/// 3D transforms in degrees. `perspective` is multiplied by 100 to form a
/// pixel distance at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transforms3D {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub perspective: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_all_takes_precedence() {
        let mut radius = Radius {
            tl: 4.0,
            ..Radius::default()
        };
        assert_eq!(radius.corners(), [4.0, 0.0, 0.0, 0.0]);

        radius.all = 12.0;
        assert_eq!(radius.corners(), [12.0; 4]);

        radius.all = 0.0;
        assert_eq!(radius.corners(), [4.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_partial_section_decodes_with_defaults() {
        let effects: Effects = serde_json::from_str(r#"{"opacity": 40}"#).unwrap();
        assert_eq!(effects.opacity, 40.0);
        assert_eq!(effects.brightness, 100.0);
        assert_eq!(effects.sepia, 0.0);
    }

    #[test]
    fn test_position_type_key() {
        let position: Position =
            serde_json::from_str(r#"{"type": "sticky", "zIndex": "5"}"#).unwrap();
        assert_eq!(position.kind, PositionKind::Sticky);
        assert_eq!(position.z_index, "5");
    }

    #[test]
    fn test_shadow_names() {
        let shadow: Shadow = serde_json::from_str("\"2xl\"").unwrap();
        assert_eq!(shadow, Shadow::Xxl);
        assert!(Shadow::None.box_shadow().is_none());
        assert!(Shadow::Inner.box_shadow().unwrap().starts_with("inset"));
    }
}
