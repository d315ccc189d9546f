//! Fill values: a solid color or a multi-stop gradient.

use serde::{Deserialize, Serialize};

use crate::error::GradientError;
use crate::format::fmt_num;

/// A fill value for gradient-capable color fields.
///
/// Serialized untagged so persisted payloads holding either a plain color
/// string or a `{ "type", "angle", "stops" }` object both decode.
///
/// ```rust
/// use restyle_core::Paint;
///
/// let solid: Paint = serde_json::from_str("\"#ff0000\"").unwrap();
/// assert_eq!(solid.to_css().as_deref(), Some("#ff0000"));
///
/// let gradient: Paint = serde_json::from_str(r##"{
///     "type": "linear", "angle": 90,
///     "stops": [{"color": "#0000ff", "position": 100}, {"color": "#ff0000", "position": 0}]
/// }"##).unwrap();
/// assert_eq!(
///     gradient.to_css().as_deref(),
///     Some("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    Gradient(Gradient),
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(String::new())
    }
}

impl Paint {
    /// A plain color fill.
    pub fn solid(color: impl Into<String>) -> Self {
        Paint::Solid(color.into())
    }

    /// True for an unset solid color.
    pub fn is_empty(&self) -> bool {
        matches!(self, Paint::Solid(c) if c.trim().is_empty())
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Paint::Gradient(_))
    }

    /// CSS value for this fill, `None` when unset.
    pub fn to_css(&self) -> Option<String> {
        match self {
            Paint::Solid(c) if c.trim().is_empty() => None,
            Paint::Solid(c) => Some(c.trim().to_string()),
            Paint::Gradient(g) => Some(g.to_css()),
        }
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::Gradient(gradient)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// One `(color, position)` pair; position is a percentage 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    pub position: f64,
}

impl GradientStop {
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }
}

/// A linear or radial gradient with at least two stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradient")]
pub struct Gradient {
    #[serde(rename = "type")]
    kind: GradientKind,
    angle: f64,
    stops: Vec<GradientStop>,
}

#[derive(Deserialize)]
struct RawGradient {
    #[serde(rename = "type", default)]
    kind: GradientKind,
    #[serde(default = "default_angle")]
    angle: f64,
    stops: Vec<GradientStop>,
}

fn default_angle() -> f64 {
    90.0
}

impl TryFrom<RawGradient> for Gradient {
    type Error = GradientError;

    fn try_from(raw: RawGradient) -> Result<Self, Self::Error> {
        Gradient::new(raw.kind, raw.angle, raw.stops)
    }
}

impl Gradient {
    pub fn new(
        kind: GradientKind,
        angle: f64,
        stops: Vec<GradientStop>,
    ) -> Result<Self, GradientError> {
        if stops.len() < 2 {
            return Err(GradientError::TooFewStops(stops.len()));
        }
        Ok(Self { kind, angle, stops })
    }

    /// A linear gradient at `angle` degrees.
    pub fn linear(angle: f64, stops: Vec<GradientStop>) -> Result<Self, GradientError> {
        Self::new(GradientKind::Linear, angle, stops)
    }

    /// A circular radial gradient.
    pub fn radial(stops: Vec<GradientStop>) -> Result<Self, GradientError> {
        Self::new(GradientKind::Radial, 0.0, stops)
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Stops in stored order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Stops sorted ascending by position with positions clamped to 0-100.
    ///
    /// The sort is stable, so stops sharing a position keep their stored order.
    pub fn sorted_stops(&self) -> Vec<GradientStop> {
        let mut stops: Vec<GradientStop> = self
            .stops
            .iter()
            .map(|s| GradientStop::new(s.color.trim(), clamp_position(s.position)))
            .collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        stops
    }

    pub fn to_css(&self) -> String {
        let stops = self
            .sorted_stops()
            .iter()
            .map(|s| format!("{} {}%", s.color, fmt_num(s.position)))
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind {
            GradientKind::Linear => {
                let angle = if self.angle.is_finite() { self.angle } else { 0.0 };
                format!("linear-gradient({}deg, {})", fmt_num(angle), stops)
            }
            GradientKind::Radial => format!("radial-gradient(circle, {})", stops),
        }
    }
}

fn clamp_position(position: f64) -> f64 {
    if position.is_finite() {
        position.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stops() -> Vec<GradientStop> {
        vec![
            GradientStop::new("#ff0000", 0.0),
            GradientStop::new("#0000ff", 100.0),
        ]
    }

    #[test]
    fn test_gradient_requires_two_stops() {
        let err = Gradient::linear(90.0, vec![GradientStop::new("#fff", 0.0)]).unwrap_err();
        assert_eq!(err, GradientError::TooFewStops(1));
    }

    #[test]
    fn test_gradient_rejects_single_stop_on_decode() {
        let json =
            r##"{"type": "linear", "angle": 0, "stops": [{"color": "#fff", "position": 0}]}"##;
        assert!(serde_json::from_str::<Gradient>(json).is_err());
    }

    #[test]
    fn test_stops_render_sorted_and_clamped() {
        let g = Gradient::linear(
            45.0,
            vec![
                GradientStop::new("#000", 150.0),
                GradientStop::new("#111", -5.0),
                GradientStop::new("#222", 50.0),
            ],
        )
        .unwrap();
        assert_eq!(
            g.to_css(),
            "linear-gradient(45deg, #111 0%, #222 50%, #000 100%)"
        );
    }

    #[test]
    fn test_radial_css() {
        let g = Gradient::radial(two_stops()).unwrap();
        assert_eq!(g.to_css(), "radial-gradient(circle, #ff0000 0%, #0000ff 100%)");
    }

    #[test]
    fn test_paint_empty() {
        assert!(Paint::default().is_empty());
        assert!(Paint::solid("  ").is_empty());
        assert_eq!(Paint::default().to_css(), None);
        assert!(!Paint::from(Gradient::radial(two_stops()).unwrap()).is_empty());
    }

    #[test]
    fn test_paint_serializes_untagged() {
        let solid = serde_json::to_value(Paint::solid("#abc")).unwrap();
        assert_eq!(solid, serde_json::json!("#abc"));

        let paint = Paint::from(Gradient::linear(90.0, two_stops()).unwrap());
        let gradient = serde_json::to_value(paint).unwrap();
        assert_eq!(gradient["type"], "linear");
        assert_eq!(gradient["stops"].as_array().unwrap().len(), 2);
    }
}
