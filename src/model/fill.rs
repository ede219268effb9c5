//! Paint layers attached to scene nodes.

use super::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Kind of paint a fill applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillKind {
    /// Single flat color
    #[default]
    Solid,
    /// Linear gradient
    GradientLinear,
    /// Radial gradient
    GradientRadial,
    /// Angular gradient
    GradientAngular,
    /// Diamond gradient
    GradientDiamond,
    /// Bitmap image
    Image,
    /// Video frame
    Video,
    /// Any paint type this crate does not know about
    #[serde(other)]
    Other,
}

/// A single paint layer on a node.
///
/// Fills are stacked in sequence order: the last visible fill renders on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Paint kind (serialized as `type`)
    #[serde(rename = "type", default)]
    pub kind: FillKind,

    /// Paint color; only meaningful for solid fills
    #[serde(default)]
    pub color: Color,

    /// Whether the layer is shown
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Layer opacity [0.0, 1.0]
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Fill {
    /// Create a visible, fully opaque solid fill.
    pub fn solid(color: Color) -> Self {
        Self {
            kind: FillKind::Solid,
            color,
            visible: true,
            opacity: 1.0,
        }
    }

    /// Create a fill of a non-solid kind.
    pub fn of_kind(kind: FillKind) -> Self {
        Self {
            kind,
            ..Self::solid(Color::BLACK)
        }
    }

    /// Set the layer opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Hide the layer.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// A solid fill that is shown, regardless of opacity.
    pub fn is_visible_solid(&self) -> bool {
        self.kind == FillKind::Solid && self.visible
    }

    /// A solid fill that is shown at exactly full opacity.
    pub fn is_opaque_solid(&self) -> bool {
        self.is_visible_solid() && self.opacity == 1.0
    }

    /// Check color channels and opacity.
    pub fn validate(&self) -> Result<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::InvalidColor(format!(
                "opacity out of range: {}",
                self.opacity
            )));
        }
        if self.kind == FillKind::Solid {
            self.color.validate()?;
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_predicates() {
        let fill = Fill::solid(Color::WHITE);
        assert!(fill.is_visible_solid());
        assert!(fill.is_opaque_solid());

        let translucent = Fill::solid(Color::WHITE).with_opacity(0.5);
        assert!(translucent.is_visible_solid());
        assert!(!translucent.is_opaque_solid());

        let hidden = Fill::solid(Color::WHITE).hidden();
        assert!(!hidden.is_visible_solid());

        let gradient = Fill::of_kind(FillKind::GradientLinear);
        assert!(!gradient.is_visible_solid());
    }

    #[test]
    fn test_deserialize_defaults() {
        let fill: Fill =
            serde_json::from_str(r#"{"type":"SOLID","color":{"r":1,"g":0,"b":0}}"#).unwrap();
        assert!(fill.visible);
        assert_eq!(fill.opacity, 1.0);
        assert_eq!(fill.color, Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_deserialize_unknown_kind() {
        let fill: Fill = serde_json::from_str(r#"{"type":"PATTERN"}"#).unwrap();
        assert_eq!(fill.kind, FillKind::Other);
        assert!(!fill.is_visible_solid());
    }

    #[test]
    fn test_validate_opacity() {
        assert!(Fill::solid(Color::BLACK).with_opacity(1.5).validate().is_err());
        assert!(Fill::solid(Color::BLACK).with_opacity(0.0).validate().is_ok());
    }
}
