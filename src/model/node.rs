//! Scene graph nodes.

use super::Fill;
use crate::contrast;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle to a node inside a [`Scene`](super::Scene).
///
/// Handles are arena indices. They stay valid after a node is removed from
/// the host document; liveness is checked through
/// [`DocumentQuery::is_alive`](crate::query::DocumentQuery::is_alive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Arena index of this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Document root
    Document,
    /// Page (canvas) root
    Page,
    /// Text layer
    Text,
    /// Frame container
    #[default]
    Frame,
    /// Group container
    Group,
    /// Section container
    Section,
    /// Component definition
    Component,
    /// Set of component variants
    ComponentSet,
    /// Component instance
    Instance,
    /// Rectangle shape
    Rectangle,
    /// Ellipse shape
    Ellipse,
    /// Polygon shape
    Polygon,
    /// Star shape
    Star,
    /// Line shape
    Line,
    /// Vector path
    Vector,
    /// Boolean shape operation
    BooleanOperation,
    /// Any other node type
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Whether this kind marks the top of an ancestor chain.
    pub fn is_root(self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Page)
    }

    /// Whether this is a text layer.
    pub fn is_text(self) -> bool {
        self == NodeKind::Text
    }
}

/// Text content and font metrics of a text node.
///
/// Size and weight are `None` when the layer mixes several values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Character content
    #[serde(default)]
    pub characters: String,

    /// Font size in points
    #[serde(default)]
    pub font_size: Option<f64>,

    /// Numeric font weight (400 = regular, 700 = bold)
    #[serde(default)]
    pub font_weight: Option<f64>,

    /// Font family name
    #[serde(default)]
    pub font_family: Option<String>,
}

impl TextStyle {
    /// Create a text style with uniform size and weight.
    pub fn new(characters: impl Into<String>, font_size: f64, font_weight: f64) -> Self {
        Self {
            characters: characters.into(),
            font_size: Some(font_size),
            font_weight: Some(font_weight),
            font_family: None,
        }
    }

    /// Whether this text qualifies as WCAG large text.
    ///
    /// A mixed size or weight never satisfies its comparison.
    pub fn is_large(&self) -> bool {
        let size = self.font_size.unwrap_or(f64::NAN);
        let weight = self.font_weight.unwrap_or(f64::NAN);
        contrast::is_large_text(size, weight)
    }
}

/// A node in the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Arena handle
    pub id: NodeId,

    /// Host identifier (e.g. "12:345")
    pub key: String,

    /// Layer name
    pub name: String,

    /// Node type
    pub kind: NodeKind,

    /// Visibility flag
    pub visible: bool,

    /// Parent handle (`None` only for the root)
    pub parent: Option<NodeId>,

    /// Child handles in stacking order
    pub children: Vec<NodeId>,

    /// Fill layers; `None` when the node exposes no fill list
    pub fills: Option<Vec<Fill>>,

    /// Text content and metrics (text nodes only)
    pub text: Option<TextStyle>,
}

impl SceneNode {
    /// The node's fill list, or an empty slice.
    pub fn fill_list(&self) -> &[Fill] {
        self.fills.as_deref().unwrap_or(&[])
    }

    /// Whether any fill is a visible solid paint.
    pub fn has_visible_solid_fill(&self) -> bool {
        self.fill_list().iter().any(Fill::is_visible_solid)
    }

    /// Text content, or an empty string for non-text nodes.
    pub fn characters(&self) -> &str {
        self.text.as_ref().map(|t| t.characters.as_str()).unwrap_or("")
    }
}
