//! Serialized scene snapshots exported from a design host.
//!
//! A snapshot captures one page of the host document as nested JSON:
//!
//! ```json
//! {
//!   "name": "Landing",
//!   "selection": ["1:2"],
//!   "children": [
//!     {
//!       "id": "1:2",
//!       "name": "Hero",
//!       "type": "FRAME",
//!       "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }],
//!       "children": [
//!         {
//!           "id": "1:3",
//!           "type": "TEXT",
//!           "characters": "Welcome",
//!           "fontSize": 32,
//!           "fontWeight": 700,
//!           "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0 } }]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Properties the host reports as mixed (the string `"MIXED"`) deserialize
//! to `None`.

use super::{Fill, NodeKind};
use serde::{Deserialize, Deserializer, Serialize};

/// One exported page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    /// Page name
    #[serde(default)]
    pub name: String,

    /// Host identifiers of the currently selected nodes
    #[serde(default)]
    pub selection: Vec<String>,

    /// Top-level layers of the page
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,
}

/// One exported layer and its subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    /// Host identifier
    pub id: String,

    /// Layer name
    #[serde(default)]
    pub name: String,

    /// Node type
    #[serde(rename = "type", default)]
    pub kind: NodeKind,

    /// Visibility flag
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Fill layers
    #[serde(default, deserialize_with = "list_or_mixed")]
    pub fills: Option<Vec<Fill>>,

    /// Child layers
    #[serde(default)]
    pub children: Vec<NodeSnapshot>,

    /// Text content (text nodes)
    #[serde(default)]
    pub characters: Option<String>,

    /// Font size (text nodes)
    #[serde(default, deserialize_with = "number_or_mixed")]
    pub font_size: Option<f64>,

    /// Numeric font weight (text nodes)
    #[serde(default, deserialize_with = "number_or_mixed")]
    pub font_weight: Option<f64>,

    /// Font family (text nodes)
    #[serde(default)]
    pub font_family: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrMixed<T> {
    Value(T),
    Mixed(String),
}

fn list_or_mixed<'de, D>(deserializer: D) -> Result<Option<Vec<Fill>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OrMixed<Vec<Fill>>>::deserialize(deserializer)? {
        Some(OrMixed::Value(fills)) => Some(fills),
        Some(OrMixed::Mixed(_)) | None => None,
    })
}

fn number_or_mixed<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OrMixed<f64>>::deserialize(deserializer)? {
        Some(OrMixed::Value(n)) => Some(n),
        Some(OrMixed::Mixed(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_node() {
        let node: NodeSnapshot = serde_json::from_str(r#"{"id":"1:1"}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Frame);
        assert!(node.visible);
        assert!(node.fills.is_none());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_deserialize_mixed_properties() {
        let node: NodeSnapshot = serde_json::from_str(
            r#"{"id":"2:1","type":"TEXT","characters":"Hi","fills":"MIXED","fontSize":"MIXED","fontWeight":400}"#,
        )
        .unwrap();
        assert!(node.fills.is_none());
        assert!(node.font_size.is_none());
        assert_eq!(node.font_weight, Some(400.0));
    }

    #[test]
    fn test_deserialize_nested() {
        let snapshot: SceneSnapshot = serde_json::from_str(
            r#"{
                "name": "Page 1",
                "selection": ["1:2"],
                "children": [
                    {"id": "1:2", "type": "FRAME", "children": [
                        {"id": "1:3", "type": "TEXT", "characters": "Hello", "fontSize": 16, "fontWeight": 400}
                    ]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.selection, vec!["1:2".to_string()]);
        assert_eq!(snapshot.children[0].children[0].kind, NodeKind::Text);
        assert_eq!(snapshot.children[0].children[0].font_size, Some(16.0));
    }
}
