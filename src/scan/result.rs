//! Scan requests, per-node results, and responses.

use super::ThresholdConfig;
use crate::contrast::format_ratio;
use crate::model::{Color, NodeId};
use serde::{Deserialize, Serialize, Serializer};

/// Message returned when a scan is requested with nothing selected.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select a frame, group, or section to scan.";

/// Maximum number of characters of text content used as a result label.
pub const LABEL_MAX_CHARS: usize = 50;

/// A request to scan part of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// Host identifiers of the root nodes to scan
    #[serde(default)]
    pub root_nodes: Vec<String>,

    /// Required ratios; WCAG AA defaults when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdConfig>,
}

impl ScanRequest {
    /// Create a request for the given roots with default thresholds.
    pub fn new<I, S>(root_nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root_nodes: root_nodes.into_iter().map(Into::into).collect(),
            thresholds: None,
        }
    }

    /// Set custom thresholds.
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = Some(thresholds);
        self
    }
}

/// Category of an evaluated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// Text layer checked against the text thresholds
    Text,
    /// Solid-filled layer checked against the non-text threshold
    Color,
}

/// Outcome of evaluating one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    /// Result category
    #[serde(rename = "type")]
    pub kind: ResultKind,

    /// Host identifier of the evaluated node
    pub id: String,

    /// Arena handle of the evaluated node
    #[serde(skip)]
    pub node: NodeId,

    /// Display label: truncated text content or layer name
    pub name: String,

    /// Contrast ratio at full precision (serialized with two decimals)
    #[serde(serialize_with = "serialize_ratio")]
    pub contrast: f64,

    /// Ratio the node had to meet
    pub required: f64,

    /// Whether `contrast >= required`
    pub pass: bool,

    /// Foreground hex for color results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,

    /// Resolved foreground color
    #[serde(skip)]
    pub foreground: Color,

    /// Resolved background color
    #[serde(skip)]
    pub background: Color,
}

impl ScanResult {
    /// Contrast formatted for display.
    pub fn contrast_display(&self) -> String {
        format_ratio(self.contrast)
    }

    /// Shortfall against the required ratio (zero when passing).
    pub fn deficit(&self) -> f64 {
        (self.required - self.contrast).max(0.0)
    }
}

fn serialize_ratio<S: Serializer>(ratio: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_ratio(*ratio))
}

/// Truncate text content to a result label.
///
/// Keeps the first [`LABEL_MAX_CHARS`] Unicode scalar values (`char`s), so a
/// multi-byte or astral character is never split.
pub fn text_label(characters: &str) -> String {
    characters.chars().take(LABEL_MAX_CHARS).collect()
}

/// Response to a scan request, emitted once per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResponse {
    /// Results: text results in traversal order, then color results
    pub results: Vec<ScanResult>,

    /// User-facing error, if the scan could not run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResponse {
    /// Create a successful response.
    pub fn new(results: Vec<ScanResult>) -> Self {
        Self {
            results,
            error: None,
        }
    }

    /// Response for a scan requested with nothing selected.
    pub fn empty_selection() -> Self {
        Self {
            results: Vec::new(),
            error: Some(EMPTY_SELECTION_MESSAGE.to_string()),
        }
    }

    /// Results that fell short of their threshold.
    pub fn failures(&self) -> impl Iterator<Item = &ScanResult> {
        self.results.iter().filter(|r| !r.pass)
    }

    /// Whether any result failed.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| !r.pass)
    }

    /// Whether the response carries no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(kind: ResultKind, contrast: f64, required: f64) -> ScanResult {
        ScanResult {
            kind,
            id: "1:2".into(),
            node: NodeId(2),
            name: "Label".into(),
            contrast,
            required,
            pass: contrast >= required,
            hex: (kind == ResultKind::Color).then(|| "#999999".to_string()),
            foreground: Color::new(0.6, 0.6, 0.6),
            background: Color::WHITE,
        }
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_value(result(ResultKind::Color, 2.849, 3.0)).unwrap();
        assert_eq!(json["type"], "color");
        assert_eq!(json["contrast"], "2.85");
        assert_eq!(json["required"], 3.0);
        assert_eq!(json["pass"], false);
        assert_eq!(json["hex"], "#999999");
        assert!(json.get("node").is_none());
        assert!(json.get("foreground").is_none());
    }

    #[test]
    fn test_text_result_has_no_hex() {
        let json = serde_json::to_value(result(ResultKind::Text, 21.0, 4.5)).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["contrast"], "21.00");
        assert!(json.get("hex").is_none());
    }

    #[test]
    fn test_empty_selection_response() {
        let response = ScanResponse::empty_selection();
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"results":[],"error":"Please select a frame, group, or section to scan."}"#
        );
    }

    #[test]
    fn test_response_filters() {
        let response = ScanResponse::new(vec![
            result(ResultKind::Text, 21.0, 4.5),
            result(ResultKind::Text, 2.0, 4.5),
        ]);
        assert_eq!(response.failures().count(), 1);
        assert!(response.has_failures());
        assert!(!serde_json::to_string(&response).unwrap().contains("error"));
    }

    #[test]
    fn test_deficit() {
        assert!((result(ResultKind::Text, 2.5, 4.5).deficit() - 2.0).abs() < 1e-9);
        assert_eq!(result(ResultKind::Text, 5.0, 4.5).deficit(), 0.0);
    }

    #[test]
    fn test_text_label_truncates_by_character() {
        let long = "é".repeat(80);
        assert_eq!(text_label(&long).chars().count(), LABEL_MAX_CHARS);
        assert_eq!(text_label("short"), "short");

        // Astral characters count once each
        let emoji = "😀".repeat(60);
        assert_eq!(text_label(&emoji), "😀".repeat(LABEL_MAX_CHARS));
    }

    #[test]
    fn test_scan_request_deserialize() {
        let request: ScanRequest = serde_json::from_str(r#"{"rootNodes":["1:2"]}"#).unwrap();
        assert_eq!(request.root_nodes, vec!["1:2".to_string()]);
        assert!(request.thresholds.is_none());

        let request: ScanRequest = serde_json::from_str(
            r#"{"rootNodes":[],"thresholds":{"normalText":7,"largeText":4.5,"nonText":3}}"#,
        )
        .unwrap();
        assert_eq!(request.thresholds, Some(ThresholdConfig::wcag_aaa()));
    }
}
