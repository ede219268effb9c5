//! JSON rendering for scan reports.

use crate::error::{Error, Result};

use super::ScanReport;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a report to JSON.
pub fn to_json(report: &ScanReport, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
        JsonFormat::Compact => serde_json::to_string(report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, NodeId};
    use crate::scan::{ResultKind, ScanResponse, ScanResult, ThresholdConfig};

    fn report() -> ScanReport {
        let response = ScanResponse::new(vec![ScanResult {
            kind: ResultKind::Color,
            id: "1:4".into(),
            node: NodeId(4),
            name: "Badge".into(),
            contrast: 2.849,
            required: 3.0,
            pass: false,
            hex: Some("#999999".into()),
            foreground: Color::new(0.6, 0.6, 0.6),
            background: Color::WHITE,
        }]);
        ScanReport::new(response, ThresholdConfig::default()).with_document("Landing")
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&report(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"document\": \"Landing\""));
        assert!(json.contains("\"contrast\": \"2.85\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&report(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"][0]["type"], "color");
        assert_eq!(value["stats"]["failed"], 1);
        assert_eq!(value["thresholds"]["normalText"], 4.5);
    }
}
