//! Scan report with metadata and statistics.

use super::ResultSelection;
use crate::scan::{ResultKind, ScanResponse, ThresholdConfig};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A scan response packaged for output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Name of the scanned document or page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Where the scene was read from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// When the report was produced
    pub generated_at: DateTime<Utc>,

    /// Thresholds the scan was run with
    pub thresholds: ThresholdConfig,

    /// Counts over the full response
    pub stats: ScanStats,

    /// The scan response
    #[serde(flatten)]
    pub response: ScanResponse,
}

impl ScanReport {
    /// Create a report stamped with the current time.
    pub fn new(response: ScanResponse, thresholds: ThresholdConfig) -> Self {
        Self {
            document: None,
            source: None,
            generated_at: Utc::now(),
            thresholds,
            stats: ScanStats::from_response(&response),
            response,
        }
    }

    /// Set the document name.
    pub fn with_document(mut self, name: impl Into<String>) -> Self {
        self.document = Some(name.into());
        self
    }

    /// Set the source path or label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Override the generation timestamp.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Keep only the selected results. Statistics still describe the full
    /// scan.
    pub fn select(mut self, selection: ResultSelection) -> Self {
        self.response.results.retain(|r| selection.includes(r));
        self
    }

    /// Whether the report contains failing results.
    pub fn has_failures(&self) -> bool {
        self.stats.failed > 0
    }
}

/// Counts collected from a scan response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Number of text results
    pub text_count: u32,

    /// Number of color results
    pub color_count: u32,

    /// Results meeting their threshold
    pub passed: u32,

    /// Results below their threshold
    pub failed: u32,

    /// Lowest contrast ratio seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_ratio: Option<f64>,
}

impl ScanStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a response.
    pub fn from_response(response: &ScanResponse) -> Self {
        let mut stats = Self::new();
        for result in &response.results {
            stats.record(result.kind, result.contrast, result.pass);
        }
        stats
    }

    /// Count one result.
    pub fn record(&mut self, kind: ResultKind, contrast: f64, pass: bool) {
        match kind {
            ResultKind::Text => self.text_count += 1,
            ResultKind::Color => self.color_count += 1,
        }
        if pass {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.lowest_ratio = Some(match self.lowest_ratio {
            Some(lowest) => lowest.min(contrast),
            None => contrast,
        });
    }

    /// Total results counted.
    pub fn total(&self) -> u32 {
        self.text_count + self.color_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_record() {
        let mut stats = ScanStats::new();
        stats.record(ResultKind::Text, 21.0, true);
        stats.record(ResultKind::Color, 1.0, false);
        stats.record(ResultKind::Color, 4.0, true);

        assert_eq!(stats.text_count, 1);
        assert_eq!(stats.color_count, 2);
        assert_eq!(stats.passed, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.lowest_ratio, Some(1.0));
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_empty_report() {
        let report = ScanReport::new(ScanResponse::empty_selection(), ThresholdConfig::default());
        assert_eq!(report.stats, ScanStats::default());
        assert!(!report.has_failures());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["results"].as_array().unwrap().is_empty());
        assert!(json["error"].is_string());
        assert!(json.get("lowestRatio").is_none());
        assert!(json["stats"].get("lowestRatio").is_none());
    }
}
