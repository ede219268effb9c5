//! Scan thresholds and options.

use crate::error::{Error, Result};
use crate::traverse::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Required contrast ratios for each result category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdConfig {
    /// Ratio required for body text
    pub normal_text: f64,
    /// Ratio required for large text
    pub large_text: f64,
    /// Ratio required for graphical objects
    pub non_text: f64,
}

impl ThresholdConfig {
    /// Create a threshold set.
    pub fn new(normal_text: f64, large_text: f64, non_text: f64) -> Self {
        Self {
            normal_text,
            large_text,
            non_text,
        }
    }

    /// WCAG 2.1 AA minimums (4.5 / 3 / 3).
    pub fn wcag_aa() -> Self {
        Self::new(4.5, 3.0, 3.0)
    }

    /// WCAG 2.1 AAA enhanced ratios (7 / 4.5), keeping the AA non-text ratio.
    pub fn wcag_aaa() -> Self {
        Self::new(7.0, 4.5, 3.0)
    }

    /// Ratio required for text of the given class.
    pub fn required_for_text(&self, is_large: bool) -> f64 {
        if is_large {
            self.large_text
        } else {
            self.normal_text
        }
    }

    /// Check that every ratio is a positive finite number.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("normalText", self.normal_text),
            ("largeText", self.large_text),
            ("nonText", self.non_text),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::wcag_aa()
    }
}

/// Options for running a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Required ratios
    pub thresholds: ThresholdConfig,

    /// Whether to evaluate nodes on the rayon pool
    pub parallel: bool,

    /// Traversal depth limit below each root
    pub max_depth: usize,
}

impl ScanOptions {
    /// Create new scan options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thresholds.
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable or disable parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel evaluation.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set how far below each root the traversal descends.
    ///
    /// Background resolution always walks up to the page root regardless.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            parallel: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults() {
        let thresholds = ThresholdConfig::default();
        assert_eq!(thresholds.normal_text, 4.5);
        assert_eq!(thresholds.large_text, 3.0);
        assert_eq!(thresholds.non_text, 3.0);
        assert_eq!(thresholds.required_for_text(true), 3.0);
        assert_eq!(thresholds.required_for_text(false), 4.5);
    }

    #[test]
    fn test_threshold_serde_names() {
        let thresholds: ThresholdConfig =
            serde_json::from_str(r#"{"normalText":7,"largeText":4.5,"nonText":3}"#).unwrap();
        assert_eq!(thresholds, ThresholdConfig::wcag_aaa());

        let json = serde_json::to_string(&ThresholdConfig::wcag_aa()).unwrap();
        assert_eq!(json, r#"{"normalText":4.5,"largeText":3.0,"nonText":3.0}"#);
    }

    #[test]
    fn test_threshold_validate() {
        assert!(ThresholdConfig::wcag_aa().validate().is_ok());
        assert!(matches!(
            ThresholdConfig::new(4.5, 0.0, 3.0).validate(),
            Err(Error::InvalidThreshold {
                name: "largeText",
                ..
            })
        ));
        assert!(ThresholdConfig::new(f64::INFINITY, 3.0, 3.0).validate().is_err());
    }

    #[test]
    fn test_scan_options_builder() {
        let options = ScanOptions::new()
            .with_thresholds(ThresholdConfig::wcag_aaa())
            .sequential()
            .with_max_depth(0);

        assert_eq!(options.thresholds.normal_text, 7.0);
        assert!(!options.parallel);
        assert_eq!(options.max_depth, 1);
    }

    #[test]
    fn test_with_parallel_toggles() {
        assert!(!ScanOptions::new().with_parallel(false).parallel);
        assert!(ScanOptions::new().sequential().with_parallel(true).parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ScanOptions::default();
        assert!(options.parallel);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }
}
