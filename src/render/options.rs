//! Rendering options and configuration.

use crate::scan::{ResultKind, ScanResult};

/// Options for rendering scan reports.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Which results to list
    pub selection: ResultSelection,

    /// Append pass/fail counts after the result list
    pub include_summary: bool,

    /// Show the thresholds the scan was run with
    pub include_thresholds: bool,

    /// Show the resolved foreground/background pair for each result
    pub show_colors: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result selection.
    pub fn with_selection(mut self, selection: ResultSelection) -> Self {
        self.selection = selection;
        self
    }

    /// List only failing results.
    pub fn failures_only(mut self) -> Self {
        self.selection = ResultSelection::Failures;
        self
    }

    /// Enable or disable the summary block.
    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    /// Enable or disable the thresholds line.
    pub fn with_thresholds(mut self, include: bool) -> Self {
        self.include_thresholds = include;
        self
    }

    /// Enable or disable color pairs.
    pub fn with_colors(mut self, show: bool) -> Self {
        self.show_colors = show;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            selection: ResultSelection::All,
            include_summary: true,
            include_thresholds: true,
            show_colors: false,
        }
    }
}

/// Result selection for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultSelection {
    /// Every result
    #[default]
    All,
    /// Results below their required ratio
    Failures,
    /// Results at or above their required ratio
    Passes,
    /// Results of one category
    Kind(ResultKind),
}

impl ResultSelection {
    /// Check if a result should be listed.
    pub fn includes(&self, result: &ScanResult) -> bool {
        match self {
            ResultSelection::All => true,
            ResultSelection::Failures => !result.pass,
            ResultSelection::Passes => result.pass,
            ResultSelection::Kind(kind) => result.kind == *kind,
        }
    }

    /// Parse a selection name ("all", "failures", "passes", "text", "color").
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(ResultSelection::All),
            "fail" | "failures" => Ok(ResultSelection::Failures),
            "pass" | "passes" => Ok(ResultSelection::Passes),
            "text" => Ok(ResultSelection::Kind(ResultKind::Text)),
            "color" | "colour" => Ok(ResultSelection::Kind(ResultKind::Color)),
            other => Err(format!("Unknown result selection '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .failures_only()
            .with_summary(false)
            .with_colors(true);

        assert_eq!(options.selection, ResultSelection::Failures);
        assert!(!options.include_summary);
        assert!(options.include_thresholds);
        assert!(options.show_colors);
    }

    #[test]
    fn test_result_selection_parse() {
        assert_eq!(ResultSelection::parse("all").unwrap(), ResultSelection::All);
        assert_eq!(ResultSelection::parse("Failures").unwrap(), ResultSelection::Failures);
        assert_eq!(
            ResultSelection::parse("text").unwrap(),
            ResultSelection::Kind(ResultKind::Text)
        );
        assert!(ResultSelection::parse("warnings").is_err());
    }
}
