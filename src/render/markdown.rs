//! Markdown rendering for scan reports.

use crate::contrast::format_ratio;
use crate::error::Result;
use crate::scan::{ResultKind, ScanResult};

use super::{RenderOptions, ScanReport};

/// Convert a report to Markdown.
pub fn to_markdown(report: &ScanReport, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(report)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a report to Markdown.
    pub fn render(self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();

        match report.document {
            Some(ref name) => {
                output.push_str(&format!("# Contrast report: {}\n\n", escape(name)));
            }
            None => output.push_str("# Contrast report\n\n"),
        }

        let mut meta = Vec::new();
        if let Some(ref source) = report.source {
            meta.push(format!("- Source: `{}`", source));
        }
        meta.push(format!(
            "- Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if self.options.include_thresholds {
            let t = &report.thresholds;
            meta.push(format!(
                "- Thresholds: normal text {}:1, large text {}:1, non-text {}:1",
                format_ratio(t.normal_text),
                format_ratio(t.large_text),
                format_ratio(t.non_text)
            ));
        }
        output.push_str(&meta.join("\n"));
        output.push_str("\n\n");

        if let Some(ref error) = report.response.error {
            output.push_str(&format!("> {}\n", error));
            return Ok(output.trim().to_string());
        }

        if self.options.include_summary {
            self.render_summary(&mut output, report);
        }

        let results: Vec<&ScanResult> = report
            .response
            .results
            .iter()
            .filter(|r| self.options.selection.includes(r))
            .collect();

        output.push_str("## Results\n\n");
        if results.is_empty() {
            output.push_str("_No results._\n");
        } else {
            self.render_table(&mut output, &results);
        }

        Ok(output.trim().to_string())
    }

    fn render_summary(&self, output: &mut String, report: &ScanReport) {
        let stats = &report.stats;
        output.push_str("## Summary\n\n");
        output.push_str("| Checked | Text | Color | Passed | Failed | Lowest |\n");
        output.push_str("|---:|---:|---:|---:|---:|---:|\n");
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n\n",
            stats.total(),
            stats.text_count,
            stats.color_count,
            stats.passed,
            stats.failed,
            stats
                .lowest_ratio
                .map(format_ratio)
                .unwrap_or_else(|| "-".to_string())
        ));
    }

    fn render_table(&self, output: &mut String, results: &[&ScanResult]) {
        if self.options.show_colors {
            output.push_str("| Status | Type | Layer | Contrast | Required | Foreground | Background |\n");
            output.push_str("|---|---|---|---:|---:|---|---|\n");
        } else {
            output.push_str("| Status | Type | Layer | Contrast | Required | Color |\n");
            output.push_str("|---|---|---|---:|---:|---|\n");
        }

        for result in results {
            let status = if result.pass { "✅ Pass" } else { "❌ Fail" };
            let kind = match result.kind {
                ResultKind::Text => "Text",
                ResultKind::Color => "Color",
            };
            let mut row = format!(
                "| {} | {} | {} | {}:1 | {}:1 |",
                status,
                kind,
                escape(&result.name),
                result.contrast_display(),
                format_ratio(result.required)
            );
            if self.options.show_colors {
                row.push_str(&format!(
                    " `{}` | `{}` |",
                    result.foreground.to_hex(),
                    result.background.to_hex()
                ));
            } else {
                match result.hex {
                    Some(ref hex) => row.push_str(&format!(" `{}` |", hex)),
                    None => row.push_str(" |"),
                }
            }
            output.push_str(&row);
            output.push('\n');
        }
    }
}

/// Escape characters that break Markdown table cells.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '|' => escaped.push_str("\\|"),
            '\n' | '\r' => escaped.push(' '),
            '*' | '_' | '`' | '[' | ']' | '<' | '>' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
