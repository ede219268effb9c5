//! Plain text rendering for scan reports.

use crate::contrast::format_ratio;
use crate::error::Result;
use crate::scan::{ResultKind, ScanResult};
use std::fmt::Write;

use super::{RenderOptions, ScanReport};

/// Convert a report to plain text, one result per line.
pub fn to_text(report: &ScanReport, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    output.push_str("Contrast report");
    if let Some(ref name) = report.document {
        write!(output, ": {}", name).map_err(render_error)?;
    }
    output.push('\n');

    if options.include_thresholds {
        let t = &report.thresholds;
        writeln!(
            output,
            "Thresholds: normal text {}, large text {}, non-text {}",
            format_ratio(t.normal_text),
            format_ratio(t.large_text),
            format_ratio(t.non_text)
        )
        .map_err(render_error)?;
    }
    output.push('\n');

    if let Some(ref error) = report.response.error {
        writeln!(output, "{}", error).map_err(render_error)?;
        return Ok(output.trim_end().to_string());
    }

    for result in report
        .response
        .results
        .iter()
        .filter(|r| options.selection.includes(r))
    {
        output.push_str(&result_line(result, options));
        output.push('\n');
    }

    if options.include_summary {
        let stats = &report.stats;
        write!(
            output,
            "\n{} checked: {} passed, {} failed",
            stats.total(),
            stats.passed,
            stats.failed
        )
        .map_err(render_error)?;
        if let Some(lowest) = stats.lowest_ratio {
            write!(output, ", lowest {}", format_ratio(lowest)).map_err(render_error)?;
        }
        output.push('\n');
    }

    Ok(output.trim_end().to_string())
}

fn result_line(result: &ScanResult, options: &RenderOptions) -> String {
    let status = if result.pass { "PASS" } else { "FAIL" };
    let kind = match result.kind {
        ResultKind::Text => "text",
        ResultKind::Color => "color",
    };
    let mut line = format!(
        "{}  {:<5} {:>6} / {}",
        status,
        kind,
        result.contrast_display(),
        format_ratio(result.required)
    );
    if !result.pass {
        line.push_str(&format!(" (short {})", format_ratio(result.deficit())));
    }
    line.push_str("  ");
    line.push_str(&result.name);

    if options.show_colors {
        line.push_str(&format!(
            "  {} on {}",
            result.foreground.to_hex(),
            result.background.to_hex()
        ));
    } else if let Some(ref hex) = result.hex {
        line.push_str("  ");
        line.push_str(hex);
    }

    line.push_str(&format!("  [{}]", result.id));
    line
}

fn render_error(e: std::fmt::Error) -> crate::error::Error {
    crate::error::Error::Render(e.to_string())
}
