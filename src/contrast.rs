//! WCAG 2.1 luminance, contrast ratio, and large-text rules.
//!
//! See <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance> and
//! <https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio>.

use crate::model::Color;

/// Minimum size (pt) for any text to count as large.
pub const LARGE_TEXT_SIZE: f64 = 24.0;

/// Minimum size (pt) for bold text to count as large.
pub const LARGE_BOLD_TEXT_SIZE: f64 = 18.66;

/// Minimum numeric weight considered bold.
pub const BOLD_WEIGHT: f64 = 700.0;

/// sRGB channel value below which the transfer curve is linear.
const LINEAR_THRESHOLD: f64 = 0.03928;

/// Relative luminance of a color, in [0.0, 1.0].
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// Contrast ratio between two colors, in [1.0, 21.0].
///
/// The result does not depend on argument order.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether text of this size and weight is WCAG large text.
pub fn is_large_text(font_size: f64, font_weight: f64) -> bool {
    let is_bold = font_weight >= BOLD_WEIGHT;
    (is_bold && font_size >= LARGE_BOLD_TEXT_SIZE) || font_size >= LARGE_TEXT_SIZE
}

/// Format a ratio for display with two decimals (e.g. `"4.54"`).
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}", ratio)
}

fn linearize(channel: f64) -> f64 {
    if channel <= LINEAR_THRESHOLD {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}
