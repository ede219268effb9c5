//! Rendering module for converting scan reports to output formats.

mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{RenderOptions, ResultSelection};
pub use result::{ScanReport, ScanStats};
pub use text::to_text;
