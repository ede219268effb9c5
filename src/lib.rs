//! # wcagscan
//!
//! WCAG 2.1 color-contrast auditing for design document scene graphs.
//!
//! The library walks a page of a design document, finds text layers and
//! solid-filled shapes, resolves the color each one is drawn in and the
//! color it is drawn on, and checks the contrast ratio against the WCAG 2.1
//! AA minimums (or custom thresholds).
//!
//! ## Quick Start
//!
//! ```no_run
//! use wcagscan::{load_scene_file, render, scan_selection, ScanOptions};
//!
//! fn main() -> wcagscan::Result<()> {
//!     // Load an exported page snapshot
//!     let scene = load_scene_file("page.json")?;
//!
//!     // Scan whatever was selected at export time
//!     let options = ScanOptions::default();
//!     let response = scan_selection(&scene, &options);
//!
//!     let report = render::ScanReport::new(response, options.thresholds);
//!     println!("{}", render::to_text(&report, &render::RenderOptions::default())?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **WCAG 2.1 math**: relative luminance, contrast ratio, large-text rules
//! - **Background resolution**: nearest opaque ancestor fill, white fallback
//! - **Custom thresholds**: AA, AAA, or persisted user ratios
//! - **Parallel evaluation**: Uses Rayon across candidate nodes
//! - **Async font loading**: `async` feature, per-node loads on Tokio
//! - **Multiple output formats**: plain text, Markdown, JSON

pub mod contrast;
pub mod error;
pub mod model;
pub mod query;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod settings;
pub mod traverse;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use contrast::{contrast_ratio, format_ratio, is_large_text, relative_luminance};
pub use error::{Error, Result};
pub use model::{Color, Fill, FillKind, NodeBuilder, NodeId, NodeKind, Scene, SceneNode, TextStyle};
#[cfg(feature = "async")]
pub use query::{FontLoader, LoadedFonts};
pub use query::DocumentQuery;
pub use render::{JsonFormat, RenderOptions, ResultSelection, ScanReport, ScanStats};
#[cfg(feature = "async")]
pub use scan::{scan_async, scan_async_with_timeout};
pub use scan::{
    scan, scan_request, ResultKind, ScanOptions, ScanRequest, ScanResponse, ScanResult,
    ThresholdConfig,
};
pub use settings::{FileStore, MemoryStore, SettingsStore};

use model::SceneSnapshot;
use std::io::Read;
use std::path::Path;

/// Load a scene from a snapshot file.
///
/// # Example
///
/// ```no_run
/// use wcagscan::load_scene_file;
///
/// let scene = load_scene_file("page.json").unwrap();
/// println!("Layers: {}", scene.len() - 1);
/// ```
pub fn load_scene_file<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let data = std::fs::read(path)?;
    load_scene_bytes(&data)
}

/// Load a scene from snapshot JSON bytes.
pub fn load_scene_bytes(data: &[u8]) -> Result<Scene> {
    let snapshot: SceneSnapshot = serde_json::from_slice(data)?;
    Scene::from_snapshot(&snapshot)
}

/// Load a scene from a reader.
///
/// # Example
///
/// ```no_run
/// use wcagscan::load_scene_reader;
///
/// let scene = load_scene_reader(std::io::stdin()).unwrap();
/// ```
pub fn load_scene_reader<R: Read>(reader: R) -> Result<Scene> {
    let snapshot: SceneSnapshot = serde_json::from_reader(reader)?;
    Scene::from_snapshot(&snapshot)
}

/// Scan the scene's current selection.
///
/// An empty selection yields the empty-selection response.
pub fn scan_selection(scene: &Scene, options: &ScanOptions) -> ScanResponse {
    scan(scene, scene.selection(), options)
}

/// Contrast ratio between two hex colors.
///
/// # Example
///
/// ```
/// let ratio = wcagscan::check_contrast("#000", "#ffffff").unwrap();
/// assert_eq!(wcagscan::format_ratio(ratio), "21.00");
/// ```
pub fn check_contrast(foreground: &str, background: &str) -> Result<f64> {
    let foreground = Color::from_hex(foreground)?;
    let background = Color::from_hex(background)?;
    Ok(contrast_ratio(foreground, background))
}

/// Builder for loading and auditing scenes.
///
/// # Example
///
/// ```no_run
/// use wcagscan::{ContrastAudit, ThresholdConfig};
///
/// let report = ContrastAudit::new()
///     .with_thresholds(ThresholdConfig::wcag_aaa())
///     .failures_only()
///     .load("page.json")?
///     .to_markdown()?;
/// # Ok::<(), wcagscan::Error>(())
/// ```
pub struct ContrastAudit {
    scan_options: ScanOptions,
    render_options: RenderOptions,
}

impl ContrastAudit {
    /// Create a new audit builder.
    pub fn new() -> Self {
        Self {
            scan_options: ScanOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the required ratios.
    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.scan_options = self.scan_options.with_thresholds(thresholds);
        self
    }

    /// Load thresholds from a settings store.
    pub fn with_settings<S: SettingsStore + ?Sized>(mut self, store: &S) -> Result<Self> {
        let thresholds = settings::load_thresholds(store)?;
        self.scan_options = self.scan_options.with_thresholds(thresholds);
        Ok(self)
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.scan_options = self.scan_options.sequential();
        self
    }

    /// Set the traversal depth limit below each scanned root.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.scan_options = self.scan_options.with_max_depth(max_depth);
        self
    }

    /// List only failing results in rendered output.
    pub fn failures_only(mut self) -> Self {
        self.render_options = self.render_options.failures_only();
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Load a snapshot file and return a result wrapper.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<AuditResult> {
        let source = path.as_ref().display().to_string();
        let scene = load_scene_file(path)?;
        Ok(self.with_scene(scene).with_source(source))
    }

    /// Load a snapshot from bytes.
    pub fn load_bytes(self, data: &[u8]) -> Result<AuditResult> {
        let scene = load_scene_bytes(data)?;
        Ok(self.with_scene(scene))
    }

    /// Audit an already built scene.
    pub fn with_scene(self, scene: Scene) -> AuditResult {
        AuditResult {
            scene,
            scan_options: self.scan_options,
            render_options: self.render_options,
            source: None,
        }
    }
}

impl Default for ContrastAudit {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded scene ready to scan.
pub struct AuditResult {
    /// The loaded scene
    pub scene: Scene,
    scan_options: ScanOptions,
    render_options: RenderOptions,
    source: Option<String>,
}

impl AuditResult {
    fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }

    /// Scan the saved selection.
    pub fn scan_selection(&self) -> ScanReport {
        self.report(scan_selection(&self.scene, &self.scan_options))
    }

    /// Scan every top-level layer of the page.
    pub fn scan_all(&self) -> ScanReport {
        self.report(scan(&self.scene, self.scene.top_level(), &self.scan_options))
    }

    /// Scan the layers with the given host identifiers.
    ///
    /// Fails with [`Error::UnknownNode`] if any identifier is not in the
    /// scene.
    pub fn scan_nodes<S: AsRef<str>>(&self, keys: &[S]) -> Result<ScanReport> {
        let roots = keys
            .iter()
            .map(|key| {
                let key = key.as_ref();
                self.scene
                    .find(key)
                    .ok_or_else(|| Error::UnknownNode(key.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.report(scan(&self.scene, &roots, &self.scan_options)))
    }

    fn report(&self, response: ScanResponse) -> ScanReport {
        let report = ScanReport::new(response, self.scan_options.thresholds)
            .with_document(self.scene.name());
        match self.source {
            Some(ref source) => report.with_source(source.clone()),
            None => report,
        }
    }

    /// Render the selection scan as Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.scan_selection(), &self.render_options)
    }

    /// Render the selection scan as plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.scan_selection(), &self.render_options)
    }

    /// Render the selection scan as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.scan_selection(), format)
    }

    /// Get the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
