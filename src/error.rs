//! Error types for wcagscan library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for wcagscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading scenes or running scans.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a scene snapshot, request, or settings file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The scene snapshot is structurally invalid.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// Two nodes in a snapshot share the same identifier.
    #[error("Duplicate node identifier: {0}")]
    DuplicateNode(String),

    /// A node identifier does not exist in the scene.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// A color channel or opacity is outside [0, 1] or not a number.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A contrast threshold is not a positive finite number.
    #[error("Invalid threshold for {name}: {value}")]
    InvalidThreshold {
        /// Threshold field name (e.g. "normalText")
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// The host failed to load font metrics for a text node.
    #[error("Font loading failed for node {node}: {message}")]
    FontLoad {
        /// Host identifier of the text node
        node: String,
        /// Loader-supplied reason
        message: String,
    },

    /// A per-node evaluation task panicked or was aborted.
    #[error("Scan task failed: {0}")]
    Task(String),

    /// The scan did not finish within the caller's deadline.
    #[error("Scan timed out after {0:?}")]
    Timeout(Duration),

    /// Settings could not be read or written.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Error during report rendering (JSON, text, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
