//! Contrast scan orchestration.
//!
//! A scan discovers candidates under the selected roots, resolves each
//! candidate's foreground and background, and compares the contrast ratio
//! against the applicable threshold. Nodes whose colors cannot be resolved,
//! and nodes that vanish from the document mid-scan, are left out of the
//! results rather than reported.
//!
//! # Example
//!
//! ```
//! use wcagscan::model::{Color, Fill, NodeBuilder, Scene, TextStyle};
//! use wcagscan::scan::{scan, ScanOptions};
//!
//! let mut scene = Scene::new("Page");
//! let card = scene
//!     .add(scene.root(), NodeBuilder::frame("1:1").with_fill(Fill::solid(Color::WHITE)))
//!     .unwrap();
//! scene
//!     .add(
//!         card,
//!         NodeBuilder::text("1:2", TextStyle::new("Hello", 16.0, 400.0))
//!             .with_fill(Fill::solid(Color::BLACK)),
//!     )
//!     .unwrap();
//!
//! let response = scan(&scene, &[card], &ScanOptions::default());
//! let text = &response.results[0];
//! assert_eq!(text.contrast_display(), "21.00");
//! assert!(text.pass);
//!
//! // The white card itself sits on the white page: 1:1, below the 3:1 non-text minimum
//! assert!(!response.results[1].pass);
//! ```

#[cfg(feature = "async")]
mod concurrent;
mod options;
mod result;

#[cfg(feature = "async")]
pub use concurrent::{scan_async, scan_async_with_timeout};
pub use options::{ScanOptions, ThresholdConfig};
pub use result::{
    text_label, ResultKind, ScanRequest, ScanResponse, ScanResult, EMPTY_SELECTION_MESSAGE,
    LABEL_MAX_CHARS,
};

use crate::contrast::contrast_ratio;
use crate::model::{NodeId, Scene, TextStyle};
use crate::query::DocumentQuery;
use crate::resolve::resolve_pair;
use crate::traverse::{collect_solid_fill_nodes, collect_text_nodes};
use rayon::prelude::*;

/// Scan the subtrees under `roots`.
///
/// Returns the empty-selection response when `roots` is empty. Otherwise
/// text results come first, then color results, each in traversal order.
pub fn scan<Q>(query: &Q, roots: &[NodeId], options: &ScanOptions) -> ScanResponse
where
    Q: DocumentQuery + ?Sized,
{
    if roots.is_empty() {
        return ScanResponse::empty_selection();
    }

    let text_nodes = collect_text_nodes(query, roots, options.max_depth);
    let fill_nodes = collect_solid_fill_nodes(query, roots, options.max_depth);
    let thresholds = &options.thresholds;

    let (text_results, color_results): (Vec<_>, Vec<_>) = if options.parallel {
        rayon::join(
            || {
                text_nodes
                    .par_iter()
                    .map(|&id| evaluate_text_node(query, id, thresholds))
                    .collect()
            },
            || {
                fill_nodes
                    .par_iter()
                    .map(|&id| evaluate_fill_node(query, id, thresholds))
                    .collect()
            },
        )
    } else {
        (
            text_nodes
                .iter()
                .map(|&id| evaluate_text_node(query, id, thresholds))
                .collect(),
            fill_nodes
                .iter()
                .map(|&id| evaluate_fill_node(query, id, thresholds))
                .collect(),
        )
    };

    let response = ScanResponse::new(assemble(text_results, color_results));
    log::debug!(
        "Scanned {} text and {} fill candidates: {} results, {} failing",
        text_nodes.len(),
        fill_nodes.len(),
        response.results.len(),
        response.failures().count()
    );
    response
}

/// Handle a [`ScanRequest`] against a scene.
///
/// Root identifiers unknown to the scene are dropped. When the request
/// carries no thresholds the WCAG AA defaults apply; the thresholds in
/// `options` are not consulted.
pub fn scan_request(scene: &Scene, request: &ScanRequest, options: &ScanOptions) -> ScanResponse {
    let roots: Vec<NodeId> = request
        .root_nodes
        .iter()
        .filter_map(|key| {
            let found = scene.find(key);
            if found.is_none() {
                log::warn!("Ignoring unknown root node '{}'", key);
            }
            found
        })
        .collect();

    let options = options
        .clone()
        .with_thresholds(request.thresholds.unwrap_or_default());
    scan(scene, &roots, &options)
}

/// Evaluate one text node.
///
/// Returns `None` if the node has vanished or has no solid first fill.
pub fn evaluate_text_node<Q>(
    query: &Q,
    id: NodeId,
    thresholds: &ThresholdConfig,
) -> Option<ScanResult>
where
    Q: DocumentQuery + ?Sized,
{
    if !query.is_alive(id) {
        return None;
    }
    let node = query.node(id)?;
    let pair = resolve_pair(query, id)?;
    let contrast = contrast_ratio(pair.foreground, pair.background);
    let is_large = node.text.as_ref().is_some_and(TextStyle::is_large);
    let required = thresholds.required_for_text(is_large);

    Some(ScanResult {
        kind: ResultKind::Text,
        id: node.key.clone(),
        node: id,
        name: text_label(node.characters()),
        contrast,
        required,
        pass: contrast >= required,
        hex: None,
        foreground: pair.foreground,
        background: pair.background,
    })
}

/// Evaluate one solid-filled node against the non-text threshold.
///
/// Returns `None` if the node has vanished or has no visible solid fill.
pub fn evaluate_fill_node<Q>(
    query: &Q,
    id: NodeId,
    thresholds: &ThresholdConfig,
) -> Option<ScanResult>
where
    Q: DocumentQuery + ?Sized,
{
    if !query.is_alive(id) {
        return None;
    }
    let node = query.node(id)?;
    let pair = resolve_pair(query, id)?;
    let contrast = contrast_ratio(pair.foreground, pair.background);
    let required = thresholds.non_text;

    Some(ScanResult {
        kind: ResultKind::Color,
        id: node.key.clone(),
        node: id,
        name: node.name.clone(),
        contrast,
        required,
        pass: contrast >= required,
        hex: Some(pair.foreground.to_hex()),
        foreground: pair.foreground,
        background: pair.background,
    })
}

fn assemble(
    text_results: Vec<Option<ScanResult>>,
    color_results: Vec<Option<ScanResult>>,
) -> Vec<ScanResult> {
    text_results
        .into_iter()
        .chain(color_results)
        .flatten()
        .collect()
}
