//! Asynchronous scan with per-node font loading.

use super::{
    assemble, evaluate_fill_node, evaluate_text_node, ScanOptions, ScanResponse, ScanResult,
};
use crate::error::{Error, Result};
use crate::model::NodeId;
use crate::query::{DocumentQuery, FontLoader};
use crate::traverse::{collect_solid_fill_nodes, collect_text_nodes};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

type Slot = (usize, Option<ScanResult>);

/// Scan the subtrees under `roots`, loading fonts for each text node.
///
/// Every candidate is evaluated in its own task. A text task checks that its
/// node is alive, awaits [`FontLoader::load_font`], and checks again before
/// reading font metrics. Results are reassembled in traversal order no
/// matter which loads finish first.
///
/// A failed font load fails the whole scan once the remaining tasks have
/// finished. A load that never completes stalls the scan; see
/// [`scan_async_with_timeout`].
pub async fn scan_async<Q, F>(
    query: Arc<Q>,
    fonts: Arc<F>,
    roots: &[NodeId],
    options: &ScanOptions,
) -> Result<ScanResponse>
where
    Q: DocumentQuery + 'static,
    F: FontLoader + 'static,
{
    if roots.is_empty() {
        return Ok(ScanResponse::empty_selection());
    }

    let text_nodes = collect_text_nodes(query.as_ref(), roots, options.max_depth);
    let fill_nodes = collect_solid_fill_nodes(query.as_ref(), roots, options.max_depth);
    let thresholds = options.thresholds;

    let mut text_tasks = JoinSet::new();
    for (index, id) in text_nodes.iter().copied().enumerate() {
        let query = Arc::clone(&query);
        let fonts = Arc::clone(&fonts);
        text_tasks.spawn(async move {
            if !query.is_alive(id) {
                return Ok((index, None));
            }
            fonts.load_font(id).await?;
            let result = evaluate_text_node(query.as_ref(), id, &thresholds);
            Ok::<Slot, Error>((index, result))
        });
    }

    let mut fill_tasks = JoinSet::new();
    for (index, id) in fill_nodes.iter().copied().enumerate() {
        let query = Arc::clone(&query);
        fill_tasks.spawn(async move {
            let result = evaluate_fill_node(query.as_ref(), id, &thresholds);
            Ok::<Slot, Error>((index, result))
        });
    }

    let text_results = join_ordered(text_tasks, text_nodes.len()).await?;
    let color_results = join_ordered(fill_tasks, fill_nodes.len()).await?;

    let response = ScanResponse::new(assemble(text_results, color_results));
    log::debug!(
        "Async scan of {} text and {} fill candidates produced {} results",
        text_nodes.len(),
        fill_nodes.len(),
        response.results.len()
    );
    Ok(response)
}

/// Run [`scan_async`] with a deadline.
///
/// Returns [`Error::Timeout`] if the scan, including every font load, does
/// not finish within `timeout`.
pub async fn scan_async_with_timeout<Q, F>(
    query: Arc<Q>,
    fonts: Arc<F>,
    roots: &[NodeId],
    options: &ScanOptions,
    timeout: Duration,
) -> Result<ScanResponse>
where
    Q: DocumentQuery + 'static,
    F: FontLoader + 'static,
{
    tokio::time::timeout(timeout, scan_async(query, fonts, roots, options))
        .await
        .map_err(|_| Error::Timeout(timeout))?
}

async fn join_ordered(
    mut tasks: JoinSet<Result<Slot>>,
    len: usize,
) -> Result<Vec<Option<ScanResult>>> {
    let mut slots = vec![None; len];
    let mut first_error = None;
    // Started tasks run to completion; the first failure is reported after
    // the set has drained.
    while let Some(joined) = tasks.join_next().await {
        match joined.map_err(|e| Error::Task(e.to_string())).and_then(|slot| slot) {
            Ok((index, result)) => slots[index] = result,
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(slots),
    }
}
