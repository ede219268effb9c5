//! Depth-first discovery of contrast candidates.
//!
//! Two independent passes run over the same roots: one for text layers and
//! one for layers with a visible solid fill. Hidden layers are skipped
//! together with everything beneath them.

pub mod visitor;

pub use visitor::{SceneVisitor, SolidFillCollector, TextCollector, VisitorAction};

use crate::model::NodeId;
use crate::query::DocumentQuery;

/// Default nesting limit for walks and ancestor chains.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Walk the visible subtrees under `roots` in pre-order.
///
/// Roots are visited in the order given, children in their stacking order.
/// Roots that are hidden or no longer exist are skipped. Nodes deeper than
/// `max_depth` below a root are not visited.
pub fn walk<Q, V>(query: &Q, roots: &[NodeId], visitor: &mut V, max_depth: usize)
where
    Q: DocumentQuery + ?Sized,
    V: SceneVisitor + ?Sized,
{
    for &root in roots {
        walk_node(query, root, visitor, 0, max_depth);
    }
}

fn walk_node<Q, V>(query: &Q, id: NodeId, visitor: &mut V, depth: usize, max_depth: usize)
where
    Q: DocumentQuery + ?Sized,
    V: SceneVisitor + ?Sized,
{
    let Some(node) = query.node(id) else {
        return;
    };
    if !node.visible {
        return;
    }

    if visitor.visit_node(node).should_skip() || node.children.is_empty() {
        return;
    }

    if depth >= max_depth {
        log::warn!(
            "Depth limit {} reached at node '{}'; skipping {} children",
            max_depth,
            node.key,
            node.children.len()
        );
        return;
    }

    for &child in &node.children {
        walk_node(query, child, visitor, depth + 1, max_depth);
    }
}

/// Collect visible text layers under `roots`.
pub fn collect_text_nodes<Q>(query: &Q, roots: &[NodeId], max_depth: usize) -> Vec<NodeId>
where
    Q: DocumentQuery + ?Sized,
{
    let mut collector = TextCollector::default();
    walk(query, roots, &mut collector, max_depth);
    log::debug!("Collected {} text nodes", collector.nodes.len());
    collector.nodes
}

/// Collect visible non-text layers that have a visible solid fill.
pub fn collect_solid_fill_nodes<Q>(query: &Q, roots: &[NodeId], max_depth: usize) -> Vec<NodeId>
where
    Q: DocumentQuery + ?Sized,
{
    let mut collector = SolidFillCollector::default();
    walk(query, roots, &mut collector, max_depth);
    log::debug!("Collected {} solid fill nodes", collector.nodes.len());
    collector.nodes
}
