//! Visitor pattern for scene traversal.
//!
//! [`walk`](super::walk) handles ordering, visibility, and the depth guard;
//! visitors only decide what to record and whether to descend.
//!
//! # Example
//!
//! ```
//! use wcagscan::model::{NodeKind, SceneNode};
//! use wcagscan::traverse::{SceneVisitor, VisitorAction};
//!
//! struct FrameCounter(usize);
//!
//! impl SceneVisitor for FrameCounter {
//!     fn visit_node(&mut self, node: &SceneNode) -> VisitorAction {
//!         if node.kind == NodeKind::Frame {
//!             self.0 += 1;
//!         }
//!         VisitorAction::Continue
//!     }
//! }
//! ```

use crate::model::{NodeId, SceneNode};

/// Action returned by a visitor to control descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitorAction {
    /// Walk this node's children next.
    #[default]
    Continue,

    /// Do not walk this node's children.
    SkipChildren,
}

impl VisitorAction {
    /// Check if this action prunes the subtree.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::SkipChildren)
    }
}

/// Trait for visiting visible scene nodes in pre-order.
pub trait SceneVisitor {
    /// Called once for every visible node reached by the walk.
    fn visit_node(&mut self, node: &SceneNode) -> VisitorAction;
}

/// Collects text layers. Text layers are leaves, so their subtree is skipped.
#[derive(Debug, Clone, Default)]
pub struct TextCollector {
    /// Collected handles in traversal order
    pub nodes: Vec<NodeId>,
}

impl SceneVisitor for TextCollector {
    fn visit_node(&mut self, node: &SceneNode) -> VisitorAction {
        if node.kind.is_text() {
            self.nodes.push(node.id);
            VisitorAction::SkipChildren
        } else {
            VisitorAction::Continue
        }
    }
}

/// Collects non-text layers that carry at least one visible solid fill.
///
/// Opacity is not considered. Collected containers are still descended into.
#[derive(Debug, Clone, Default)]
pub struct SolidFillCollector {
    /// Collected handles in traversal order
    pub nodes: Vec<NodeId>,
}

impl SceneVisitor for SolidFillCollector {
    fn visit_node(&mut self, node: &SceneNode) -> VisitorAction {
        if !node.kind.is_text() && node.has_visible_solid_fill() {
            self.nodes.push(node.id);
        }
        VisitorAction::Continue
    }
}
