//! Read-only access to the host document.
//!
//! The scan engine never holds node references across evaluation steps.
//! It keeps [`NodeId`] handles and re-resolves them through
//! [`DocumentQuery`] each time, so a host document that changes while a scan
//! is in flight surfaces as vanished nodes rather than stale data.

use crate::model::{NodeId, Scene, SceneNode};

/// Read access to a live scene graph.
pub trait DocumentQuery: Send + Sync {
    /// Resolve a handle to its node, or `None` if the node no longer exists.
    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    /// Whether the node still exists in the document.
    ///
    /// Evaluation calls this before using a node, after traversal has
    /// already produced its handle.
    fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Parent handle of a live node.
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }
}

impl DocumentQuery for Scene {
    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        if self.is_removed(id) {
            None
        } else {
            self.get(id)
        }
    }
}

impl<Q: DocumentQuery + ?Sized> DocumentQuery for &Q {
    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        (**self).node(id)
    }

    fn is_alive(&self, id: NodeId) -> bool {
        (**self).is_alive(id)
    }
}

impl<Q: DocumentQuery + ?Sized> DocumentQuery for std::sync::Arc<Q> {
    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        (**self).node(id)
    }

    fn is_alive(&self, id: NodeId) -> bool {
        (**self).is_alive(id)
    }
}

#[cfg(feature = "async")]
pub use fonts::{FontLoader, LoadedFonts};

#[cfg(feature = "async")]
mod fonts {
    use crate::error::Result;
    use crate::model::NodeId;
    use std::future::Future;

    /// Host capability that makes a text node's font metrics trustworthy.
    ///
    /// A text node's size and weight are only read after `load_font` for that
    /// node has completed. Loads for different nodes may complete in any
    /// order. The scan never cancels a load; wrap the scan in a timeout to
    /// bound a loader that never resolves.
    pub trait FontLoader: Send + Sync {
        /// Ensure the fonts used by `node` are loaded.
        fn load_font(&self, node: NodeId) -> impl Future<Output = Result<()>> + Send;
    }

    /// Loader for scenes whose metrics are already present, such as
    /// snapshots read from disk.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LoadedFonts;

    impl FontLoader for LoadedFonts {
        fn load_font(&self, _node: NodeId) -> impl Future<Output = Result<()>> + Send {
            std::future::ready(Ok(()))
        }
    }
}
