//! Scene model types for design document content.
//!
//! This module defines the in-memory representation of one page of a
//! design document: colors, fill layers, nodes, and the [`Scene`] arena that
//! owns them. Scenes are built either programmatically with
//! [`NodeBuilder`] or from a JSON [`SceneSnapshot`] exported by the host.

mod color;
mod fill;
mod node;
mod scene;
mod snapshot;

pub use color::Color;
pub use fill::{Fill, FillKind};
pub use node::{NodeId, NodeKind, SceneNode, TextStyle};
pub use scene::{NodeBuilder, Scene, ROOT_KEY};
pub use snapshot::{NodeSnapshot, SceneSnapshot};
