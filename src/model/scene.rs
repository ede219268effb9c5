//! In-memory scene arena.

use super::{Fill, NodeId, NodeKind, NodeSnapshot, SceneNode, SceneSnapshot, TextStyle};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Key given to the page root of every scene.
pub const ROOT_KEY: &str = "0:0";

/// A page of the design document, stored as an arena of nodes.
///
/// The page root is always [`NodeId(0)`](NodeId). Every other node has
/// exactly one parent, so ancestor walks terminate at the root.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    nodes: Vec<SceneNode>,
    keys: HashMap<String, NodeId>,
    removed: HashSet<NodeId>,
    selection: Vec<NodeId>,
}

impl Scene {
    /// Create an empty page.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let root = SceneNode {
            id: NodeId(0),
            key: ROOT_KEY.to_string(),
            name: name.clone(),
            kind: NodeKind::Page,
            visible: true,
            parent: None,
            children: Vec::new(),
            fills: None,
            text: None,
        };
        let mut keys = HashMap::new();
        keys.insert(ROOT_KEY.to_string(), NodeId(0));

        Self {
            name,
            nodes: vec![root],
            keys,
            removed: HashSet::new(),
            selection: Vec::new(),
        }
    }

    /// Build a scene from a snapshot.
    ///
    /// Fails on duplicate identifiers, invalid fills, or selection entries
    /// that name no node.
    pub fn from_snapshot(snapshot: &SceneSnapshot) -> Result<Self> {
        let mut scene = Scene::new(snapshot.name.clone());

        let mut pending: Vec<(NodeId, &NodeSnapshot)> = snapshot
            .children
            .iter()
            .rev()
            .map(|child| (scene.root(), child))
            .collect();

        while let Some((parent, node)) = pending.pop() {
            let id = scene.add(parent, NodeBuilder::from(node))?;
            pending.extend(node.children.iter().rev().map(|child| (id, child)));
        }

        let selection = snapshot
            .selection
            .iter()
            .map(|key| scene.find(key).ok_or_else(|| Error::UnknownNode(key.clone())))
            .collect::<Result<Vec<_>>>()?;
        scene.selection = selection;

        log::debug!(
            "Loaded scene '{}' with {} nodes ({} selected)",
            scene.name,
            scene.len(),
            scene.selection.len()
        );

        Ok(scene)
    }

    /// Parse a snapshot from JSON and build a scene.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: SceneSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(&snapshot)
    }

    /// Page name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle of the page root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Top-level layers of the page.
    pub fn top_level(&self) -> &[NodeId] {
        &self.nodes[0].children
    }

    /// Number of nodes, including the root and removed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the page has no layers.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Get a node by handle, whether or not it has been removed.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    /// Look up a handle by host identifier.
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Currently selected nodes.
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// Replace the selection.
    pub fn set_selection(&mut self, selection: Vec<NodeId>) {
        self.selection = selection;
    }

    /// Whether a node has been removed.
    pub fn is_removed(&self, id: NodeId) -> bool {
        self.removed.contains(&id)
    }

    /// Add a node as the last child of `parent`.
    pub fn add(&mut self, parent: NodeId, builder: NodeBuilder) -> Result<NodeId> {
        if parent.index() >= self.nodes.len() || self.is_removed(parent) {
            return Err(Error::UnknownNode(parent.to_string()));
        }
        if self.keys.contains_key(&builder.key) {
            return Err(Error::DuplicateNode(builder.key));
        }
        if let Some(fills) = &builder.fills {
            for fill in fills {
                fill.validate()?;
            }
        }

        let id = NodeId(self.nodes.len());
        let text = match builder.kind {
            NodeKind::Text => Some(builder.text.unwrap_or_default()),
            _ => None,
        };
        let name = match (&text, builder.name) {
            (_, Some(name)) => name,
            (Some(style), None) => style.characters.clone(),
            (None, None) => String::new(),
        };

        self.keys.insert(builder.key.clone(), id);
        self.nodes.push(SceneNode {
            id,
            key: builder.key,
            name,
            kind: builder.kind,
            visible: builder.visible,
            parent: Some(parent),
            children: Vec::new(),
            fills: builder.fills,
            text,
        });
        self.nodes[parent.index()].children.push(id);

        Ok(id)
    }

    /// Remove a node and its subtree from the page.
    ///
    /// Handles stay valid but are no longer alive. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        let node = self
            .get(id)
            .filter(|_| !self.is_removed(id))
            .ok_or_else(|| Error::UnknownNode(id.to_string()))?;
        let parent = node
            .parent
            .ok_or_else(|| Error::InvalidScene("cannot remove the page root".to_string()))?;

        self.nodes[parent.index()].children.retain(|child| *child != id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            self.removed.insert(current);
            stack.extend(self.nodes[current.index()].children.iter().copied());
        }
        self.selection.retain(|selected| !self.removed.contains(selected));

        Ok(())
    }
}

/// Description of a node to insert into a [`Scene`].
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    key: String,
    name: Option<String>,
    kind: NodeKind,
    visible: bool,
    fills: Option<Vec<Fill>>,
    text: Option<TextStyle>,
}

impl NodeBuilder {
    /// Start a node of the given kind.
    pub fn new(key: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            key: key.into(),
            name: None,
            kind,
            visible: true,
            fills: None,
            text: None,
        }
    }

    /// Start a frame.
    pub fn frame(key: impl Into<String>) -> Self {
        Self::new(key, NodeKind::Frame)
    }

    /// Start a rectangle.
    pub fn rectangle(key: impl Into<String>) -> Self {
        Self::new(key, NodeKind::Rectangle)
    }

    /// Start a text layer.
    pub fn text(key: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: Some(style),
            ..Self::new(key, NodeKind::Text)
        }
    }

    /// Set the layer name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a fill layer (on top of existing ones).
    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fills.get_or_insert_with(Vec::new).push(fill);
        self
    }

    /// Replace the fill list.
    pub fn with_fills(mut self, fills: Vec<Fill>) -> Self {
        self.fills = Some(fills);
        self
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Hide the layer.
    pub fn hidden(self) -> Self {
        self.with_visible(false)
    }
}

impl From<&NodeSnapshot> for NodeBuilder {
    fn from(node: &NodeSnapshot) -> Self {
        let text = (node.kind == NodeKind::Text).then(|| TextStyle {
            characters: node.characters.clone().unwrap_or_default(),
            font_size: node.font_size,
            font_weight: node.font_weight,
            font_family: node.font_family.clone(),
        });

        Self {
            key: node.id.clone(),
            name: (!node.name.is_empty()).then(|| node.name.clone()),
            kind: node.kind,
            visible: node.visible,
            fills: node.fills.clone(),
            text,
        }
    }
}
