//! Effective foreground and background color resolution.

use crate::model::{Color, NodeId, SceneNode};
use crate::query::DocumentQuery;

/// Color of a text layer: its first fill, if that fill is a visible solid.
///
/// Text uses the first fill rather than the topmost one, matching how design
/// hosts treat the first text paint as primary.
pub fn text_color(node: &SceneNode) -> Option<Color> {
    node.fill_list()
        .first()
        .filter(|fill| fill.is_visible_solid())
        .map(|fill| fill.color)
}

/// Color of the topmost visible solid fill of a layer. Opacity is ignored.
pub fn solid_fill_color(node: &SceneNode) -> Option<Color> {
    node.fill_list()
        .iter()
        .rev()
        .find(|fill| fill.is_visible_solid())
        .map(|fill| fill.color)
}

/// The node's own foreground color.
pub fn own_foreground_color(node: &SceneNode) -> Option<Color> {
    if node.kind.is_text() {
        text_color(node)
    } else {
        solid_fill_color(node)
    }
}

/// Upper bound on ancestor hops when resolving a background.
///
/// A [`Scene`](crate::model::Scene) cannot form a parent cycle, but a host
/// [`DocumentQuery`] might. This is unrelated to the traversal depth limit.
pub const MAX_ANCESTOR_STEPS: usize = 1 << 20;

/// Resolve the color a node is drawn on.
///
/// Walks ancestors from the parent up to the page root. A page or document
/// root yields white. Otherwise the first ancestor whose fills contain a
/// visible solid fill at full opacity (searched topmost first) supplies the
/// color; partly transparent fills are passed over. Reaching the end of the
/// chain or a missing ancestor also yields white.
pub fn background_color<Q>(query: &Q, node: &SceneNode) -> Color
where
    Q: DocumentQuery + ?Sized,
{
    let mut current = node.parent;

    for _ in 0..MAX_ANCESTOR_STEPS {
        let Some(id) = current else {
            return Color::WHITE;
        };
        let Some(ancestor) = query.node(id) else {
            return Color::WHITE;
        };
        if ancestor.kind.is_root() {
            return Color::WHITE;
        }
        if let Some(fill) = ancestor
            .fill_list()
            .iter()
            .rev()
            .find(|fill| fill.is_opaque_solid())
        {
            return fill.color;
        }
        current = ancestor.parent;
    }

    log::warn!(
        "Ancestor chain of '{}' does not reach the page root; assuming white background",
        node.key
    );
    Color::WHITE
}

/// Resolved color pair for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    /// Node's own color
    pub foreground: Color,
    /// Color beneath the node
    pub background: Color,
}

/// Resolve foreground and background for a live node.
///
/// Returns `None` when the node has vanished or has no usable foreground.
pub fn resolve_pair<Q>(query: &Q, id: NodeId) -> Option<ColorPair>
where
    Q: DocumentQuery + ?Sized,
{
    let node = query.node(id)?;
    let foreground = own_foreground_color(node)?;
    let background = background_color(query, node);
    Some(ColorPair {
        foreground,
        background,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fill, FillKind, NodeBuilder, Scene, TextStyle};

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    const GREEN: Color = Color::new(0.0, 1.0, 0.0);

    fn rect_with(fills: Vec<Fill>) -> (Scene, NodeId) {
        let mut scene = Scene::new("Page");
        let id = scene
            .add(scene.root(), NodeBuilder::rectangle("r").with_fills(fills))
            .unwrap();
        (scene, id)
    }

    #[test]
    fn test_solid_fill_color_uses_topmost() {
        let (scene, id) = rect_with(vec![Fill::solid(RED), Fill::solid(BLUE)]);
        assert_eq!(solid_fill_color(scene.get(id).unwrap()), Some(BLUE));

        let (scene, id) = rect_with(vec![Fill::solid(RED), Fill::solid(BLUE).hidden()]);
        assert_eq!(solid_fill_color(scene.get(id).unwrap()), Some(RED));
    }

    #[test]
    fn test_solid_fill_color_ignores_opacity() {
        let (scene, id) = rect_with(vec![Fill::solid(RED), Fill::solid(BLUE).with_opacity(0.2)]);
        assert_eq!(solid_fill_color(scene.get(id).unwrap()), Some(BLUE));
    }

    #[test]
    fn test_solid_fill_color_none() {
        let (scene, id) = rect_with(vec![Fill::of_kind(FillKind::Image)]);
        assert_eq!(solid_fill_color(scene.get(id).unwrap()), None);
    }

    #[test]
    fn test_text_color_uses_first_fill_only() {
        let mut scene = Scene::new("Page");
        let style = TextStyle::new("Hi", 16.0, 400.0);
        let first_hidden = scene
            .add(
                scene.root(),
                NodeBuilder::text("t1", style.clone())
                    .with_fill(Fill::solid(RED).hidden())
                    .with_fill(Fill::solid(BLUE)),
            )
            .unwrap();
        let first_solid = scene
            .add(
                scene.root(),
                NodeBuilder::text("t2", style)
                    .with_fill(Fill::solid(RED))
                    .with_fill(Fill::solid(BLUE)),
            )
            .unwrap();

        // Text layers read the first fill, unlike shapes which read the topmost
        assert_eq!(text_color(scene.get(first_hidden).unwrap()), None);
        assert_eq!(own_foreground_color(scene.get(first_solid).unwrap()), Some(RED));
    }

    #[test]
    fn test_background_defaults_to_white() {
        let mut scene = Scene::new("Page");
        let frame = scene.add(scene.root(), NodeBuilder::frame("f")).unwrap();
        let rect = scene.add(frame, NodeBuilder::rectangle("r")).unwrap();

        let node = scene.get(rect).unwrap();
        assert_eq!(background_color(&scene, node), Color::WHITE);
    }

    #[test]
    fn test_background_from_parent() {
        let mut scene = Scene::new("Page");
        let frame = scene
            .add(scene.root(), NodeBuilder::frame("f").with_fill(Fill::solid(GREEN)))
            .unwrap();
        let rect = scene.add(frame, NodeBuilder::rectangle("r")).unwrap();

        let node = scene.get(rect).unwrap();
        assert_eq!(background_color(&scene, node), GREEN);
    }

    #[test]
    fn test_background_skips_translucent_parent() {
        let mut scene = Scene::new("Page");
        let outer = scene
            .add(scene.root(), NodeBuilder::frame("outer").with_fill(Fill::solid(BLUE)))
            .unwrap();
        let inner = scene
            .add(
                outer,
                NodeBuilder::frame("inner").with_fill(Fill::solid(GREEN).with_opacity(0.5)),
            )
            .unwrap();
        let rect = scene.add(inner, NodeBuilder::rectangle("r")).unwrap();

        let node = scene.get(rect).unwrap();
        assert_eq!(background_color(&scene, node), BLUE);
    }

    #[test]
    fn test_background_translucent_only_defaults_to_white() {
        let mut scene = Scene::new("Page");
        let frame = scene
            .add(
                scene.root(),
                NodeBuilder::frame("f").with_fill(Fill::solid(GREEN).with_opacity(0.5)),
            )
            .unwrap();
        let rect = scene.add(frame, NodeBuilder::rectangle("r")).unwrap();

        let node = scene.get(rect).unwrap();
        assert_eq!(background_color(&scene, node), Color::WHITE);
    }

    #[test]
    fn test_background_scans_within_node_before_escalating() {
        let mut scene = Scene::new("Page");
        let outer = scene
            .add(scene.root(), NodeBuilder::frame("outer").with_fill(Fill::solid(BLUE)))
            .unwrap();
        let inner = scene
            .add(
                outer,
                NodeBuilder::frame("inner")
                    .with_fill(Fill::solid(RED))
                    .with_fill(Fill::solid(GREEN).with_opacity(0.5))
                    .with_fill(Fill::solid(BLUE).hidden()),
            )
            .unwrap();
        let rect = scene.add(inner, NodeBuilder::rectangle("r")).unwrap();

        let node = scene.get(rect).unwrap();
        assert_eq!(background_color(&scene, node), RED);
    }

    #[test]
    fn test_background_walks_past_deep_empty_frames() {
        let mut scene = Scene::new("Page");
        let colored = scene
            .add(scene.root(), NodeBuilder::frame("c").with_fill(Fill::solid(GREEN)))
            .unwrap();
        let mut parent = colored;
        for i in 0..600 {
            parent = scene
                .add(parent, NodeBuilder::frame(format!("m{}", i)))
                .unwrap();
        }
        let rect = scene.add(parent, NodeBuilder::rectangle("r")).unwrap();

        let node = scene.get(rect).unwrap();
        assert_eq!(background_color(&scene, node), GREEN);
    }

    /// Query whose single frame claims to be its own parent.
    struct SelfParented {
        frame: SceneNode,
        leaf: SceneNode,
    }

    impl DocumentQuery for SelfParented {
        fn node(&self, id: NodeId) -> Option<&SceneNode> {
            if id == self.frame.id {
                Some(&self.frame)
            } else if id == self.leaf.id {
                Some(&self.leaf)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_background_cyclic_chain_defaults_to_white() {
        let mut scene = Scene::new("Page");
        let frame = scene.add(scene.root(), NodeBuilder::frame("f")).unwrap();
        let leaf = scene.add(frame, NodeBuilder::rectangle("r")).unwrap();

        let mut frame_node = scene.get(frame).unwrap().clone();
        frame_node.parent = Some(frame);
        let query = SelfParented {
            frame: frame_node,
            leaf: scene.get(leaf).unwrap().clone(),
        };

        assert_eq!(background_color(&query, &query.leaf), Color::WHITE);
    }

    #[test]
    fn test_resolve_pair() {
        let mut scene = Scene::new("Page");
        let frame = scene
            .add(scene.root(), NodeBuilder::frame("f").with_fill(Fill::solid(BLUE)))
            .unwrap();
        let rect = scene
            .add(frame, NodeBuilder::rectangle("r").with_fill(Fill::solid(RED)))
            .unwrap();
        let bare = scene.add(frame, NodeBuilder::rectangle("bare")).unwrap();

        let pair = resolve_pair(&scene, rect).unwrap();
        assert_eq!(pair.foreground, RED);
        assert_eq!(pair.background, BLUE);
        assert!(resolve_pair(&scene, bare).is_none());

        scene.remove(rect).unwrap();
        assert!(resolve_pair(&scene, rect).is_none());
    }
}
