//! Integration tests for scene traversal and custom visitors.

use wcagscan::model::{Color, Fill, NodeBuilder, NodeKind, Scene, SceneNode, TextStyle};
use wcagscan::traverse::{
    collect_solid_fill_nodes, collect_text_nodes, walk, SceneVisitor, VisitorAction,
    DEFAULT_MAX_DEPTH,
};
use wcagscan::NodeId;

/// Custom visitor that records node keys and stops at groups.
struct KeyRecorder {
    keys: Vec<String>,
}

impl SceneVisitor for KeyRecorder {
    fn visit_node(&mut self, node: &SceneNode) -> VisitorAction {
        self.keys.push(node.key.clone());
        if node.kind == NodeKind::Group {
            VisitorAction::SkipChildren
        } else {
            VisitorAction::Continue
        }
    }
}

fn text(key: &str) -> NodeBuilder {
    NodeBuilder::text(key, TextStyle::new(key, 16.0, 400.0)).with_fill(Fill::solid(Color::BLACK))
}

fn keys(scene: &Scene, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| scene.get(id).unwrap().key.clone())
        .collect()
}

/// page
/// ├── header (frame, white)
/// │   ├── logo (rect, black)
/// │   └── title (text)
/// ├── hidden-panel (frame, hidden)
/// │   └── secret (text)
/// └── group (group)
///     ├── caption (text)
///     └── icon (rect, hidden fill)
fn layout() -> Scene {
    let mut scene = Scene::new("Page");
    let root = scene.root();

    let header = scene
        .add(root, NodeBuilder::frame("header").with_fill(Fill::solid(Color::WHITE)))
        .unwrap();
    scene
        .add(header, NodeBuilder::rectangle("logo").with_fill(Fill::solid(Color::BLACK)))
        .unwrap();
    scene.add(header, text("title")).unwrap();

    let hidden = scene
        .add(root, NodeBuilder::frame("hidden-panel").hidden())
        .unwrap();
    scene.add(hidden, text("secret")).unwrap();

    let group = scene
        .add(root, NodeBuilder::new("group", NodeKind::Group))
        .unwrap();
    scene.add(group, text("caption")).unwrap();
    scene
        .add(
            group,
            NodeBuilder::rectangle("icon").with_fill(Fill::solid(Color::BLACK).hidden()),
        )
        .unwrap();

    scene
}

#[test]
fn test_text_and_fill_passes_are_independent() {
    let scene = layout();
    let roots = scene.top_level().to_vec();

    let text_nodes = collect_text_nodes(&scene, &roots, DEFAULT_MAX_DEPTH);
    let fill_nodes = collect_solid_fill_nodes(&scene, &roots, DEFAULT_MAX_DEPTH);

    assert_eq!(keys(&scene, &text_nodes), vec!["title", "caption"]);
    assert_eq!(keys(&scene, &fill_nodes), vec!["header", "logo"]);
}

#[test]
fn test_roots_visited_in_given_order() {
    let scene = layout();
    let header = scene.find("header").unwrap();
    let group = scene.find("group").unwrap();

    let text_nodes = collect_text_nodes(&scene, &[group, header], DEFAULT_MAX_DEPTH);
    assert_eq!(keys(&scene, &text_nodes), vec!["caption", "title"]);
}

#[test]
fn test_hidden_root_yields_nothing() {
    let scene = layout();
    let hidden = scene.find("hidden-panel").unwrap();
    assert!(collect_text_nodes(&scene, &[hidden], DEFAULT_MAX_DEPTH).is_empty());
}

#[test]
fn test_custom_visitor_skip_children() {
    let scene = layout();
    let mut recorder = KeyRecorder { keys: Vec::new() };
    walk(&scene, scene.top_level(), &mut recorder, DEFAULT_MAX_DEPTH);

    assert_eq!(
        recorder.keys,
        vec!["header", "logo", "title", "group"]
    );
}

#[test]
fn test_removed_subtree_is_not_walked() {
    let mut scene = layout();
    let header = scene.find("header").unwrap();
    let roots = scene.top_level().to_vec();
    scene.remove(header).unwrap();

    let text_nodes = collect_text_nodes(&scene, &roots, DEFAULT_MAX_DEPTH);
    assert_eq!(keys(&scene, &text_nodes), vec!["caption"]);
}

#[test]
fn test_deep_nesting_is_bounded() {
    let mut scene = Scene::new("Page");
    let mut parent = scene.root();
    for i in 0..40 {
        parent = scene
            .add(parent, NodeBuilder::frame(format!("f{}", i)))
            .unwrap();
    }
    scene.add(parent, text("deep")).unwrap();

    let top = scene.top_level().to_vec();
    assert_eq!(collect_text_nodes(&scene, &top, DEFAULT_MAX_DEPTH).len(), 1);
    assert!(collect_text_nodes(&scene, &top, 10).is_empty());
}
