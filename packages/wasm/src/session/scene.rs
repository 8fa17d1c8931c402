//! Render-ready view of a session.
//!
//! Combines the radial layout of the current view root with the per-node
//! flags the presentation layer needs (selection, hover, editing, dimming).
//! Colors and styles are left to the presentation layer.

use serde::Serialize;

use super::highlight::Highlight;
use super::store::SessionStore;
use crate::tree::ops::find_by_id;

/// A laid-out node with its display flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub level: u32,
    pub title: String,
    pub summary: String,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    pub is_hovered: bool,
    pub is_editing: bool,
    pub is_dimmed: bool,
}

/// A visible connection with its emphasis flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    pub source: String,
    pub target: String,
    /// An endpoint is selected or hovered.
    pub highlighted: bool,
    /// An endpoint is the active node.
    pub connected_to_active: bool,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub view_root_id: String,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
    /// Breadcrumb of the selected node.
    pub breadcrumb: Vec<String>,
    pub can_drill_up: bool,
    pub saved_visible: bool,
}

impl SessionStore {
    /// Lay out the current view root and attach display flags.
    pub fn scene(&self) -> Scene {
        let view_root = self.current_view_root();
        let layout = self.layout().compute(view_root, self.expanded_ids());
        let highlight = Highlight::new(self.tree(), self.selected_id(), self.hovered_id());

        let nodes = layout
            .nodes
            .iter()
            .filter_map(|positioned| {
                let node = find_by_id(view_root, &positioned.id)?;
                let id = positioned.id.as_str();
                Some(SceneNode {
                    id: positioned.id.clone(),
                    x: positioned.x,
                    y: positioned.y,
                    level: positioned.level,
                    title: node.title.clone(),
                    summary: node.summary.clone(),
                    has_children: node.has_children(),
                    is_expanded: self.is_expanded(id),
                    is_selected: self.selected_id() == Some(id),
                    is_hovered: self.hovered_id() == Some(id),
                    is_editing: self.editing_id() == Some(id),
                    is_dimmed: highlight.is_dimmed(id),
                })
            })
            .collect();

        let edges = layout
            .connections
            .iter()
            .map(|connection| SceneEdge {
                source: connection.source.clone(),
                target: connection.target.clone(),
                highlighted: highlight.is_edge_highlighted(connection),
                connected_to_active: highlight.is_edge_active(connection),
            })
            .collect();

        let breadcrumb = match self.selected_id() {
            Some(id) => self.breadcrumb(id),
            None => vec![self.config().fallback_breadcrumb.clone()],
        };

        Scene {
            view_root_id: view_root.id.clone(),
            nodes,
            edges,
            breadcrumb,
            can_drill_up: self.can_drill_up(),
            saved_visible: self.is_saved_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node<'a>(scene: &'a Scene, id: &str) -> &'a SceneNode {
        scene
            .nodes
            .iter()
            .find(|node| node.id == id)
            .unwrap_or_else(|| panic!("{id} not in scene"))
    }

    #[test]
    fn test_initial_scene() {
        let store = SessionStore::new();
        let scene = store.scene();

        assert_eq!(scene.view_root_id, "root");
        assert_eq!(scene.nodes.len(), 5, "root plus four branches");
        assert_eq!(scene.edges.len(), 4);
        assert_eq!(scene.breadcrumb, vec!["Root"]);
        assert!(!scene.can_drill_up);
        assert!(scene.nodes.iter().all(|node| !node.is_dimmed));

        let root = node(&scene, "root");
        assert!(root.is_expanded && root.has_children);
        assert_eq!(root.title, "Vitamins in Human Body");
        assert_eq!((root.x, root.y), (0.0, 0.0));
    }

    #[test]
    fn test_selection_flags_and_dimming() {
        let mut store = SessionStore::new();
        store.select(Some("functions"));
        let scene = store.scene();

        assert!(node(&scene, "functions").is_selected);
        assert!(!node(&scene, "root").is_dimmed, "parent of selection");
        assert!(node(&scene, "sources").is_dimmed);
        assert_eq!(
            scene.breadcrumb,
            vec!["Vitamins in Human Body", "Vitamin Functions"]
        );

        let highlighted: Vec<_> = scene
            .edges
            .iter()
            .filter(|edge| edge.highlighted)
            .map(|edge| edge.target.as_str())
            .collect();
        assert_eq!(highlighted, vec!["functions"]);
    }

    #[test]
    fn test_drilled_scene_is_rooted_at_subtree() {
        let mut store = SessionStore::new();
        store.drill_down("fat-soluble");
        let scene = store.scene();

        assert_eq!(scene.view_root_id, "fat-soluble");
        assert!(scene.can_drill_up);
        assert_eq!(scene.nodes.len(), 5);
        let root = node(&scene, "fat-soluble");
        assert_eq!((root.x, root.y, root.level), (0.0, 0.0, 0));
        assert!(scene.nodes.iter().all(|n| n.id != "root"));
    }

    #[test]
    fn test_editing_and_saved_flags() {
        let mut store = SessionStore::new();
        store.set_editing(Some("sources"));
        assert!(node(&store.scene(), "sources").is_editing);

        store.commit_title_edit("sources", "Food Sources");
        let scene = store.scene();
        assert!(!node(&scene, "sources").is_editing);
        assert_eq!(node(&scene, "sources").title, "Food Sources");
        assert!(scene.saved_visible);
    }
}
