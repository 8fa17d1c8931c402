//! Mindmap - WASM Module
//!
//! This module provides the tree-state engine and radial layout for the
//! mindmap viewer/editor. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `tree`: Document model, copy-on-write operations, JSON codec, seed data
//! - `layout`: Radial layout of the visible (expanded) part of a subtree
//! - `session`: Session store (selection, expansion, drill-down) and scene
//! - `spatial`: R-tree index over a layout for hit testing

use log::LevelFilter;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod layout;
mod logging;
pub mod session;
pub mod spatial;
pub mod tree;

use session::SessionStore;
use spatial::LayoutIndex;
use tree::NodePatch;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::install(LevelFilter::Warn);
}

/// Change the console log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter = logging::parse_level(level)?;
    logging::install(filter);
    Ok(())
}

/// Main entry point for the mindmap session.
///
/// This struct wraps the internal SessionStore and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct MindmapWasm {
    store: SessionStore,
}

#[wasm_bindgen]
impl MindmapWasm {
    /// Create a session on the built-in seed document.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            store: SessionStore::new(),
        }
    }

    /// Create a session from an exported JSON document.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(text: &str) -> Result<MindmapWasm, JsError> {
        let mut store = SessionStore::new();
        store.load_json(text)?;
        Ok(Self { store })
    }

    // =========================================================================
    // Selection, Hover, Editing
    // =========================================================================

    #[wasm_bindgen(js_name = selectedId)]
    pub fn selected_id(&self) -> Option<String> {
        self.store.selected_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = hoveredId)]
    pub fn hovered_id(&self) -> Option<String> {
        self.store.hovered_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = editingId)]
    pub fn editing_id(&self) -> Option<String> {
        self.store.editing_id().map(str::to_string)
    }

    pub fn select(&mut self, id: Option<String>) {
        self.store.select(id.as_deref());
    }

    pub fn hover(&mut self, id: Option<String>) {
        self.store.hover(id.as_deref());
    }

    #[wasm_bindgen(js_name = setEditing)]
    pub fn set_editing(&mut self, id: Option<String>) {
        self.store.set_editing(id.as_deref());
    }

    /// Click on a rendered node (select, or toggle if already selected).
    #[wasm_bindgen(js_name = clickNode)]
    pub fn click_node(&mut self, id: &str) {
        self.store.click_node(id);
    }

    // =========================================================================
    // Expansion and Drill-down
    // =========================================================================

    #[wasm_bindgen(js_name = toggleExpansion)]
    pub fn toggle_expansion(&mut self, id: &str) {
        self.store.toggle_expansion(id);
    }

    #[wasm_bindgen(js_name = expandAll)]
    pub fn expand_all(&mut self) {
        self.store.expand_all();
    }

    #[wasm_bindgen(js_name = collapseAll)]
    pub fn collapse_all(&mut self) {
        self.store.collapse_all();
    }

    #[wasm_bindgen(js_name = isExpanded)]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.store.is_expanded(id)
    }

    #[wasm_bindgen(js_name = expandedIds)]
    pub fn expanded_ids(&self) -> Vec<String> {
        self.store.expanded_ids().iter().cloned().collect()
    }

    /// Drill into `id`. Ignored for leaves and unknown ids.
    #[wasm_bindgen(js_name = drillDown)]
    pub fn drill_down(&mut self, id: &str) {
        self.store.drill_down(id);
    }

    /// Drill into `id`, throwing when the request is rejected.
    #[wasm_bindgen(js_name = tryDrillDown)]
    pub fn try_drill_down(&mut self, id: &str) -> Result<(), JsError> {
        Ok(self.store.try_drill_down(id)?)
    }

    #[wasm_bindgen(js_name = drillIntoSelection)]
    pub fn drill_into_selection(&mut self) {
        self.store.drill_into_selection();
    }

    #[wasm_bindgen(js_name = drillUp)]
    pub fn drill_up(&mut self) {
        self.store.drill_up();
    }

    #[wasm_bindgen(js_name = tryDrillUp)]
    pub fn try_drill_up(&mut self) -> Result<(), JsError> {
        Ok(self.store.try_drill_up()?)
    }

    #[wasm_bindgen(js_name = canDrillUp)]
    pub fn can_drill_up(&self) -> bool {
        self.store.can_drill_up()
    }

    #[wasm_bindgen(js_name = drillPath)]
    pub fn drill_path(&self) -> Vec<String> {
        self.store.drill_path().to_vec()
    }

    #[wasm_bindgen(js_name = viewRootId)]
    pub fn view_root_id(&self) -> String {
        self.store.current_view_root().id.clone()
    }

    // =========================================================================
    // Document Edits
    // =========================================================================

    /// Add a default child under `parent_id`. Returns the new id, or
    /// undefined when the parent does not exist.
    #[wasm_bindgen(js_name = addChild)]
    pub fn add_child(&mut self, parent_id: &str) -> Option<String> {
        self.store.add_child(parent_id)
    }

    #[wasm_bindgen(js_name = tryAddChild)]
    pub fn try_add_child(&mut self, parent_id: &str) -> Result<String, JsError> {
        Ok(self.store.try_add_child(parent_id)?)
    }

    /// Add a child under the selection, or the root when nothing is selected.
    #[wasm_bindgen(js_name = addChildToSelection)]
    pub fn add_child_to_selection(&mut self) -> Option<String> {
        self.store.add_child_to_selection()
    }

    /// Merge a partial node object (`{ title?, summary?, description?, notes? }`).
    #[wasm_bindgen(js_name = updateNode)]
    pub fn update_node(&mut self, id: &str, patch: JsValue) -> Result<(), JsError> {
        let patch: NodePatch = serde_wasm_bindgen::from_value(patch)?;
        self.store.update_node(id, &patch);
        Ok(())
    }

    #[wasm_bindgen(js_name = tryUpdateNode)]
    pub fn try_update_node(&mut self, id: &str, patch: JsValue) -> Result<(), JsError> {
        let patch: NodePatch = serde_wasm_bindgen::from_value(patch)?;
        Ok(self.store.try_update_node(id, &patch)?)
    }

    /// Save the detail editor form. Empty description/notes clear the field.
    #[wasm_bindgen(js_name = saveForm)]
    pub fn save_form(
        &mut self,
        id: &str,
        title: &str,
        summary: &str,
        description: &str,
        notes: &str,
    ) {
        let patch = NodePatch::from_form(title, summary, description, notes);
        self.store.update_node(id, &patch);
    }

    #[wasm_bindgen(js_name = commitTitleEdit)]
    pub fn commit_title_edit(&mut self, id: &str, text: &str) {
        self.store.commit_title_edit(id, text);
    }

    #[wasm_bindgen(js_name = tryCommitTitleEdit)]
    pub fn try_commit_title_edit(&mut self, id: &str, text: &str) -> Result<(), JsError> {
        Ok(self.store.try_commit_title_edit(id, text)?)
    }

    #[wasm_bindgen(js_name = isSavedVisible)]
    pub fn is_saved_visible(&self) -> bool {
        self.store.is_saved_visible()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The node `id` as a plain object, or undefined.
    #[wasm_bindgen(js_name = findNode)]
    pub fn find_node(&self, id: &str) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.store.find_node(id))?)
    }

    pub fn breadcrumb(&self, id: &str) -> Vec<String> {
        self.store.breadcrumb(id)
    }

    /// `{ parentId, childIds }` of `id` in the full document.
    #[wasm_bindgen(js_name = connectedIds)]
    pub fn connected_ids(&self, id: &str) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.store.connected_ids(id))?)
    }

    /// Raw layout `{ nodes: [{id, x, y, level}], connections: [{source, target}] }`
    /// of the current view root.
    pub fn layout(&self) -> Result<JsValue, JsError> {
        let result = self
            .store
            .layout()
            .compute(self.store.current_view_root(), self.store.expanded_ids());
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    /// Layout plus display flags for one render pass.
    pub fn scene(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.store.scene())?)
    }

    /// Id of the visible node nearest to `(x, y)` within `radius`.
    #[wasm_bindgen(js_name = nodeAt)]
    pub fn node_at(&self, x: f64, y: f64, radius: f64) -> Option<String> {
        let result = self
            .store
            .layout()
            .compute(self.store.current_view_root(), self.store.expanded_ids());
        LayoutIndex::from_layout(&result)
            .nearest_within(x, y, radius)
            .map(str::to_string)
    }

    // =========================================================================
    // Import / Export
    // =========================================================================

    /// The full document as pretty-printed JSON.
    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsError> {
        Ok(self.store.export_document()?)
    }

    /// Replace the document and reset the view state.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, text: &str) -> Result<(), JsError> {
        Ok(self.store.load_json(text)?)
    }

    /// Suggested file name for downloads.
    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name() -> String {
        tree::EXPORT_FILE_NAME.to_string()
    }
}

impl Default for MindmapWasm {
    fn default() -> Self {
        Self::new()
    }
}

impl From<SessionStore> for MindmapWasm {
    fn from(store: SessionStore) -> Self {
        Self { store }
    }
}

#[cfg(test)]
mod integration_tests {
    use std::collections::HashSet;
    use std::f64::consts::TAU;

    use super::*;
    use crate::layout::{RadialLayout, RadialLayoutConfig};
    use crate::session::{ManualClock, SessionConfig};
    use crate::tree::ops::{collect_all_ids, find_by_id};
    use crate::tree::{export_json, import_json, seed_document};

    /// Full pipeline: store → layout → spatial index, without JS types.
    #[test]
    fn test_store_layout_index_pipeline() {
        let mut store = SessionStore::new();
        store.expand_all();

        let layout = store
            .layout()
            .compute(store.current_view_root(), store.expanded_ids());
        println!("laid out {} nodes", layout.nodes.len());
        assert_eq!(layout.nodes.len(), 25, "every seed node is visible");
        assert_eq!(layout.connections.len(), 24, "a tree has n - 1 links");

        // Every connection is a real parent/child pair in the document
        for connection in &layout.connections {
            let parent = store.connected_ids(&connection.target).parent_id;
            assert_eq!(parent.as_deref(), Some(connection.source.as_str()));
        }

        // Levels match document depth
        let depth_of = |id: &str| store.breadcrumb(id).len() as u32 - 1;
        for node in &layout.nodes {
            assert_eq!(node.level, depth_of(&node.id), "level of {}", node.id);
        }

        // Hit testing recovers each laid-out node from its own position
        let index = LayoutIndex::from_layout(&layout);
        for node in &layout.nodes {
            assert_eq!(index.nearest_within(node.x, node.y, 1.0), Some(node.id.as_str()));
        }
    }

    /// Scenario: drill into a subtree, breadcrumb still shows full ancestry.
    #[test]
    fn test_breadcrumb_while_drilled() {
        let mut store = SessionStore::new();
        store.drill_down("fat-soluble");
        assert_eq!(store.current_view_root().id, "fat-soluble");
        assert_eq!(
            store.breadcrumb("vitamin-a"),
            vec![
                "Vitamins in Human Body",
                "Vitamin Classification",
                "Fat-Soluble Vitamins",
                "Vitamin A (Retinol)",
            ]
        );
    }

    /// Child angles under the root partition the full circle.
    #[test]
    fn test_root_children_partition_circle() {
        let store = SessionStore::new();
        let layout = store
            .layout()
            .compute(store.current_view_root(), store.expanded_ids());

        let children: Vec<_> = layout.nodes.iter().filter(|n| n.level == 1).collect();
        assert_eq!(children.len(), 4);
        for (i, child) in children.iter().enumerate() {
            let expected = TAU / 4.0 * (i as f64 + 0.5);
            let angle = child.y.atan2(child.x).rem_euclid(TAU);
            assert!((angle - expected).abs() < 1e-9, "child {i} at {angle}, expected {expected}");
            let radius = (child.x * child.x + child.y * child.y).sqrt();
            assert!((radius - 200.0).abs() < 1e-9);
        }
    }

    /// Collapsed subtrees add nothing to the layout.
    #[test]
    fn test_collapsed_subtree_hidden() {
        let mut store = SessionStore::new();
        store.toggle_expansion("classification");
        let layout = store
            .layout()
            .compute(store.current_view_root(), store.expanded_ids());
        let ids: HashSet<_> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
        assert!(ids.contains("fat-soluble") && ids.contains("water-soluble"));
        assert!(!ids.contains("vitamin-a"), "fat-soluble is still collapsed");
        assert_eq!(layout.nodes.len(), 7);
    }

    /// Edits made through the store survive an export/import cycle.
    #[test]
    fn test_edit_export_import() {
        let clock = ManualClock::default();
        let mut store =
            SessionStore::with_document(seed_document(), SessionConfig::default(), Box::new(clock));
        let id = store.add_child("b-complex").unwrap();
        let patch = NodePatch::from_form("B6 (Pyridoxine)", "Amino acid metabolism.", "", "");
        store.update_node(&id, &patch);

        let text = store.export_document().unwrap();
        let back = import_json(&text).unwrap();
        assert_eq!(*back, **store.tree());
        assert_eq!(collect_all_ids(&back), collect_all_ids(store.tree()));
        assert_eq!(
            find_by_id(&back, &id).map(|n| n.title.as_str()),
            Some("B6 (Pyridoxine)")
        );
        assert_eq!(export_json(&back).unwrap(), text);
    }

    /// Nodes added under the selection nest one level per add; the result
    /// must still load back.
    #[test]
    fn test_nested_adds_reload() {
        let mut store = SessionStore::new();
        store.select(Some("deficiency"));
        for _ in 0..200 {
            store.add_child_to_selection().unwrap();
        }
        let deepest = store.selected_id().unwrap().to_string();
        assert_eq!(store.breadcrumb(&deepest).len(), 202);

        let text = store.export_document().unwrap();
        let mut reloaded = SessionStore::new();
        reloaded.load_json(&text).unwrap();
        assert_eq!(**reloaded.tree(), **store.tree());
        println!("reloaded {} bytes, depth {}", text.len(), reloaded.breadcrumb(&deepest).len());
    }

    /// A custom layout configuration flows through the store.
    #[test]
    fn test_store_with_custom_layout() {
        let store = SessionStore::new().with_layout(RadialLayout::new(RadialLayoutConfig {
            base_radius: 50.0,
            ..Default::default()
        }));
        let scene = store.scene();
        let child = scene.nodes.iter().find(|n| n.level == 1).unwrap();
        let radius = (child.x * child.x + child.y * child.y).sqrt();
        assert!((radius - 50.0).abs() < 1e-9, "radius {radius}");
    }

    #[test]
    fn test_facade_wraps_store() {
        let mut wasm = MindmapWasm::from(SessionStore::new());
        wasm.select(Some("sources".to_string()));
        wasm.drill_into_selection();
        assert_eq!(wasm.view_root_id(), "sources");
        assert_eq!(wasm.drill_path(), vec!["sources"]);
        assert!(wasm.can_drill_up());

        let id = wasm.add_child_to_selection().unwrap();
        assert_eq!(wasm.selected_id(), Some(id.clone()));
        wasm.save_form(&id, "Legumes", "Beans and lentils.", "", "");
        assert_eq!(wasm.breadcrumb(&id).last().map(String::as_str), Some("Legumes"));

        wasm.drill_up();
        assert_eq!(wasm.view_root_id(), "root");
        assert_eq!(MindmapWasm::export_file_name(), "mindmap-data.json");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use serde::Deserialize;
    use wasm_bindgen_test::*;

    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct SceneView {
        view_root_id: String,
        nodes: Vec<serde_json::Value>,
        saved_visible: bool,
    }

    #[wasm_bindgen_test]
    fn test_update_node_from_js_object() {
        let mut wasm = MindmapWasm::new();
        let patch = js_sys::Object::new();
        js_sys::Reflect::set(&patch, &"title".into(), &"Sources of Vitamins".into()).unwrap();
        js_sys::Reflect::set(&patch, &"notes".into(), &JsValue::NULL).unwrap();
        wasm.update_node("sources", patch.into()).unwrap();

        assert_eq!(
            wasm.breadcrumb("sources").last().map(String::as_str),
            Some("Sources of Vitamins")
        );
        assert!(wasm.is_saved_visible());
    }

    #[wasm_bindgen_test]
    fn test_scene_crosses_boundary() {
        let wasm = MindmapWasm::new();
        let scene: SceneView = serde_wasm_bindgen::from_value(wasm.scene().unwrap()).unwrap();
        assert_eq!(scene.view_root_id, "root");
        assert_eq!(scene.nodes.len(), 5);
        assert!(!scene.saved_visible);
    }

    #[wasm_bindgen_test]
    fn test_rejected_drill_throws() {
        let mut wasm = MindmapWasm::new();
        assert!(wasm.try_drill_down("b1").is_err());
        assert!(set_log_level("loud").is_err());
        assert!(set_log_level("debug").is_ok());
    }
}
