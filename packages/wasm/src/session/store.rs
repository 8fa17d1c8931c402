//! SessionStore - the mutable state of one editing session.
//!
//! The store owns the full document and the view state that refers into it
//! by id (selection, hover, inline editing, expanded set, drill path). All
//! document edits are copy-on-write, so a [`SessionSnapshot`] taken before an
//! action keeps seeing the old tree.
//!
//! Actions come in two flavours:
//! - Lenient (`drill_down`, `add_child`, ...): invalid requests are logged
//!   and leave the session unchanged.
//! - Strict (`try_drill_down`, `try_add_child`, ...): the same behaviour but
//!   the rejection is returned as a [`MindmapError`].
//!
//! Ids held in the view state are never validated or cleaned up; every read
//! re-resolves them against the current tree and tolerates absence.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};

use super::clock::{Clock, SavedIndicator, SystemClock};
use super::config::SessionConfig;
use super::highlight::{ConnectedIds, connected_ids};
use crate::error::MindmapError;
use crate::layout::RadialLayout;
use crate::tree::ops::{build_path, collect_all_ids, find_by_id, insert_child, update_by_id};
use crate::tree::{Node, NodePatch, export_json, import_json, seed_document};

/// View state of a session. References nodes by id only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected: Option<String>,
    pub hovered: Option<String>,
    pub editing: Option<String>,
    pub expanded: HashSet<String>,
    pub drill_path: Vec<String>,
}

impl ViewState {
    /// Defaults for a freshly loaded document: only the root expanded.
    pub fn for_root(root_id: &str) -> Self {
        Self {
            selected: None,
            hovered: None,
            editing: None,
            expanded: HashSet::from([root_id.to_string()]),
            drill_path: Vec::new(),
        }
    }
}

/// Consistent point-in-time copy of the session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub tree: Arc<Node>,
    pub view: ViewState,
}

/// The session state store.
pub struct SessionStore {
    tree: Arc<Node>,
    view: ViewState,
    config: SessionConfig,
    layout: RadialLayout,
    clock: Box<dyn Clock>,
    saved: SavedIndicator,
    /// Last sequence number used for generated ids.
    next_seq: u64,
}

impl SessionStore {
    /// Start a session on the seed document with default configuration.
    pub fn new() -> Self {
        Self::with_document(seed_document(), SessionConfig::default(), Box::new(SystemClock))
    }

    /// Start a session on `tree`.
    pub fn with_document(tree: Arc<Node>, config: SessionConfig, clock: Box<dyn Clock>) -> Self {
        let view = ViewState::for_root(&tree.id);
        let saved = SavedIndicator::new(config.saved_feedback_ms);
        Self {
            tree,
            view,
            config,
            layout: RadialLayout::with_defaults(),
            clock,
            saved,
            next_seq: 0,
        }
    }

    /// Replace the layout engine used by [`SessionStore::scene`].
    pub fn with_layout(mut self, layout: RadialLayout) -> Self {
        self.layout = layout;
        self
    }

    // =========================================================================
    // Read API
    // =========================================================================

    /// The full document.
    pub fn tree(&self) -> &Arc<Node> {
        &self.tree
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn layout(&self) -> &RadialLayout {
        &self.layout
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tree: Arc::clone(&self.tree),
            view: self.view.clone(),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.view.selected.as_deref()
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.view.hovered.as_deref()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.view.editing.as_deref()
    }

    pub fn expanded_ids(&self) -> &HashSet<String> {
        &self.view.expanded
    }

    pub fn drill_path(&self) -> &[String] {
        &self.view.drill_path
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.view.expanded.contains(id)
    }

    pub fn can_drill_up(&self) -> bool {
        !self.view.drill_path.is_empty()
    }

    /// Look up a node anywhere in the full document.
    pub fn find_node(&self, id: &str) -> Option<&Arc<Node>> {
        find_by_id(&self.tree, id)
    }

    /// Root of the drilled-into subtree, or the document root.
    ///
    /// Falls back to the document root if the top of the drill path no
    /// longer resolves.
    pub fn current_view_root(&self) -> &Arc<Node> {
        self.view
            .drill_path
            .last()
            .and_then(|id| find_by_id(&self.tree, id))
            .unwrap_or(&self.tree)
    }

    /// Titles from the document root to `id`, ignoring any drill-down.
    pub fn breadcrumb(&self, id: &str) -> Vec<String> {
        build_path(&self.tree, id).unwrap_or_else(|| vec![self.config.fallback_breadcrumb.clone()])
    }

    /// Parent and children of `id` in the full document.
    pub fn connected_ids(&self, id: &str) -> ConnectedIds {
        connected_ids(&self.tree, id)
    }

    /// Whether the "saved" indicator is currently showing.
    pub fn is_saved_visible(&self) -> bool {
        self.saved.is_visible(self.clock.now_ms())
    }

    // =========================================================================
    // Selection and Hover
    // =========================================================================

    pub fn select(&mut self, id: Option<&str>) {
        self.view.selected = id.map(str::to_string);
    }

    pub fn hover(&mut self, id: Option<&str>) {
        self.view.hovered = id.map(str::to_string);
    }

    /// Put one node (or none) into inline text editing.
    pub fn set_editing(&mut self, id: Option<&str>) {
        self.view.editing = id.map(str::to_string);
    }

    /// Click on a rendered node: a second click on the selected node toggles
    /// its expansion when it has children, any other click selects. Clicks
    /// on the node under inline edit are ignored.
    pub fn click_node(&mut self, id: &str) {
        if self.editing_id() == Some(id) {
            return;
        }
        let has_children = self.find_node(id).is_some_and(|node| node.has_children());
        if self.selected_id() == Some(id) && has_children {
            self.toggle_expansion(id);
        } else {
            self.select(Some(id));
        }
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    pub fn toggle_expansion(&mut self, id: &str) {
        if !self.view.expanded.remove(id) {
            self.view.expanded.insert(id.to_string());
        }
    }

    /// Expand every node under the current view root.
    pub fn expand_all(&mut self) {
        let ids = collect_all_ids(self.current_view_root());
        self.view.expanded = ids.into_iter().collect();
    }

    /// Collapse everything down to the current view root.
    pub fn collapse_all(&mut self) {
        let root_id = self.current_view_root().id.clone();
        self.view.expanded = HashSet::from([root_id]);
    }

    // =========================================================================
    // Drill-down
    // =========================================================================

    pub fn drill_down(&mut self, id: &str) {
        if let Err(err) = self.try_drill_down(id) {
            debug!("drill down ignored: {err}");
        }
    }

    /// Narrow the view to the subtree under `id`.
    ///
    /// # Errors
    /// - `NodeNotFound` when `id` is not in the document.
    /// - `LeafNode` when the node has no children.
    pub fn try_drill_down(&mut self, id: &str) -> Result<(), MindmapError> {
        let node = self
            .find_node(id)
            .ok_or_else(|| MindmapError::NodeNotFound(id.to_string()))?;
        if !node.has_children() {
            return Err(MindmapError::LeafNode(id.to_string()));
        }

        self.view.drill_path.push(id.to_string());
        self.view.expanded = HashSet::from([id.to_string()]);
        self.view.selected = Some(id.to_string());
        Ok(())
    }

    /// Drill into the selected node, if any.
    pub fn drill_into_selection(&mut self) {
        match self.view.selected.clone() {
            Some(id) => self.drill_down(&id),
            None => debug!("drill down ignored: nothing selected"),
        }
    }

    pub fn drill_up(&mut self) {
        if let Err(err) = self.try_drill_up() {
            debug!("drill up ignored: {err}");
        }
    }

    /// Return to the previous view root.
    ///
    /// # Errors
    /// - `AtRoot` when the drill path is already empty.
    pub fn try_drill_up(&mut self) -> Result<(), MindmapError> {
        if self.view.drill_path.pop().is_none() {
            return Err(MindmapError::AtRoot);
        }

        let root_id = self
            .view
            .drill_path
            .last()
            .cloned()
            .unwrap_or_else(|| self.tree.id.clone());
        self.view.expanded = HashSet::from([root_id.clone()]);
        self.view.selected = Some(root_id);
        Ok(())
    }

    // =========================================================================
    // Document Edits
    // =========================================================================

    pub fn add_child(&mut self, parent_id: &str) -> Option<String> {
        self.try_add_child(parent_id)
            .inspect_err(|err| debug!("add child ignored: {err}"))
            .ok()
    }

    /// Append a new default node under `parent_id`, expand the parent and
    /// select the new node. Returns the new node's id.
    ///
    /// # Errors
    /// - `ParentNotFound` when `parent_id` is not in the document.
    pub fn try_add_child(&mut self, parent_id: &str) -> Result<String, MindmapError> {
        if self.find_node(parent_id).is_none() {
            return Err(MindmapError::ParentNotFound(parent_id.to_string()));
        }

        let id = self.next_node_id();
        let child = Node::leaf(
            id.clone(),
            self.config.new_node_title.clone(),
            self.config.new_node_summary.clone(),
        );
        self.tree = insert_child(&self.tree, parent_id, child);
        self.view.expanded.insert(parent_id.to_string());
        self.view.selected = Some(id.clone());
        Ok(id)
    }

    /// Add a child under the selected node, or under the document root when
    /// nothing is selected.
    pub fn add_child_to_selection(&mut self) -> Option<String> {
        let parent_id = self
            .view
            .selected
            .clone()
            .unwrap_or_else(|| self.tree.id.clone());
        self.add_child(&parent_id)
    }

    pub fn update_node(&mut self, id: &str, patch: &NodePatch) {
        if let Err(err) = self.try_update_node(id, patch) {
            debug!("update ignored: {err}");
        }
    }

    /// Merge `patch` into the node `id` and show the "saved" indicator.
    ///
    /// # Errors
    /// - `NodeNotFound` when `id` is not in the document.
    pub fn try_update_node(&mut self, id: &str, patch: &NodePatch) -> Result<(), MindmapError> {
        if self.find_node(id).is_none() {
            return Err(MindmapError::NodeNotFound(id.to_string()));
        }

        self.tree = update_by_id(&self.tree, id, patch);
        self.saved.trigger(self.clock.now_ms());
        Ok(())
    }

    pub fn commit_title_edit(&mut self, id: &str, text: &str) {
        if let Err(err) = self.try_commit_title_edit(id, text) {
            debug!("title edit ignored: {err}");
        }
    }

    /// Finish inline editing of `id`. Non-blank text becomes the new title.
    /// Editing ends whether or not the title changed.
    ///
    /// # Errors
    /// - `EmptyTitle` when `text` is blank.
    /// - `NodeNotFound` when `id` is not in the document.
    pub fn try_commit_title_edit(&mut self, id: &str, text: &str) -> Result<(), MindmapError> {
        if self.editing_id() == Some(id) {
            self.view.editing = None;
        }

        let title = text.trim();
        if title.is_empty() {
            return Err(MindmapError::EmptyTitle(id.to_string()));
        }
        self.try_update_node(id, &NodePatch::title(title))
    }

    // =========================================================================
    // Import / Export
    // =========================================================================

    /// Serialize the full document.
    pub fn export_document(&self) -> Result<String, MindmapError> {
        export_json(&self.tree)
    }

    /// Replace the document and reset the view state.
    pub fn load_document(&mut self, tree: Arc<Node>) {
        info!("loading document `{}`", tree.id);
        self.view = ViewState::for_root(&tree.id);
        self.tree = tree;
        self.saved.clear();
    }

    /// Parse and load a JSON document. On error the session is unchanged.
    pub fn load_json(&mut self, text: &str) -> Result<(), MindmapError> {
        let tree = import_json(text)?;
        self.load_document(tree);
        Ok(())
    }

    /// Fresh id that does not occur in the current document.
    fn next_node_id(&mut self) -> String {
        loop {
            self.next_seq += 1;
            let id = format!("{}-{}", self.config.new_node_id_prefix, self.next_seq);
            if find_by_id(&self.tree, &id).is_none() {
                return id;
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
