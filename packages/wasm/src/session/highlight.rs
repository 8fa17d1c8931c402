//! Adjacency queries used to emphasize the active node.
//!
//! The active node is the hovered node, or the selected node when nothing is
//! hovered. While a node is active, everything that is not the node itself,
//! its parent or one of its children is dimmed.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::layout::Connection;
use crate::tree::ops::{find_by_id, find_parent};
use crate::tree::Node;

/// Immediate neighbours of a node in the full document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedIds {
    pub parent_id: Option<String>,
    pub child_ids: Vec<String>,
}

/// Parent and direct children of `id`. Both are empty for unknown ids.
pub fn connected_ids(tree: &Arc<Node>, id: &str) -> ConnectedIds {
    ConnectedIds {
        parent_id: find_parent(tree, id).parent().map(|parent| parent.id.clone()),
        child_ids: find_by_id(tree, id)
            .map(|node| node.child_ids())
            .unwrap_or_default(),
    }
}

/// Emphasis state for one render pass.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    selected: Option<String>,
    hovered: Option<String>,
    active: Option<String>,
    related: HashSet<String>,
}

impl Highlight {
    pub fn new(tree: &Arc<Node>, selected: Option<&str>, hovered: Option<&str>) -> Self {
        let active = hovered.or(selected);
        let mut related = HashSet::new();
        if let Some(active) = active {
            let neighbours = connected_ids(tree, active);
            related.insert(active.to_string());
            related.extend(neighbours.parent_id);
            related.extend(neighbours.child_ids);
        }

        Self {
            selected: selected.map(str::to_string),
            hovered: hovered.map(str::to_string),
            active: active.map(str::to_string),
            related,
        }
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Dimmed while another, unrelated node is active.
    pub fn is_dimmed(&self, id: &str) -> bool {
        self.active.is_some() && !self.related.contains(id)
    }

    /// Either endpoint is the selected or the hovered node.
    pub fn is_edge_highlighted(&self, connection: &Connection) -> bool {
        [self.selected.as_deref(), self.hovered.as_deref()]
            .into_iter()
            .flatten()
            .any(|id| connection.source == id || connection.target == id)
    }

    /// Either endpoint is the active node.
    pub fn is_edge_active(&self, connection: &Connection) -> bool {
        self.active
            .as_deref()
            .is_some_and(|id| connection.source == id || connection.target == id)
    }
}
