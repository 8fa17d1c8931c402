//! Node type and partial updates.
//!
//! A mindmap document is a strict rooted tree of [`Node`]s. Each node has:
//! - A globally unique, stable string identifier
//! - A short title and an always-present summary
//! - Optional description and notes
//! - An ordered list of exclusively owned children
//!
//! Children are held behind `Arc` so that copy-on-write edits can share
//! every untouched subtree with the previous version of the document.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

/// One entry in the hierarchical document.
///
/// Field absence (not `null`) represents "no value" in the serialized form,
/// and an empty `children` list is omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Arc<Node>>,
}

impl Node {
    /// Create a leaf node with no description or notes.
    pub fn leaf(
        id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: summary.into(),
            description: None,
            notes: None,
            children: Vec::new(),
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style notes setter.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder-style children setter. Order is preserved.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children = children.into_iter().map(Arc::new).collect();
        self
    }

    /// Whether the node has at least one child in the data.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Ids of the direct children, in order.
    pub fn child_ids(&self) -> Vec<String> {
        self.children.iter().map(|child| child.id.clone()).collect()
    }
}

/// Shallow partial update applied by `update_by_id`.
///
/// `None` leaves a field untouched. For the optional text fields the inner
/// option distinguishes "set" from "clear": `Some(None)` removes the value.
/// The identifier is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "present_field")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_field")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub children: Option<Vec<Arc<Node>>>,
}

/// A field that is present in the input is `Some`, even when it is `null`.
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl NodePatch {
    /// Patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Patch built from the detail editor: every text field is written,
    /// and an empty description or notes string clears that field.
    pub fn from_form(
        title: impl Into<String>,
        summary: impl Into<String>,
        description: &str,
        notes: &str,
    ) -> Self {
        let optional = |text: &str| (!text.is_empty()).then(|| text.to_string());
        Self {
            title: Some(title.into()),
            summary: Some(summary.into()),
            description: Some(optional(description)),
            notes: Some(optional(notes)),
            children: None,
        }
    }

    /// True when applying the patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.children.is_none()
    }

    /// Produce a new node with the named fields overwritten.
    pub fn apply(&self, node: &Node) -> Node {
        let mut updated = node.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(summary) = &self.summary {
            updated.summary = summary.clone();
        }
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        if let Some(notes) = &self.notes {
            updated.notes = notes.clone();
        }
        if let Some(children) = &self.children {
            updated.children = children.clone();
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::leaf("a", "Alpha", "First")
            .with_notes("note")
            .with_children([Node::leaf("a1", "Alpha One", "Child")])
    }

    #[test]
    fn test_leaf_has_no_children() {
        let node = Node::leaf("x", "X", "summary");
        assert!(!node.has_children());
        assert!(node.child_ids().is_empty());
        assert_eq!(node.description, None);
    }

    #[test]
    fn test_patch_overwrites_only_named_fields() {
        let node = sample();
        let patched = NodePatch::title("Renamed").apply(&node);

        assert_eq!(patched.title, "Renamed");
        assert_eq!(patched.summary, "First");
        assert_eq!(patched.notes.as_deref(), Some("note"));
        assert_eq!(patched.child_ids(), vec!["a1".to_string()]);
        // Children are shared, not deep-copied
        assert!(Arc::ptr_eq(&patched.children[0], &node.children[0]));
    }

    #[test]
    fn test_patch_can_clear_optional_field() {
        let node = sample();
        let patch = NodePatch {
            notes: Some(None),
            ..Default::default()
        };
        assert_eq!(patch.apply(&node).notes, None);
    }

    #[test]
    fn test_from_form_clears_empty_strings() {
        let patch = NodePatch::from_form("T", "S", "", "kept");
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.notes, Some(Some("kept".to_string())));
        assert!(patch.children.is_none());
    }

    #[test]
    fn test_patch_deserialize_null_means_clear() {
        let patch: NodePatch = serde_json::from_str(r#"{"notes": null, "title": "T"}"#).unwrap();
        assert_eq!(patch.notes, Some(None));
        assert_eq!(patch.description, None);
        assert_eq!(patch.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_empty_patch() {
        assert!(NodePatch::default().is_empty());
        assert!(!NodePatch::title("x").is_empty());
    }
}
