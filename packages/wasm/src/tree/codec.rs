//! JSON export and import of whole documents.
//!
//! The wire shape mirrors [`Node`] exactly: `id`, `title`, `summary`,
//! optional `description` and `notes`, optional `children`. Absent fields
//! mean "no value"; nothing is written as `null`.

use std::sync::Arc;

use log::info;
use serde::Deserialize;

use super::node::Node;
use super::ops::node_count;
use crate::error::MindmapError;

/// Suggested file name for a downloaded export.
pub const EXPORT_FILE_NAME: &str = "mindmap-data.json";

/// Serialize a document as pretty-printed JSON.
pub fn export_json(root: &Arc<Node>) -> Result<String, MindmapError> {
    let text = serde_json::to_string_pretty(root.as_ref())
        .map_err(|err| MindmapError::Serialization(err.to_string()))?;
    info!("exported document `{}` ({} nodes)", root.id, node_count(root));
    Ok(text)
}

/// Parse a document previously produced by [`export_json`] (or any text of
/// the same shape).
///
/// Nesting depth is not limited, so every exported document can be read
/// back. The parser grows its stack on demand for deep documents.
pub fn import_json(text: &str) -> Result<Arc<Node>, MindmapError> {
    let invalid = |err: serde_json::Error| MindmapError::InvalidDocument(err.to_string());

    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let root = Node::deserialize(serde_stacker::Deserializer::new(&mut json)).map_err(invalid)?;
    json.end().map_err(invalid)?;

    let root = Arc::new(root);
    info!("imported document `{}` ({} nodes)", root.id, node_count(&root));
    Ok(root)
}
