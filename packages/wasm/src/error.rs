//! Error type for the strict variants of the session actions and the
//! document codec.
//!
//! Lenient actions never surface these; they log the rejection and leave the
//! session unchanged.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from mindmap operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MindmapError {
    /// Target node does not exist.
    NodeNotFound(String),
    /// Parent for an insert does not exist.
    ParentNotFound(String),
    /// Drill-down target has no children.
    LeafNode(String),
    /// Drill-up requested while already at the document root.
    AtRoot,
    /// Inline title edit was blank after trimming.
    EmptyTitle(String),
    /// Imported text is not a well-formed document.
    InvalidDocument(String),
    /// Document could not be serialized.
    Serialization(String),
    /// Unrecognized log level name.
    InvalidLogLevel(String),
}

impl Display for MindmapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node not found: {id}"),
            Self::ParentNotFound(id) => write!(f, "parent node not found: {id}"),
            Self::LeafNode(id) => write!(f, "cannot drill into leaf node: {id}"),
            Self::AtRoot => write!(f, "already at the document root"),
            Self::EmptyTitle(id) => write!(f, "title must not be blank: {id}"),
            Self::InvalidDocument(message) => write!(f, "invalid document: {message}"),
            Self::Serialization(message) => write!(f, "failed to serialize document: {message}"),
            Self::InvalidLogLevel(name) => write!(f, "unknown log level `{name}`"),
        }
    }
}

impl Error for MindmapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MindmapError::NodeNotFound("x".into()).to_string(),
            "node not found: x"
        );
        assert_eq!(MindmapError::AtRoot.to_string(), "already at the document root");
        assert_eq!(
            MindmapError::LeafNode("leaf".into()).to_string(),
            "cannot drill into leaf node: leaf"
        );
    }
}
