//! Session configuration.

/// Tunables for a session. Callers construct this directly; nothing is read
/// from the environment.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the "saved" indicator stays visible after an update.
    pub saved_feedback_ms: f64,
    /// Breadcrumb returned for ids that are not in the document.
    pub fallback_breadcrumb: String,
    /// Title given to nodes created by `add_child`.
    pub new_node_title: String,
    /// Summary given to nodes created by `add_child`.
    pub new_node_summary: String,
    /// Prefix for generated node ids (`{prefix}-{n}`).
    pub new_node_id_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            saved_feedback_ms: 1500.0,
            fallback_breadcrumb: "Root".to_string(),
            new_node_title: "New Node".to_string(),
            new_node_summary: "Click to edit this node.".to_string(),
            new_node_id_prefix: "node".to_string(),
        }
    }
}
