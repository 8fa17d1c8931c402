//! Document tree: the node model and the pure operations over it.
//!
//! Nodes are immutable once built. Edits go through [`ops`] and produce a
//! new root sharing unchanged subtrees with the old one.

mod codec;
mod node;
pub mod ops;
mod seed;

pub use codec::{EXPORT_FILE_NAME, export_json, import_json};
pub use node::{Node, NodePatch};
pub use ops::ParentLookup;
pub use seed::{SEED_ROOT_ID, seed_document};
