//! Pure operations over the document tree.
//!
//! Every function here takes the tree by shared reference and never mutates
//! it. Edits return a new root that shares all untouched subtrees with the
//! input (copy-on-write along the root-to-target path only).
//!
//! Traversals use explicit stacks rather than recursion.

use std::sync::Arc;

use super::node::{Node, NodePatch};

/// Result of a parent lookup.
///
/// The root has no parent, which is distinct from the id not existing.
#[derive(Debug, Clone, Copy)]
pub enum ParentLookup<'a> {
    /// The id is the root of the searched tree.
    Root,
    /// The id exists and this is its immediate parent.
    Parent(&'a Arc<Node>),
    /// The id does not occur in the tree.
    NotFound,
}

impl<'a> ParentLookup<'a> {
    /// The parent node, if there is one.
    pub fn parent(self) -> Option<&'a Arc<Node>> {
        match self {
            Self::Parent(node) => Some(node),
            Self::Root | Self::NotFound => None,
        }
    }

    /// Whether the id was found at all.
    pub fn is_found(self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Depth-first, pre-order iterator over a tree.
pub struct Preorder<'a> {
    stack: Vec<&'a Arc<Node>>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is visited next
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Iterate the subtree rooted at `root` in pre-order, root first.
pub fn preorder(root: &Arc<Node>) -> Preorder<'_> {
    Preorder { stack: vec![root] }
}

/// Find the first node with `id` in pre-order.
pub fn find_by_id<'a>(root: &'a Arc<Node>, id: &str) -> Option<&'a Arc<Node>> {
    preorder(root).find(|node| node.id == id)
}

/// Find the immediate parent of `id`.
pub fn find_parent<'a>(root: &'a Arc<Node>, id: &str) -> ParentLookup<'a> {
    match locate(root, id) {
        None => ParentLookup::NotFound,
        Some(path) if path.is_empty() => ParentLookup::Root,
        Some(path) => {
            let mut parent = root;
            for &index in &path[..path.len() - 1] {
                parent = &parent.children[index];
            }
            ParentLookup::Parent(parent)
        }
    }
}

/// Return a new tree with `patch` merged into the node matching `id`.
///
/// Ancestors of the changed node are rebuilt; every other subtree is the
/// same `Arc` as in `root`. If `id` is absent the input root is returned.
pub fn update_by_id(root: &Arc<Node>, id: &str, patch: &NodePatch) -> Arc<Node> {
    match locate(root, id) {
        Some(path) => replace_at(root, &path, |node| patch.apply(node)),
        None => Arc::clone(root),
    }
}

/// Return a new tree with `child` appended to the children of `parent_id`.
///
/// Same sharing contract as [`update_by_id`]. If `parent_id` is absent the
/// input root is returned.
pub fn insert_child(root: &Arc<Node>, parent_id: &str, child: Node) -> Arc<Node> {
    match locate(root, parent_id) {
        Some(path) => replace_at(root, &path, |node| {
            let mut parent = node.clone();
            parent.children.push(Arc::new(child));
            parent
        }),
        None => Arc::clone(root),
    }
}

/// Every id in the subtree, pre-order, root first.
pub fn collect_all_ids(root: &Arc<Node>) -> Vec<String> {
    preorder(root).map(|node| node.id.clone()).collect()
}

/// Titles from `root` down to `id`, both inclusive.
pub fn build_path(root: &Arc<Node>, id: &str) -> Option<Vec<String>> {
    let path = locate(root, id)?;
    let mut titles = Vec::with_capacity(path.len() + 1);
    let mut node = root;
    titles.push(node.title.clone());
    for &index in &path {
        node = &node.children[index];
        titles.push(node.title.clone());
    }
    Some(titles)
}

/// Number of nodes in the subtree.
pub fn node_count(root: &Arc<Node>) -> usize {
    preorder(root).count()
}

/// Child-index path from `root` to the first pre-order match of `id`.
///
/// An empty path means `root` itself matches.
fn locate(root: &Node, id: &str) -> Option<Vec<usize>> {
    if root.id == id {
        return Some(Vec::new());
    }

    // Each frame is a node and the index of the next child to visit.
    // `path` always holds the child indices of the frames above the root.
    let mut stack: Vec<(&Node, usize)> = vec![(root, 0)];
    let mut path: Vec<usize> = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let (node, next) = (frame.0, frame.1);
        frame.1 += 1;

        match node.children.get(next) {
            Some(child) => {
                path.push(next);
                if child.id == id {
                    return Some(path);
                }
                stack.push((child.as_ref(), 0));
            }
            None => {
                stack.pop();
                path.pop();
            }
        }
    }

    None
}

/// Rebuild the nodes along `path`, replacing its endpoint with `edit(endpoint)`.
fn replace_at(root: &Arc<Node>, path: &[usize], edit: impl FnOnce(&Node) -> Node) -> Arc<Node> {
    let mut chain: Vec<&Arc<Node>> = Vec::with_capacity(path.len() + 1);
    let mut node = root;
    chain.push(node);
    for &index in path {
        node = &node.children[index];
        chain.push(node);
    }

    let mut rebuilt = Arc::new(edit(node));
    for (depth, &index) in path.iter().enumerate().rev() {
        // Shallow clone: the children vector holds `Arc`s, so siblings are shared
        let mut parent = Node::clone(chain[depth]);
        parent.children[index] = rebuilt;
        rebuilt = Arc::new(parent);
    }
    rebuilt
}
