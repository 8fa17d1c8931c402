//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries over laid-out nodes for:
//! - Nearest neighbor
//! - Nearest within a pick radius
//! - Rectangle intersection

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::layout::RadialLayoutResult;

/// A laid-out node in the index, referring back to its slot in `ids`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NodePoint {
    slot: usize,
    x: f64,
    y: f64,
}

impl RTreeObject for NodePoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for NodePoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over one layout pass.
///
/// The index is a snapshot: rebuild it whenever the layout is recomputed.
pub struct LayoutIndex {
    tree: RTree<NodePoint>,
    ids: Vec<String>,
}

impl LayoutIndex {
    /// Bulk-load an index from a layout result.
    pub fn from_layout(layout: &RadialLayoutResult) -> Self {
        let points: Vec<_> = layout
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| NodePoint {
                slot,
                x: node.x,
                y: node.y,
            })
            .collect();
        let ids = layout.nodes.iter().map(|node| node.id.clone()).collect();

        Self {
            tree: RTree::bulk_load(points),
            ids,
        }
    }

    fn id_of(&self, point: &NodePoint) -> &str {
        &self.ids[point.slot]
    }

    /// Find the nearest node to a point.
    pub fn nearest(&self, x: f64, y: f64) -> Option<&str> {
        self.tree
            .nearest_neighbor(&[x, y])
            .map(|point| self.id_of(point))
    }

    /// Find the nearest node within a maximum distance.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<&str> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| self.id_of(point))
    }

    /// Find all nodes within a rectangle.
    pub fn in_rect(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<&str> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        self.tree
            .locate_in_envelope(&envelope)
            .map(|point| self.id_of(point))
            .collect()
    }

    /// Get the number of nodes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
