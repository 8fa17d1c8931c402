//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index over the nodes placed
//! by a layout pass, so pointer positions can be mapped back to node ids.

mod rtree;

pub use rtree::LayoutIndex;
