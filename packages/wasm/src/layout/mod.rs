//! Layout algorithms for mindmap visualization.
//!
//! This module computes target positions for the visible part of a document.
//! The presentation layer reads the positions and connections and draws them;
//! no styling information is produced here.

pub mod radial;

pub use radial::{
    Connection, PositionedNode, RadialLayout, RadialLayoutConfig, RadialLayoutResult, Sector,
    partition_sector,
};
