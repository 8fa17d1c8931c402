//! Radial mindmap layout.
//!
//! Places the view root at the center and fans each expanded node's children
//! out on an arc around it. Each node owns an angular sector; its children
//! split that sector into equal slices and sit at the slice midpoints.
//!
//! # Algorithm Overview
//!
//! 1. The root is placed at the center with the full circle `[0, 2π)`.
//! 2. An expanded node with `k > 0` children splits its sector into `k`
//!    slices of width `w`. Child `i` sits at angle `start + w * (i + 0.5)`,
//!    at distance `base_radius + level * level_step` from its parent.
//! 3. Each child inherits a narrowed sector of width `w * sector_fill`
//!    centered on its own angle, which keeps deep subtrees away from their
//!    siblings.
//!
//! Nodes that are collapsed, or expanded without children, are visual leaves.
//! Angles are never normalized back into `[0, 2π)`.

use std::collections::HashSet;
use std::f64::consts::TAU;

use log::trace;
use serde::Serialize;

use crate::tree::Node;

/// Configuration for the radial layout.
#[derive(Debug, Clone)]
pub struct RadialLayoutConfig {
    /// Distance from a level-0 parent to its children.
    pub base_radius: f64,
    /// Extra distance added per level of the parent.
    pub level_step: f64,
    /// Fraction of a slice handed down to the child's own subtree.
    pub sector_fill: f64,
}

impl Default for RadialLayoutConfig {
    fn default() -> Self {
        Self {
            base_radius: 200.0,
            level_step: 80.0,
            sector_fill: 0.8,
        }
    }
}

/// A node placed by the layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Depth below the view root (root = 0).
    pub level: u32,
}

/// A parent→child link that is visible in this layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
}

/// One child's share of its parent's sector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    /// Angle the child is placed at (slice midpoint).
    pub angle: f64,
    /// Start of the narrowed sector passed down to the child.
    pub start: f64,
    /// End of the narrowed sector passed down to the child.
    pub end: f64,
}

/// Result of a layout pass, in pre-order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RadialLayoutResult {
    pub nodes: Vec<PositionedNode>,
    pub connections: Vec<Connection>,
}

impl RadialLayoutResult {
    /// Position of a laid-out node.
    pub fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .map(|node| (node.x, node.y))
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.nodes.first()?;
        let init = (first.x, first.y, first.x, first.y);
        Some(self.nodes.iter().fold(init, |(min_x, min_y, max_x, max_y), node| {
            (
                min_x.min(node.x),
                min_y.min(node.y),
                max_x.max(node.x),
                max_y.max(node.y),
            )
        }))
    }
}

/// Split `[start, end)` into `count` equal slices.
///
/// Returns one [`Sector`] per slice, in order. Empty when `count == 0`.
pub fn partition_sector(start: f64, end: f64, count: usize, sector_fill: f64) -> Vec<Sector> {
    if count == 0 {
        return Vec::new();
    }

    let slice = (end - start) / count as f64;
    let half_spread = slice * sector_fill / 2.0;

    (0..count)
        .map(|i| {
            let angle = start + slice * (i as f64 + 0.5);
            Sector {
                angle,
                start: angle - half_spread,
                end: angle + half_spread,
            }
        })
        .collect()
}

/// Pending node on the traversal stack.
struct Frame<'a> {
    node: &'a Node,
    parent: Option<&'a str>,
    x: f64,
    y: f64,
    level: u32,
    start: f64,
    end: f64,
}

/// The radial layout engine.
pub struct RadialLayout {
    config: RadialLayoutConfig,
}

impl RadialLayout {
    /// Create a new radial layout with the given configuration.
    pub fn new(config: RadialLayoutConfig) -> Self {
        Self { config }
    }

    /// Create a radial layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RadialLayoutConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &RadialLayoutConfig {
        &self.config
    }

    /// Lay out `root` centered on the origin.
    ///
    /// Only nodes whose id is in `expanded` have their children placed.
    pub fn compute(&self, root: &Node, expanded: &HashSet<String>) -> RadialLayoutResult {
        self.compute_at(root, expanded, 0.0, 0.0)
    }

    /// Lay out `root` centered on `(center_x, center_y)`.
    pub fn compute_at(
        &self,
        root: &Node,
        expanded: &HashSet<String>,
        center_x: f64,
        center_y: f64,
    ) -> RadialLayoutResult {
        let mut result = RadialLayoutResult::default();
        let mut stack = vec![Frame {
            node: root,
            parent: None,
            x: center_x,
            y: center_y,
            level: 0,
            start: 0.0,
            end: TAU,
        }];

        while let Some(frame) = stack.pop() {
            let node = frame.node;
            result.nodes.push(PositionedNode {
                id: node.id.clone(),
                x: frame.x,
                y: frame.y,
                level: frame.level,
            });
            if let Some(parent) = frame.parent {
                result.connections.push(Connection {
                    source: parent.to_string(),
                    target: node.id.clone(),
                });
            }

            if !node.has_children() || !expanded.contains(&node.id) {
                continue;
            }

            let radius = self.config.base_radius + frame.level as f64 * self.config.level_step;
            let sectors = partition_sector(
                frame.start,
                frame.end,
                node.children.len(),
                self.config.sector_fill,
            );

            // Push in reverse so children pop, and are emitted, in order
            for (child, sector) in node.children.iter().zip(sectors).rev() {
                stack.push(Frame {
                    node: child,
                    parent: Some(node.id.as_str()),
                    x: frame.x + sector.angle.cos() * radius,
                    y: frame.y + sector.angle.sin() * radius,
                    level: frame.level + 1,
                    start: sector.start,
                    end: sector.end,
                });
            }
        }

        trace!(
            "radial layout of `{}`: {} nodes, {} connections",
            root.id,
            result.nodes.len(),
            result.connections.len()
        );
        result
    }
}
