//! Destructible terrain
//!
//! `Terrain` owns a single quadtree root and forwards queries and craters to
//! it. Rendering goes through the `Surface` trait, which only ever sees solid
//! leaves.

pub mod node;

pub use node::{Quadrant, TerrainNode};

use glam::Vec2;

use crate::consts::{DEFAULT_TERRAIN_SIZE, MIN_NODE_SIZE};
use crate::geometry::{Circle, Rect};
use crate::settings::TerrainSettings;

/// Drawing target for terrain leaves
pub trait Surface {
    /// Draw one solid leaf.
    ///
    /// A crater never leaves a solid leaf flagged itself: touched leaves are
    /// either cleared or split. `damaged` is therefore set when the leaf lies
    /// under a split node a crater touched, i.e. on a crater rim.
    fn draw_leaf(&mut self, rect: Rect, damaged: bool);
}

/// Outcome of a single crater
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraterReport {
    pub nodes_before: usize,
    pub nodes_after: usize,
    pub area_removed: u64,
}

impl CraterReport {
    /// True if the crater removed any ground
    pub fn hit(&self) -> bool {
        self.area_removed > 0
    }
}

/// Destructible terrain backed by a quadtree
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    root: TerrainNode,
}

impl Default for Terrain {
    fn default() -> Self {
        Self::with_default_size(Vec2::ZERO)
    }
}

impl Terrain {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self::with_min_node_size(position, size, MIN_NODE_SIZE)
    }

    /// Terrain of `DEFAULT_TERRAIN_SIZE` anchored at `position`
    pub fn with_default_size(position: Vec2) -> Self {
        Self::new(position, DEFAULT_TERRAIN_SIZE as f32)
    }

    pub fn with_min_node_size(position: Vec2, size: f32, min_node_size: u32) -> Self {
        Self {
            root: TerrainNode::new(position, size.round(), min_node_size),
        }
    }

    pub fn from_settings(settings: &TerrainSettings) -> Self {
        Self::with_min_node_size(
            settings.origin,
            settings.size as f32,
            settings.min_node_size,
        )
    }

    pub fn root(&self) -> &TerrainNode {
        &self.root
    }

    pub fn rect(&self) -> Rect {
        self.root.rect()
    }

    /// Draw every solid leaf; cleared leaves and internal nodes are skipped
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        draw_node(&self.root, false, surface);
    }

    /// Whether `p` lies within the terrain's bounds (edges included)
    pub fn intersects(&self, p: Vec2) -> bool {
        self.root.intersects(p)
    }

    pub fn node_at(&self, p: Vec2) -> Option<&TerrainNode> {
        self.root.node_at(p)
    }

    /// Whether there is ground at `p`
    pub fn is_solid_at(&self, p: Vec2) -> bool {
        self.node_at(p).is_some_and(TerrainNode::is_solid)
    }

    pub fn count_nodes(&self) -> usize {
        self.root.count_nodes()
    }

    pub fn solid_area(&self) -> u64 {
        self.root.solid_area()
    }

    /// Carve a crater and report how the tree changed
    pub fn remove_circle(&mut self, c: &Circle) -> CraterReport {
        let nodes_before = self.root.count_nodes();
        let area_before = self.root.solid_area();

        self.root.remove_circle(c);

        let report = CraterReport {
            nodes_before,
            nodes_after: self.root.count_nodes(),
            area_removed: area_before - self.root.solid_area(),
        };
        log::debug!(
            "crater at ({:.1}, {:.1}) r={:.1}: nodes {} -> {}, removed {} units",
            c.center.x,
            c.center.y,
            c.radius,
            report.nodes_before,
            report.nodes_after,
            report.area_removed
        );
        report
    }
}

/// Depth-first in quadrant order, carrying damage down from split ancestors
fn draw_node<S: Surface>(node: &TerrainNode, damaged: bool, surface: &mut S) {
    let damaged = damaged || node.is_damaged();
    if node.is_leaf() {
        if node.is_solid() {
            surface.draw_leaf(node.rect(), damaged);
        }
        return;
    }
    for child in node.children() {
        draw_node(child, damaged, surface);
    }
}
