//! Vertex rendering for terrain and tanks
//!
//! Builds flat-colored triangle lists; uploading them is up to the caller.
//! Terrain color policy lives in `Palette`, keyed by the leaf's damaged flag.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::sim::{Battle, Tank};
use crate::terrain::Surface;

/// Terrain colors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub solid: [f32; 4],
    pub damaged: [f32; 4],
    pub border: [f32; 4],
    pub background: [f32; 4],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            solid: colors::TERRAIN,
            damaged: colors::TERRAIN_DAMAGED,
            border: colors::TERRAIN_BORDER,
            background: colors::BACKGROUND,
        }
    }
}

impl Palette {
    pub fn leaf_fill(&self, damaged: bool) -> [f32; 4] {
        if damaged { self.damaged } else { self.solid }
    }
}

/// Border width around each terrain leaf
pub const LEAF_BORDER_WIDTH: f32 = 1.0;

/// Segments used for tank domes
const TANK_SEGMENTS: u32 = 16;

/// Surface that accumulates one frame of vertices
#[derive(Debug, Clone, Default)]
pub struct VertexSurface {
    pub palette: Palette,
    vertices: Vec<Vertex>,
}

impl Surface for VertexSurface {
    fn draw_leaf(&mut self, rect: Rect, damaged: bool) {
        let fill = self.palette.leaf_fill(damaged);
        self.vertices.extend(shapes::rect(&rect, fill));
        self.vertices
            .extend(shapes::rect_outline(&rect, LEAF_BORDER_WIDTH, self.palette.border));
    }
}

impl VertexSurface {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            vertices: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex data ready for a GPU buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Dome plus cannon
    pub fn draw_tank(&mut self, tank: &Tank) {
        self.vertices
            .extend(shapes::half_disc(tank.pos, tank.size, tank.color, TANK_SEGMENTS));
        // Barrel starts half its width above the base
        let lift = glam::Vec2::new(0.0, tank.size / 6.0);
        self.vertices.extend(shapes::line(
            tank.pos - lift,
            tank.barrel_tip() - lift,
            tank.size / 3.0,
            tank.color,
        ));
    }

    /// Rebuild the frame: terrain first, tanks on top
    pub fn draw_battle(&mut self, battle: &Battle) {
        self.clear();
        battle.terrain.draw(self);
        for tank in battle.tanks.iter().filter(|t| t.is_alive()) {
            self.draw_tank(tank);
        }
    }
}
