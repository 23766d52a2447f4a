//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in a packed buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const TERRAIN: [f32; 4] = [0.0, 0.5, 0.0, 1.0]; // Green
    pub const TERRAIN_DAMAGED: [f32; 4] = [0.6, 0.6, 0.1, 1.0];
    pub const TERRAIN_BORDER: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // Yellow
    pub const TANK_RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TANK_BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const TANK_LIME: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
