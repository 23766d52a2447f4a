//! Supertanks - A 2D side-view artillery game
//!
//! Core modules:
//! - `geometry`: Circles and rectangles over `glam::Vec2`
//! - `terrain`: Destructible quadtree terrain (craters, point queries)
//! - `renderer`: Vertex generation for terrain leaves
//! - `sim`: Tanks, turn order and the fixed-interval tick
//! - `settings`: JSON-backed configuration

pub mod geometry;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod terrain;

pub use geometry::{Circle, Rect};
pub use settings::{Settings, TerrainSettings, WorldSettings};
pub use terrain::{CraterReport, Surface, Terrain, TerrainNode};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Resolution floor: nodes this small never subdivide
    pub const MIN_NODE_SIZE: u32 = 4;
    /// Default terrain edge length (3 * 2^8); with the default floor its
    /// smallest leaves are 6 units
    pub const DEFAULT_TERRAIN_SIZE: u32 = 768;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Fixed tick interval (ms), one update + draw per tick
    pub const TICK_INTERVAL_MS: u64 = 20;

    /// Crater radius for a standard shell impact
    pub const CRATER_RADIUS: f32 = 40.0;

    /// Tank defaults
    pub const TANK_SIZE: f32 = 20.0;
    pub const TANK_GRAVITY: f32 = 1.0;
    pub const TANK_START_POWER: i32 = 50;
    pub const TANK_MAX_POWER: i32 = 100;
    /// Horizontal margin kept free on each side when placing tanks
    pub const TANK_MARGIN: f32 = 50.0;
    /// Spawn height for freshly placed tanks
    pub const TANK_SPAWN_Y: f32 = 10.0;
}

/// Direction vector from `p1` to `p2` (p2 - p1)
#[inline]
pub fn direction(p1: Vec2, p2: Vec2) -> Vec2 {
    p2 - p1
}

/// Radians to the nearest whole degree
#[inline]
pub fn whole_degrees(radians: f32) -> i32 {
    radians.to_degrees().round() as i32
}
