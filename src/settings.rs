//! Game settings
//!
//! Stored as JSON. Missing fields fall back to their defaults, and a missing
//! or unreadable file falls back to `Settings::default()`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::Palette;

/// World box and loop timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
    /// Fixed tick interval in milliseconds
    pub tick_interval_ms: u64,
    /// Seed for idle-mode craters
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,
            seed: 0,
        }
    }
}

/// Terrain construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Top-left corner of the terrain square
    pub origin: Vec2,
    /// Edge length, ideally `min_node_size * 2^k`
    pub size: u32,
    /// Resolution floor
    pub min_node_size: u32,
    pub crater_radius: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            origin: Vec2::new(128.0, 128.0),
            size: 512,
            min_node_size: MIN_NODE_SIZE,
            crater_radius: CRATER_RADIUS,
        }
    }
}

/// All game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub world: WorldSettings,
    pub terrain: TerrainSettings,
    pub palette: Palette,
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
