//! Battle state: terrain, tank roster and turn order

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tank::Tank;
use crate::consts::{TANK_MARGIN, TANK_SPAWN_Y};
use crate::settings::Settings;
use crate::terrain::Terrain;

/// Current phase of the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Tanks are taking turns
    Playing,
    /// No tank is left to take a turn
    GameOver,
}

/// Player entry used to spawn a tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankOption {
    pub name: String,
    pub color: [f32; 4],
}

impl TankOption {
    pub fn new(name: impl Into<String>, color: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Why the turn could not pass to another tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("no tanks in play")]
    NoTanks,
    #[error("all tanks are dead")]
    AllTanksDead,
}

/// Complete battle state
#[derive(Debug, Clone)]
pub struct Battle {
    pub terrain: Terrain,
    /// Tanks in turn order
    pub tanks: Vec<Tank>,
    pub turn_idx: usize,
    pub phase: BattlePhase,
    /// World box tanks move in (width, height)
    pub world: Vec2,
    pub crater_radius: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl Battle {
    pub fn new(settings: &Settings) -> Self {
        Self {
            terrain: Terrain::from_settings(&settings.terrain),
            tanks: Vec::new(),
            turn_idx: 0,
            phase: BattlePhase::Playing,
            world: Vec2::new(settings.world.width, settings.world.height),
            crater_radius: settings.terrain.crater_radius,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(settings.world.seed),
        }
    }

    /// Spawn one tank per option, evenly spaced between the side margins
    pub fn add_tanks(&mut self, options: &[TankOption]) {
        if options.is_empty() {
            return;
        }
        let gaps = (options.len() - 1).max(1) as f32;
        let spacing = (self.world.x - 2.0 * TANK_MARGIN) / gaps;

        for (i, option) in options.iter().enumerate() {
            let x = TANK_MARGIN + spacing * i as f32;
            let tank = Tank::new(option.name.clone(), option.color, Vec2::new(x, TANK_SPAWN_Y));
            log::info!("{} joins at x={:.0}", tank.name, x);
            self.tanks.push(tank);
        }
    }

    pub fn current_tank(&self) -> Option<&Tank> {
        self.tanks.get(self.turn_idx)
    }

    pub fn current_tank_mut(&mut self) -> Option<&mut Tank> {
        self.tanks.get_mut(self.turn_idx)
    }

    pub fn living_tanks(&self) -> usize {
        self.tanks.iter().filter(|t| t.is_alive()).count()
    }

    /// Pass the turn to the next living tank.
    ///
    /// Fails when the search wraps back to the current tank, i.e. no other
    /// tank is alive.
    pub fn next_turn(&mut self) -> Result<usize, TurnError> {
        if self.tanks.is_empty() {
            return Err(TurnError::NoTanks);
        }
        let start = self.turn_idx;
        let mut idx = start;
        loop {
            idx = (idx + 1) % self.tanks.len();
            if idx == start {
                return Err(TurnError::AllTanksDead);
            }
            if self.tanks[idx].is_alive() {
                break;
            }
        }
        self.turn_idx = idx;
        Ok(idx)
    }

    /// A uniformly random point on the terrain's square
    pub fn random_impact(&mut self) -> Vec2 {
        let rect = self.terrain.rect();
        let max = rect.max();
        Vec2::new(
            self.rng.random_range(rect.pos.x..=max.x),
            self.rng.random_range(rect.pos.y..=max.y),
        )
    }
}
