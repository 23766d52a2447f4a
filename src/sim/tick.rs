//! Fixed-interval simulation tick
//!
//! One tick applies the player's commands to the current tank, carves any
//! pending crater, then lets every tank fall under gravity.

use glam::Vec2;

use super::state::{Battle, BattlePhase};
use crate::geometry::Circle;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Power change for the current tank
    pub power_delta: i32,
    /// Cannon rotation for the current tank (whole degrees)
    pub angle_delta: i32,
    /// Hand the turn to the next living tank
    pub next_turn: bool,
    /// Impact point to carve a crater at (pointer or shell)
    pub impact: Option<Vec2>,
    /// Idle/demo mode - carve a crater at a random point every tick
    pub idle_mode: bool,
}

/// Advance the battle by one tick
pub fn tick(battle: &mut Battle, input: &TickInput) {
    if battle.phase == BattlePhase::GameOver {
        return;
    }

    if let Some(tank) = battle.current_tank_mut().filter(|t| t.is_alive()) {
        if input.power_delta != 0 {
            tank.adjust_power(input.power_delta);
        }
        if input.angle_delta != 0 {
            tank.increase_angle(input.angle_delta);
        }
    }

    if input.next_turn {
        match battle.next_turn() {
            Ok(idx) => log::info!("{}'s turn", battle.tanks[idx].name),
            Err(e) => {
                log::info!("Battle over: {e}");
                battle.phase = BattlePhase::GameOver;
                return;
            }
        }
    }

    let mut impacts: Vec<Vec2> = input.impact.into_iter().collect();
    if input.idle_mode {
        impacts.push(battle.random_impact());
    }
    for center in impacts {
        battle
            .terrain
            .remove_circle(&Circle::new(center, battle.crater_radius));
    }

    let world = battle.world;
    for tank in battle.tanks.iter_mut() {
        tank.update(world, &battle.terrain);
    }

    battle.time_ticks += 1;
}
