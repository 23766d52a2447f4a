//! Tanks: gravity-driven bodies with an adjustable cannon

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::terrain::Terrain;
use crate::whole_degrees;

/// A player's tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub name: String,
    pub color: [f32; 4],
    /// Base center (bottom of the dome)
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: Vec2,
    /// Dome radius; the barrel is twice as long
    pub size: f32,
    /// Cannon angle (radians, 0 = pointing right, PI = pointing left)
    pub angle: f32,
    pub power: i32,
    pub alive: bool,
}

impl Tank {
    pub fn new(name: impl Into<String>, color: [f32; 4], pos: Vec2) -> Self {
        Self {
            name: name.into(),
            color,
            pos,
            vel: Vec2::ZERO,
            gravity: Vec2::new(0.0, TANK_GRAVITY),
            size: TANK_SIZE,
            angle: 0.0,
            power: TANK_START_POWER,
            alive: true,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.alive
    }

    /// Advance one tick inside a `world`-sized box, resting on solid terrain
    pub fn update(&mut self, world: Vec2, terrain: &Terrain) {
        self.pos += self.vel;

        // Check the spot the next step would reach, so the tank never
        // steps into ground
        let falling = self.vel.y + self.gravity.y;
        let next_y = self.pos.y + falling;
        if next_y > world.y {
            self.vel.y = 0.0;
            self.pos.y = world.y;
        } else if terrain.is_solid_at(Vec2::new(self.pos.x, next_y)) {
            // Landed
            self.vel.y = 0.0;
        } else {
            self.vel.y = falling;
        }

        let next_x = self.pos.x + self.vel.x;
        if next_x < 0.0 {
            self.vel.x = 0.0;
            self.pos.x = 0.0;
        } else if next_x > world.x {
            self.vel.x = 0.0;
            self.pos.x = world.x;
        } else {
            self.vel.x += self.gravity.x;
        }
    }

    /// Rotate the cannon by whole degrees, wrapping across 0 and 180
    pub fn increase_angle(&mut self, amount: i32) {
        let mut degrees = whole_degrees(self.angle) + amount;
        if degrees < 0 {
            degrees += 180;
        } else if degrees > 180 {
            degrees -= 180;
        }
        self.angle = (degrees as f32).to_radians();
    }

    pub fn decrease_angle(&mut self, amount: i32) {
        self.increase_angle(-amount);
    }

    pub fn adjust_power(&mut self, delta: i32) {
        self.power = (self.power + delta).clamp(0, TANK_MAX_POWER);
    }

    /// End of the cannon barrel
    pub fn barrel_tip(&self) -> Vec2 {
        // Screen space: up is negative y
        self.pos + Vec2::new(self.angle.cos(), -self.angle.sin()) * self.size * 2.0
    }
}
