//! Game simulation glue
//!
//! Tanks, turn order and the per-tick update. The terrain itself lives in
//! `crate::terrain`; this module only drives it:
//! - Craters come in through `TickInput::impact`
//! - Tanks ask the terrain whether there is ground below them

pub mod state;
pub mod tank;
pub mod tick;

pub use state::{Battle, BattlePhase, TankOption, TurnError};
pub use tank::Tank;
pub use tick::{TickInput, tick};
