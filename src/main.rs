//! Supertanks entry point
//!
//! Headless native run: builds a battle from settings, then drives the
//! fixed-interval loop in idle mode so craters keep landing on the terrain.
//!
//! Usage: `supertanks [settings.json] [ticks]`

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use supertanks::Settings;
use supertanks::renderer::{VertexSurface, colors};
use supertanks::sim::{Battle, TankOption, TickInput, tick};

/// Ticks to run when no count is given
const DEFAULT_TICKS: u64 = 200;
/// Turn length in idle mode
const TICKS_PER_TURN: u64 = 50;
/// How often to log terrain statistics
const REPORT_EVERY: u64 = 25;

fn main() {
    env_logger::init();
    log::info!("Supertanks (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut battle = Battle::new(&settings);
    battle.add_tanks(&[
        TankOption::new("Hubert", colors::TANK_RED),
        TankOption::new("Martin", colors::TANK_BLUE),
        TankOption::new("Clarisse", colors::TANK_LIME),
    ]);

    let mut surface = VertexSurface::new(settings.palette);
    let interval = Duration::from_millis(settings.world.tick_interval_ms);

    for t in 0..ticks {
        let frame_start = Instant::now();

        let input = TickInput {
            idle_mode: true,
            next_turn: t > 0 && t % TICKS_PER_TURN == 0,
            ..Default::default()
        };
        tick(&mut battle, &input);

        let draw_start = Instant::now();
        surface.draw_battle(&battle);
        let draw_time = draw_start.elapsed();

        if t % REPORT_EVERY == 0 {
            log::info!(
                "tick {}: {} nodes, {} solid units, {} vertices, draw {:?}",
                t,
                battle.terrain.count_nodes(),
                battle.terrain.solid_area(),
                surface.vertices().len(),
                draw_time
            );
        }

        if let Some(rest) = interval.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    println!(
        "Finished {} ticks: {} nodes, depth {}, {} solid units left",
        battle.time_ticks,
        battle.terrain.count_nodes(),
        battle.terrain.root().depth(),
        battle.terrain.solid_area()
    );
}
