//! Brickwall headless runner
//!
//! Plays a match without paddles or rendering and logs how the wall evolves.
//! Usage: `brickwall [config.json]`. Set `RUST_LOG=debug` for per-impact logs.

use brickwall::WallConfig;
use brickwall::consts::SIM_DT;
use brickwall::sim::{MatchState, WallEvent, tick};

/// Give up after five simulated minutes
const MAX_TICKS: u64 = 5 * 60 * 120;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match WallConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => WallConfig::default(),
    };
    log::info!("Brickwall (headless) starting with seed {}", config.seed);

    let mut state = MatchState::new(config, 960.0, 540.0);
    let mut repairs = 0usize;
    let mut anomalies = 0usize;

    while state.winner.is_none() && state.time_ticks < MAX_TICKS {
        tick(&mut state, SIM_DT);
        for event in &state.events {
            match event {
                WallEvent::BrickRepaired { .. } => repairs += 1,
                WallEvent::IntegrityAnomaly { .. } => anomalies += 1,
                _ => {}
            }
        }
        if state.time_ticks.is_multiple_of(10 * 120) {
            log::info!(
                "t={}s bricks={} balls={} span={:?}",
                state.time_ticks / 120,
                state.wall.registry().len(),
                state.balls.len(),
                state.wall.span()
            );
        }
    }

    match state.winner {
        Some(winner) => println!(
            "{:?} won after {} ticks (breach at {:?}); {} repair bricks, {} anomalies",
            winner.side, state.time_ticks, winner.coord, repairs, anomalies
        ),
        None => println!(
            "No winner after {} ticks; {} bricks standing, {} repair bricks, {} anomalies",
            state.time_ticks,
            state.wall.registry().len(),
            repairs,
            anomalies
        ),
    }
}
