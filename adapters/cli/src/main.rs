#![deny(unsafe_code, dead_code, unused_results, non_snake_case)]

//! Headless runner that drives the simulation from the command line.
//!
//! Plays a session with a simple scripted build order, printing a summary
//! after every round. Useful for balancing passes and for exercising the
//! full engine without a renderer.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use polygon_defence_core::{
    catalog::{Difficulty, MapId, TowerKind},
    SoundCue, WorldPoint,
};
use polygon_defence_engine::Engine;
use polygon_defence_persistence::JsonSaveStore;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapArg {
    Meadow,
    Desert,
    Arctic,
    Volcano,
}

impl From<MapArg> for MapId {
    fn from(arg: MapArg) -> Self {
        match arg {
            MapArg::Meadow => Self::Meadow,
            MapArg::Desert => Self::Desert,
            MapArg::Arctic => Self::Arctic,
            MapArg::Volcano => Self::Volcano,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "polygon-defence", about = "Headless Polygon Defence runner")]
struct Args {
    /// Map to play.
    #[arg(long, value_enum, default_value_t = MapArg::Meadow)]
    map: MapArg,

    /// Difficulty to play at.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Medium)]
    difficulty: DifficultyArg,

    /// Stop after this many rounds even if the game is not over.
    #[arg(long, default_value_t = 10)]
    rounds: u32,

    /// Location of the save file.
    #[arg(long, default_value = "polygon-defence-save.json")]
    save_path: PathBuf,

    /// Resume the session in the save file instead of starting fresh.
    #[arg(long)]
    resume: bool,

    /// Simulation timestep in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let store = JsonSaveStore::new(&args.save_path);
    let mut engine = Engine::new(Box::new(store));

    if args.resume {
        engine
            .load_game()
            .context("failed to resume the saved session")?;
        println!(
            "resumed {:?} ({:?}) at round {}",
            engine.map().context("saved session names no map")?,
            engine.difficulty(),
            engine.current_round(),
        );
    } else {
        engine.start_new_game(args.map.into(), args.difficulty.into());
        println!("new game on {:?} ({:?})", MapId::from(args.map), Difficulty::from(args.difficulty));
    }

    let dt = Duration::from_millis(args.tick_ms.max(1));
    while !engine.is_won() && !engine.is_lost() && engine.current_round() < args.rounds {
        build_defences(&mut engine);
        engine.start_next_round();
        if engine.is_won() {
            break;
        }
        let round = engine.current_round();
        while engine.is_round_active() && !engine.is_lost() {
            engine
                .update(dt)
                .with_context(|| format!("autosave failed during round {round}"))?;
        }
        let pops = engine
            .drain_sound_cues()
            .iter()
            .filter(|cue| matches!(cue, SoundCue::EnemyPopped))
            .count();
        println!(
            "round {round}: money {}, lives {}, towers {}, pops {pops}",
            engine.money(),
            engine.lives(),
            engine.tower_snapshots().len(),
        );
    }

    if engine.is_won() {
        println!("victory with {} lives to spare", engine.lives());
    } else if engine.is_lost() {
        println!("defence broken at round {}", engine.current_round());
    } else {
        println!("stopped after round {}; session saved", engine.current_round());
    }
    Ok(())
}

/// Scripted build order: place a few towers on open ground near the top
/// of the field, then push upgrades into whatever paths remain open.
fn build_defences(engine: &mut Engine) {
    let mut placed = 0;
    'grid: for row in 0..11 {
        for column in 0..18 {
            if placed == 2 {
                break 'grid;
            }
            let spot = WorldPoint::new(60.0 + column as f32 * 60.0, 60.0 + row as f32 * 60.0);
            if engine.place_tower(TowerKind::Dart, spot) {
                placed += 1;
            }
        }
    }
    for tower in engine.tower_snapshots() {
        for path in 0..3 {
            if engine.upgrade_tower(tower.id, path) {
                break;
            }
        }
    }
}
