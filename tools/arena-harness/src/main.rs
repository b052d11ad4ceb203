//! arena-harness: run a headless arena session and dump its snapshots.
//!
//! Usage:
//!   arena-harness --ticks 1200 --seed 7
//!   arena-harness --config arena.json --trace > session.jsonl

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec2;
use log::info;

use arena_core::config::ArenaConfig;
use arena_core::constants::DT;
use arena_core::state::ArenaSnapshot;
use arena_sim::{ArenaEngine, SimConfig, TickInput};

mod logging;

#[derive(Debug, Parser)]
#[command(name = "arena-harness", about = "Run a scripted headless arena session")]
struct Args {
    /// JSON config file. Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = DT)]
    dt: f64,

    /// Score gained per second of play.
    #[arg(long, default_value_t = 10.0)]
    score_rate: f64,

    /// Trigger a dash every N ticks (0 disables).
    #[arg(long, default_value_t = 90)]
    dash_every: u32,

    /// Print every snapshot as a JSON line instead of only the last.
    #[arg(long)]
    trace: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let arena = match &args.config {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            ArenaConfig::from_json_slice(&bytes)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => ArenaConfig::default(),
    };

    let mut engine = ArenaEngine::new(SimConfig {
        seed: args.seed,
        arena,
        ..Default::default()
    })
    .context("building engine")?;
    engine.initialize();

    let mut last = ArenaSnapshot::default();
    for tick in 0..args.ticks {
        last = engine.tick(scripted_input(&args, tick));
        if args.trace {
            println!("{}", serde_json::to_string(&last)?);
        }
    }
    if !args.trace {
        println!("{}", serde_json::to_string_pretty(&last)?);
    }

    info!(
        "ran {} ticks ({:.2}s), {} enemies spawned",
        last.time.tick, last.time.elapsed_secs, last.spawner.spawned_count
    );
    engine.shutdown();
    Ok(())
}

/// Circle the arena, look at the origin and dash on a fixed cadence.
fn scripted_input(args: &Args, tick: u32) -> TickInput {
    let t = tick as f64 * args.dt;
    TickInput {
        dt: args.dt,
        time_scale: 1.0,
        move_input: DVec2::new(-t.sin(), t.cos()),
        dash_triggered: args.dash_every > 0 && tick % args.dash_every == 0,
        look_target: Some(DVec2::ZERO),
        score: t * args.score_rate,
    }
}
