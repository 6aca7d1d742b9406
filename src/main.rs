//! # Voxel Sandbox Entry Point
//!
//! Runs a sandbox session headless with a scripted input source and logs a
//! summary of what happened.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release -- --script build --ticks 300
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use voxel_sandbox::{
    application_state::{BuildScript, HeadlessApplication, IdleScript, InputScript, WalkScript},
    config::{SandboxConfig, TerrainMethod},
};

/// Scripted input sources.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Script {
    /// Stand still
    Idle,
    /// Walk, turn and jump
    Walk,
    /// Place and remove blocks
    Build,
}

impl Script {
    fn into_input_script(self) -> Box<dyn InputScript> {
        match self {
            Script::Idle => Box::new(IdleScript),
            Script::Walk => Box::new(WalkScript),
            Script::Build => Box::new(BuildScript),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "voxel-sandbox")]
#[command(about = "Headless first-person voxel sandbox")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Terrain seed, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Terrain method (random, perlin, flat, empty), overriding the configuration
    #[arg(long)]
    terrain: Option<TerrainMethod>,

    /// Input script to run
    #[arg(short, long, value_enum, default_value_t = Script::Walk)]
    script: Script,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    voxel_sandbox::init_logger();

    let mut config = match &args.config {
        Some(path) => SandboxConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SandboxConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.terrain.seed = seed;
    }
    if let Some(method) = args.terrain {
        config.terrain.method = method;
    }
    config.validate().context("invalid configuration")?;

    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let mut app = HeadlessApplication::new(&config, args.script.into_input_script());
    let summary = app.run(args.ticks);

    log::info!(
        "Ran {} ticks in {:?}: {} placed, {} removed, {} unchanged, {} out of reach, {} missed, {} info pages",
        summary.ticks,
        summary.elapsed,
        summary.outcomes.placed,
        summary.outcomes.removed,
        summary.outcomes.unchanged,
        summary.outcomes.out_of_reach,
        summary.outcomes.missed,
        summary.outcomes.info_pages,
    );
    log::info!(
        "Player at ({:.2}, {:.2}, {:.2}); {} blocks, {} visuals",
        summary.final_position.x,
        summary.final_position.y,
        summary.final_position.z,
        summary.block_count,
        summary.live_visuals,
    );

    Ok(())
}
