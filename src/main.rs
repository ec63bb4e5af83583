//! Oreflow - headless driver
//!
//! Generates or loads a game, optionally builds the demo production line, runs
//! a number of ticks and prints a summary. Save files are read and written
//! here; the library never touches the filesystem for game data.

use clap::Parser;
use oreflow::core::error::Result;
use oreflow::economy::{Command, Global, UpgradeKind};
use oreflow::persistence::{decode_global, decode_state, encode_global, encode_state};
use oreflow::simulation::layout::build_demo;
use oreflow::{EngineConfig, State};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "oreflow")]
#[command(about = "Run the production network simulation headless")]
struct Args {
    /// Map height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Map width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Ore seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to run
    #[arg(long, short = 't', default_value_t = 100)]
    ticks: u64,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load the game from this JSON file instead of generating one
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the game to this JSON file when done
    #[arg(long)]
    save: Option<PathBuf>,

    /// Global profile JSON file, read at start and written at exit
    #[arg(long)]
    global: Option<PathBuf>,

    /// Build the demo production line before running
    #[arg(long)]
    demo: bool,

    /// Buy these upgrades before running (miner, belt, cutter, map_size)
    #[arg(long, value_parser = parse_upgrade)]
    upgrade: Vec<UpgradeKind>,
}

fn parse_upgrade(s: &str) -> std::result::Result<UpgradeKind, String> {
    UpgradeKind::ALL
        .into_iter()
        .find(|kind| kind.to_string().replace(' ', "_") == s)
        .ok_or_else(|| format!("unknown upgrade '{}'", s))
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(height) = args.height {
        config.map.height = height;
    }
    if let Some(width) = args.width {
        config.map.width = width;
    }
    if let Some(seed) = args.seed {
        config.map.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn load_global(args: &Args, config: &EngineConfig) -> Result<Global> {
    match &args.global {
        Some(path) if path.exists() => Ok(decode_global(&std::fs::read_to_string(path)?, config)),
        _ => Ok(Global::new(&config.progression)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut global = load_global(&args, &config)?;

    let mut state = match &args.load {
        Some(path) => {
            tracing::info!("Loading game from {}", path.display());
            let index = global.register_save(path);
            global.select_save(index)?;
            decode_state(&std::fs::read_to_string(path)?, &config)?
        }
        None => global.new_game(&config)?,
    };

    if args.demo {
        match build_demo(&mut state)? {
            Some(origin) => tracing::info!("Demo line placed at {}", origin),
            None => tracing::warn!("Map has no room for the demo line"),
        }
    }

    for kind in &args.upgrade {
        let price = state.apply(&mut global, Command::ApplyUpgrade { kind: *kind })?;
        tracing::info!("Bought {} upgrade for {}", kind, price);
    }

    let mut earned = 0;
    for _ in 0..args.ticks {
        earned += state.tick(&mut global, |index, task| {
            println!("Task {} complete: {} item kinds delivered", index, task.target.iter().count());
        });
    }

    let map = state.map();
    println!("=== OREFLOW ===");
    println!("Map: {}x{}", map.height(), map.width());
    println!("Ticks run: {}", state.tick_count());
    for (kind, count) in map.census() {
        if count > 0 {
            println!("  {:<12} {}", kind.to_string(), count);
        }
    }
    println!("Store:");
    for (item, count) in state.store().iter() {
        println!("  {:<12} {}", item.to_string(), count);
    }
    for (index, task) in state.tasks().iter().enumerate() {
        let status = if task.is_completed() { "done" } else { "open" };
        println!("Task {}: {}", index, status);
    }
    println!("Earned this run: {}", earned);
    println!("Profile value: {}", global.value);

    if let Some(path) = &args.save {
        std::fs::write(path, encode_state(&state)?)?;
        let index = global.register_save(path);
        global.select_save(index)?;
        tracing::info!("Saved game to {}", path.display());
    }
    if let Some(path) = &args.global {
        std::fs::write(path, encode_global(&global)?)?;
    }

    Ok(())
}
