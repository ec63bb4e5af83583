//! Layout demo
//!
//! Builds the demo production line on a generated map and prints the grid as
//! text every few ticks, so the flow of items can be watched.

use clap::Parser;
use oreflow::building::BuildingType;
use oreflow::economy::Global;
use oreflow::grid::Map;
use oreflow::simulation::layout::build_demo;
use oreflow::{EngineConfig, State};

#[derive(Parser, Debug)]
#[command(name = "layout_demo")]
#[command(about = "Watch a production line run on a text grid")]
struct Args {
    #[arg(long, default_value_t = 8)]
    height: usize,

    #[arg(long, default_value_t = 12)]
    width: usize,

    /// Ore seed
    #[arg(long, default_value_t = 7)]
    seed: u64,

    #[arg(long, default_value_t = 60)]
    ticks: u64,

    /// Print the grid every N ticks
    #[arg(long, default_value_t = 10)]
    every: u64,
}

fn glyph(map: &Map, row: usize, col: usize) -> char {
    let Ok(chunk) = map.get(oreflow::core::Position::new(row, col)) else {
        return '?';
    };
    match chunk.building_type() {
        Some(BuildingType::Miner) => 'M',
        Some(BuildingType::Belt) => match chunk.direction() {
            Some(oreflow::core::Direction::Up) => '^',
            Some(oreflow::core::Direction::Down) => 'v',
            Some(oreflow::core::Direction::Left) => '<',
            _ => '>',
        },
        Some(BuildingType::Cutter) => 'C',
        Some(BuildingType::TrashCan) => 'X',
        Some(BuildingType::TaskCenter) => 'T',
        Some(BuildingType::PlaceHolder) => '+',
        None => match chunk.ore() {
            Some(ore) if ore.name == "gold" => 'g',
            Some(_) => 'o',
            None => '.',
        },
    }
}

fn render(map: &Map) -> String {
    let mut out = String::new();
    for row in 0..map.height() {
        for col in 0..map.width() {
            out.push(glyph(map, row, col));
        }
        out.push('\n');
    }
    out
}

fn main() -> oreflow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = EngineConfig::default();
    config.map.height = args.height;
    config.map.width = args.width;
    config.map.seed = args.seed;

    let mut global = Global::new(&config.progression);
    let mut state = State::generate(&config)?;
    if build_demo(&mut state)?.is_none() {
        println!("No room for a production line with seed {}", args.seed);
        return Ok(());
    }

    let every = args.every.max(1);
    for tick in 0..=args.ticks {
        if tick % every == 0 {
            println!("--- tick {} | profile value {} ---", tick, global.value);
            print!("{}", render(state.map()));
            let stored: Vec<String> = state
                .store()
                .iter()
                .map(|(item, n)| format!("{} x{}", item, n))
                .collect();
            println!("store: [{}]", stored.join(", "));
        }
        if tick < args.ticks {
            state.tick(&mut global, |index, _| println!("task {} complete", index));
        }
    }
    Ok(())
}
