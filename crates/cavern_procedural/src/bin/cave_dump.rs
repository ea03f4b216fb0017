//! Headless cave dump.
//!
//! Builds a cave from an optional TOML config plus command-line overrides,
//! optionally scrolls it forward one row at a time, and prints it as ASCII.
//!
//! Run with: `RUST_LOG=debug cargo run --bin cave_dump -- --seed 7 --hex --scroll 3`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cavern_procedural::{CaveConfig, CaveResult, CaveSession, Topology};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print a cellular-automaton cave as ASCII", long_about = None)]
struct Args {
    /// TOML config file; defaults apply when omitted.
    config: Option<PathBuf>,

    /// Seed-axis index of the top noise row.
    #[arg(long)]
    seed: Option<u64>,

    /// Wall density percentage (0-100).
    #[arg(long)]
    density: Option<u8>,

    /// Smoothing passes.
    #[arg(long)]
    iterations: Option<u32>,

    /// Use the hexagonal neighborhood.
    #[arg(long)]
    hex: bool,

    /// Rows to scroll forward after building, one seed step at a time.
    #[arg(long, default_value_t = 0)]
    scroll: u64,
}

fn run(args: &Args) -> CaveResult<String> {
    let mut config = match &args.config {
        Some(path) => CaveConfig::load(path)?,
        None => CaveConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(density) = args.density {
        config.density_percent = density;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if args.hex {
        config.topology = Topology::Hex;
    }

    let mut session = CaveSession::new(config)?;
    for _ in 0..args.scroll {
        let next = session.config().seed.wrapping_add(1);
        let update = session.set_seed(next)?;
        tracing::debug!("seed {}: {:?}", next, update);
    }

    let cave = session.automaton();
    tracing::info!(
        width = cave.width(),
        height = cave.height(),
        seed = cave.top_seed(),
        iterations = cave.iterations(),
        "cave ready"
    );
    Ok(session.grid().to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("cave_dump: {e}");
            ExitCode::FAILURE
        }
    }
}
