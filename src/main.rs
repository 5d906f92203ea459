mod console;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, info};

use gambit_core::Game;
use gambit_uci::{Advisor, EngineConfig, elo_for_level};

use console::Console;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chess rules engine console", long_about = None)]
struct Args {
    /// External UCI engine executable; without it hints come from the built-in search
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Extra argument passed to the engine (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Engine strength as an ELO value
    #[arg(long, conflicts_with = "level")]
    elo: Option<u32>,

    /// Engine strength as a level; ELO is 800 plus the level
    #[arg(long)]
    level: Option<u32>,

    /// Engine think time per move, in milliseconds
    #[arg(long, default_value_t = 10)]
    movetime_ms: u64,

    /// Depth of the built-in fallback search
    #[arg(long, default_value_t = 3)]
    depth: u8,

    /// Longest wait for any engine reply, in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Start from this FEN instead of the initial position
    #[arg(long)]
    fen: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig> {
        if self.depth == 0 {
            bail!("--depth must be at least 1");
        }
        Ok(EngineConfig {
            engine_path: self.engine.clone(),
            engine_args: self.engine_args.clone(),
            movetime: Duration::from_millis(self.movetime_ms),
            elo: self.elo.or(self.level.map(elo_for_level)),
            fallback_depth: self.depth,
            reply_timeout: Duration::from_millis(self.timeout_ms),
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = args.engine_config()?;
    let game = match &args.fen {
        Some(fen) => Game::from_fen(fen).context("invalid --fen")?,
        None => Game::new(),
    };

    info!(version = env!("CARGO_PKG_VERSION"), "gambit starting");
    let advisor = Advisor::from_config(&config);
    let mut console = Console::new(game, advisor);

    let stdin = io::stdin();
    console.run(stdin.lock(), io::stdout().lock())?;
    info!(plies = console.game().cursor(), "gambit exiting");
    Ok(())
}
