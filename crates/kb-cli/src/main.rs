//! Terminal front end for the Kaninchenbau text adventure.

mod banner;
mod console;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use kb_core::{Content, CoreResult, World};
use kb_fiction::{Ending, FictionSession, GameConfig};
use log::{LevelFilter, info};

use crate::console::TerminalConsole;

#[derive(Parser)]
#[command(
    name = "kaninchenbau",
    about = "Kaninchenbau: a text adventure on an old home computer",
    version
)]
struct Cli {
    /// RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Story content file (JSON) to play instead of the built-in story
    #[arg(long)]
    content: Option<PathBuf>,

    /// Print text at once and skip the boot sequence
    #[arg(long)]
    fast: bool,

    /// Wrap width in columns
    #[arg(long, default_value_t = 70)]
    width: usize,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.format_timestamp(None);
    match verbosity {
        0 => {
            builder.filter_level(LevelFilter::Warn);
            builder.parse_default_env();
        }
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    let _ = builder.try_init();
}

fn load_world(path: Option<&Path>) -> CoreResult<World> {
    match path {
        Some(path) => {
            info!("loading content from {}", path.display());
            World::from_content(Content::load(path)?)
        }
        None => World::embedded(),
    }
}

fn run(cli: &Cli) -> Result<Ending, String> {
    let world = load_world(cli.content.as_deref()).map_err(|e| e.to_string())?;
    let mut config = GameConfig::default();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut console = TerminalConsole::new(cli.fast, cli.width)
        .map_err(|e| format!("cannot open terminal: {e}"))?;
    if !cli.fast {
        banner::boot(&mut console).map_err(|e| e.to_string())?;
    }

    let mut session = FictionSession::new(world, config, console);
    session.run().map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(ending) => info!("game over: {ending}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
