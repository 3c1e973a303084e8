//! # Main — CLI Entry Point
//!
//! Parses arguments, sets up structured logging, and dispatches to the
//! `check` / `battery` subcommands implemented in `cli.rs`.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "collatz", about = "Verify Collatz trajectories for arbitrarily large integers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a single starting value against one or all engines
    Check {
        /// Starting value, as a decimal string (arbitrarily large)
        #[arg(long)]
        n: String,
        /// Which engine(s) to run
        #[arg(long, value_enum, default_value_t = Engine::All)]
        engine: Engine,
    },
    /// Run the fixed cross-validation battery, then the large-input timing run
    Battery,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Engine {
    Naive,
    Slow,
    Fast,
    All,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Engine::Naive => "naive",
            Engine::Slow => "slow",
            Engine::Fast => "fast",
            Engine::All => "all",
        };
        write!(f, "{s}")
    }
}

fn main() -> Result<()> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run(&cli.command)
}
