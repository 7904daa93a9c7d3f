//! TZAAR CLI - Command-line interface
//!
//! Commands:
//! - play: Play a single game (human or computer on either side)
//! - match: Play a series of games between two computer players

mod human;
mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tzaar")]
#[command(about = "TZAAR rules engine and game arbiter")]
struct Cli {
    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play a series of games between two computer players
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the board and prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
