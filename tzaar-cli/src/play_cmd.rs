//! Play command - one game between any two players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: initial_board(), build_player(), report_outcome()
//! - Level 4: argument types

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tzaar_arena::{AiConfig, ArbiterConfig, EndReason, GameArbiter, GameOutcome};
use tzaar_core::{Board, Color, Layout, Player};

use crate::human::HumanPlayer;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Who sits on one side of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Random,
    Alphabeta,
}

#[derive(Args)]
pub struct PlayArgs {
    /// White player
    #[arg(long, value_enum, default_value = "human")]
    pub white: PlayerKind,

    /// Black player
    #[arg(long, value_enum, default_value = "alphabeta")]
    pub black: PlayerKind,

    /// AI search depth (for alpha-beta)
    #[arg(long, default_value = "2")]
    pub depth: u32,

    /// Start from a JSON layout file
    #[arg(long, value_name = "FILE", conflicts_with = "random")]
    pub layout: Option<PathBuf>,

    /// Start from a shuffled layout
    #[arg(long)]
    pub random: bool,

    /// Stop after this many turns and decide on material
    #[arg(long)]
    pub max_turns: Option<u32>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let board = initial_board(&args, seed)?;

    let mut white = build_player(args.white, Color::White, args.depth, seed);
    let mut black = build_player(args.black, Color::Black, args.depth, seed);
    tracing::info!("Starting game: {} (White) vs {} (Black)", white.name(), black.name());

    let mut config = ArbiterConfig::default();
    if let Some(max_turns) = args.max_turns {
        config = config.with_max_turns(max_turns);
    }

    let outcome = GameArbiter::new(config)
        .run(&mut *white, &mut *black, board)
        .context("game aborted")?;

    report_outcome(&outcome);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Standard layout unless a file or shuffle was requested
fn initial_board(args: &PlayArgs, seed: Option<u64>) -> Result<Board> {
    if let Some(path) = &args.layout {
        return Layout::load_board(path)
            .with_context(|| format!("Failed to load layout: {}", path.display()));
    }
    if args.random {
        let mut rng = create_rng(seed);
        return Ok(Board::random(&mut rng));
    }
    Ok(Board::standard())
}

fn build_player(kind: PlayerKind, color: Color, depth: u32, seed: Option<u64>) -> Box<dyn Player> {
    // Offset so two computer players never share a stream
    let seed = seed.map(|s| match color {
        Color::White => s.wrapping_mul(2),
        Color::Black => s.wrapping_mul(2).wrapping_add(1),
    });
    match kind {
        PlayerKind::Human => {
            let name = format!("{:?}", color).to_lowercase();
            Box::new(HumanPlayer::new(&name, io::stdin().lock(), io::stdout()))
        }
        PlayerKind::Random => AiConfig::random().build(seed),
        PlayerKind::Alphabeta => AiConfig::alpha_beta(depth).build(seed),
    }
}

fn report_outcome(outcome: &GameOutcome) {
    println!();
    print!("{}", outcome.final_board);
    println!("{}", describe_outcome(outcome));
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub fn describe_outcome(outcome: &GameOutcome) -> String {
    let how = match outcome.reason {
        EndReason::Elimination => "by elimination".to_string(),
        EndReason::Forfeit {
            offender,
            attempted,
            reason,
        } => format!("by forfeit ({:?} played {}: {})", offender, attempted, reason),
        EndReason::Deadlock => "on material, no captures or stacks left".to_string(),
        EndReason::TurnLimit => "on material at the turn limit".to_string(),
    };
    format!("{:?} wins after {} turns {}", outcome.winner, outcome.turns, how)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> PlayArgs {
        PlayArgs {
            white: PlayerKind::Random,
            black: PlayerKind::Random,
            depth: 1,
            layout: None,
            random: false,
            max_turns: None,
        }
    }

    #[test]
    fn test_initial_board_default_is_standard() {
        assert_eq!(initial_board(&args(), None).unwrap(), Board::standard());
    }

    #[test]
    fn test_initial_board_random_is_seeded() {
        let shuffled = PlayArgs { random: true, ..args() };
        let a = initial_board(&shuffled, Some(5)).unwrap();
        let b = initial_board(&shuffled, Some(5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Board::random_seeded(5));
    }

    #[test]
    fn test_missing_layout_file_is_an_error() {
        let from_file = PlayArgs {
            layout: Some(PathBuf::from("/nonexistent/tzaar-layout.json")),
            ..args()
        };
        assert!(initial_board(&from_file, None).is_err());
    }

    #[test]
    fn test_describe_outcome() {
        let mut white = AiConfig::random().build(Some(1));
        let mut black = AiConfig::random().build(Some(2));
        let arbiter = GameArbiter::new(ArbiterConfig::default().with_max_turns(2));
        let outcome = arbiter.run(&mut *white, &mut *black, Board::standard()).unwrap();

        let text = describe_outcome(&outcome);
        assert!(text.contains("after 2 turns"));
        assert!(text.contains("turn limit"));
    }
}
