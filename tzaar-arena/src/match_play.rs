//! Match play - multiple games between two computer players
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;
use tzaar_core::{Board, Color};

use crate::arbiter::{GameArbiter, GameError, GameOutcome};
use crate::config::MatchConfig;

/// Result of a match (multiple games)
#[derive(Clone, Debug, Default)]
pub struct MatchResult {
    /// Wins for the first configured player
    pub first_wins: u32,
    /// Wins for the second configured player
    pub second_wins: u32,
    /// Wins by whoever held White
    pub white_wins: u32,
    /// Wins by whoever held Black
    pub black_wins: u32,
    /// Games decided by an illegal move
    pub forfeits: u32,
    /// Average game length in turns
    pub avg_turns: f32,
    /// Total games played
    pub games_played: u32,
    /// Individual game outcomes, in game order
    pub game_outcomes: Vec<GameOutcome>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get win rate for the first player
    pub fn first_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.first_wins as f32 / self.games_played as f32
        }
    }

    /// Get win rate for the second player
    pub fn second_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.second_wins as f32 / self.games_played as f32
        }
    }

    /// Get win rate for the White side
    pub fn white_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.white_wins as f32 / self.games_played as f32
        }
    }
}

/// Play a match between the two configured players (Level 2 phase)
///
/// Plays multiple games alternating colors for fairness.
pub fn play_match(config: &MatchConfig) -> Result<MatchResult, GameError> {
    if config.games == 0 {
        return Ok(MatchResult::empty());
    }

    let game_configs = prepare_game_configs(config);
    tracing::info!(
        "Playing {} games ({})",
        game_configs.len(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    let results = if config.parallel {
        execute_games_parallel(config, &game_configs)?
    } else {
        execute_games(config, &game_configs)?
    };
    Ok(aggregate_results(results))
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Configuration for a single game in a match
#[derive(Clone, Copy)]
struct GameConfig {
    /// Whether the first configured player takes White this game
    first_is_white: bool,
    /// Seed for players and layout
    seed: u64,
}

/// Prepare game configurations for a match
fn prepare_game_configs(config: &MatchConfig) -> Vec<GameConfig> {
    (0..config.games)
        .map(|i| GameConfig {
            first_is_white: i % 2 == 0, // Alternate colors
            seed: config.seed.wrapping_add(i as u64),
        })
        .collect()
}

/// Execute games sequentially
fn execute_games(
    config: &MatchConfig,
    game_configs: &[GameConfig],
) -> Result<Vec<GameOutcomeWithContext>, GameError> {
    game_configs
        .iter()
        .map(|gc| play_single_game(config, gc))
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel(
    config: &MatchConfig,
    game_configs: &[GameConfig],
) -> Result<Vec<GameOutcomeWithContext>, GameError> {
    game_configs
        .par_iter()
        .map(|gc| play_single_game(config, gc))
        .collect()
}

/// Outcome with context about which player held which color
struct GameOutcomeWithContext {
    outcome: GameOutcome,
    first_was_white: bool,
}

/// Play a single game with the given configuration
fn play_single_game(config: &MatchConfig, gc: &GameConfig) -> Result<GameOutcomeWithContext, GameError> {
    let board = if config.random_layouts {
        Board::random_seeded(gc.seed)
    } else {
        Board::standard()
    };

    let (white_config, black_config) = if gc.first_is_white {
        (&config.first, &config.second)
    } else {
        (&config.second, &config.first)
    };
    // Distinct streams so identical player types do not mirror each other
    let mut white = white_config.build(Some(gc.seed.wrapping_mul(2)));
    let mut black = black_config.build(Some(gc.seed.wrapping_mul(2).wrapping_add(1)));

    let outcome = GameArbiter::new(config.arbiter).run(&mut *white, &mut *black, board)?;
    Ok(GameOutcomeWithContext {
        outcome,
        first_was_white: gc.first_is_white,
    })
}

/// Aggregate game outcomes into a match result
fn aggregate_results(outcomes: Vec<GameOutcomeWithContext>) -> MatchResult {
    let mut result = MatchResult::empty();
    let mut total_turns = 0u64;

    for owc in outcomes {
        total_turns += u64::from(owc.outcome.turns);
        if owc.outcome.is_forfeit() {
            result.forfeits += 1;
        }

        let winner_is_white = owc.outcome.winner == Color::White;
        if winner_is_white {
            result.white_wins += 1;
        } else {
            result.black_wins += 1;
        }
        // Attribute wins to the configured player, not the color
        if winner_is_white == owc.first_was_white {
            result.first_wins += 1;
        } else {
            result.second_wins += 1;
        }

        result.game_outcomes.push(owc.outcome);
    }

    result.games_played = result.game_outcomes.len() as u32;
    if result.games_played > 0 {
        result.avg_turns = total_turns as f32 / result.games_played as f32;
    }
    result
}
