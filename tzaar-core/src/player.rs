//! The player capability and the random-but-legal player

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::game::{Board, Move};
use crate::pieces::Color;
use crate::rules::legal_moves;

/// Why a player could not produce a move at all
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("player input was closed")]
    InputClosed,

    #[error("player I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can pick a move for one side.
///
/// The returned move must be one of `legal_moves(board, color)`. Anything
/// else is treated by the arbiter as a forfeit, so interactive players are
/// expected to re-prompt internally instead of returning bad input.
pub trait Player {
    /// Display name for logs and reports
    fn name(&self) -> &str;

    /// Pick a move for `color` on `board`
    fn choose_move(&mut self, board: &Board, color: Color) -> Result<Move, PlayerError>;
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> Result<Move, PlayerError> {
        (**self).choose_move(board, color)
    }
}

/// Picks uniformly among the legal moves, no search
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> Result<Move, PlayerError> {
        let moves = legal_moves(board, color);
        // legal_moves always yields at least Pass
        Ok(moves.choose(&mut self.rng).copied().unwrap_or(Move::Pass))
    }
}
