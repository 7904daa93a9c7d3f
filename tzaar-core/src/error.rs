//! Error types shared across the core crate

use crate::board::Position;
use crate::pieces::{Color, PieceType};

/// Malformed position or move notation
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid position: {0:?}")]
    Position(String),

    #[error("invalid move: {0:?}")]
    Move(String),
}

/// A placement that cannot form a legal board
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position {0:?} is not on the board")]
    OffBoard(Position),

    #[error("position {0} is occupied twice")]
    DuplicatePosition(Position),

    #[error("a stack needs at least one piece")]
    EmptyStack,

    #[error("the stack at {0} mixes both colors")]
    MixedStack(Position),

    #[error("{color:?} has {count} {kind:?} pieces, more than the starting {limit}")]
    TooManyPieces {
        color: Color,
        kind: PieceType,
        count: usize,
        limit: usize,
    },
}
