//! Move legality, move application and game termination
//!
//! Every function here is pure: boards go in, boards or verdicts come out.

use crate::board::Position;
use crate::game::{Board, Move};
use crate::pieces::Color;

/// Why a proposed move is not playable
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMoveReason {
    #[error("{0:?} is not on the board")]
    OffBoard(Position),

    #[error("there is no stack at {0}")]
    EmptyOrigin(Position),

    #[error("the stack at {at} is controlled by {owner:?}")]
    NotOwner { at: Position, owner: Color },

    #[error("{to} is not adjacent to {from}")]
    NotAdjacent { from: Position, to: Position },

    #[error("there is no stack at {0} to capture or climb onto")]
    EmptyTarget(Position),

    #[error("cannot attack the friendly stack at {0}")]
    AttackOnOwnStack(Position),

    #[error("cannot stack onto the opposing stack at {0}")]
    StackOnOpponent(Position),

    #[error("cannot pass while an attack or stack move is available")]
    PassWithMovesAvailable,
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// All legal moves for `color`, in board order.
///
/// Pass is returned alone, and only when no attack or stack exists.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();

    for (from, _) in board.controlled_by(color) {
        for to in from.neighbors() {
            if let Some(target) = board.get(to) {
                if target.owner() == color {
                    moves.push(Move::Stack { from, to });
                } else {
                    moves.push(Move::Attack { from, to });
                }
            }
        }
    }

    if moves.is_empty() {
        moves.push(Move::Pass);
    }
    moves
}

/// Whether `color` has at least one attack or stack move
pub fn has_non_pass_move(board: &Board, color: Color) -> bool {
    board
        .controlled_by(color)
        .any(|(from, _)| from.neighbors().any(|to| board.get(to).is_some()))
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Check that `mv` is legal for `color` on `board`
pub fn validate(board: &Board, color: Color, mv: Move) -> Result<(), InvalidMoveReason> {
    let Some((from, to)) = mv.endpoints() else {
        return if has_non_pass_move(board, color) {
            Err(InvalidMoveReason::PassWithMovesAvailable)
        } else {
            Ok(())
        };
    };

    for pos in [from, to] {
        if !pos.is_valid() {
            return Err(InvalidMoveReason::OffBoard(pos));
        }
    }

    let origin = board.get(from).ok_or(InvalidMoveReason::EmptyOrigin(from))?;
    if origin.owner() != color {
        return Err(InvalidMoveReason::NotOwner {
            at: from,
            owner: origin.owner(),
        });
    }
    if !from.is_adjacent(to) {
        return Err(InvalidMoveReason::NotAdjacent { from, to });
    }

    let target = board.get(to).ok_or(InvalidMoveReason::EmptyTarget(to))?;
    match mv {
        Move::Attack { .. } if target.owner() == color => {
            Err(InvalidMoveReason::AttackOnOwnStack(to))
        }
        Move::Stack { .. } if target.owner() != color => {
            Err(InvalidMoveReason::StackOnOpponent(to))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// MOVE APPLICATION
// ============================================================================

/// Play `mv` on a copy of `board`.
///
/// The move must already be validated. A move whose endpoints are missing
/// leaves the copy unchanged.
pub fn apply(board: &Board, mv: Move) -> Board {
    let mut next = board.clone();

    match mv {
        Move::Attack { from, to } => {
            if from != to && board.get(to).is_some() {
                if let Some(attacker) = next.cells.remove(&from) {
                    // The captured stack leaves play with the overwrite
                    next.cells.insert(to, attacker);
                }
            }
        }
        Move::Stack { from, to } => {
            if let (true, Some(moving), Some(below)) = (from != to, board.get(from), board.get(to)) {
                let merged = moving.place_on(below);
                next.cells.remove(&from);
                next.cells.insert(to, merged);
            }
        }
        Move::Pass => {}
    }

    next
}

// ============================================================================
// TERMINATION
// ============================================================================

/// Winner, if a color has lost every piece of some kind.
///
/// White is checked first; only a malformed board can have both sides at
/// zero.
pub fn is_terminal(board: &Board) -> Option<Color> {
    Color::ALL
        .into_iter()
        .find(|&color| board.min_kind_count(color) == 0)
        .map(Color::opponent)
}

/// Neither color can attack or stack; only passes can follow
pub fn is_deadlocked(board: &Board) -> bool {
    Color::ALL
        .iter()
        .all(|&color| !has_non_pass_move(board, color))
}

/// Decide a game that cannot finish by elimination.
///
/// More pieces on the board wins, then the larger scarcest kind, then Black
/// as the second mover.
pub fn adjudicate(board: &Board) -> Color {
    let white = (board.total_pieces(Color::White), board.min_kind_count(Color::White));
    let black = (board.total_pieces(Color::Black), board.min_kind_count(Color::Black));
    if white > black {
        Color::White
    } else {
        Color::Black
    }
}

// ============================================================================
// TESTS
// ============================================================================
