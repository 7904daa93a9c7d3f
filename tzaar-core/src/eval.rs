//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::game::Board;
use crate::pieces::{Color, PieceType};
use crate::rules::{is_terminal, legal_moves};

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Heuristics {
    /// Value of one piece of each kind (Tzaar, Tzarra, Tott)
    pub piece_values: [f32; 3],
    /// Weight for how close the scarcest kind is to running out
    pub scarcity_weight: f32,
    /// Weight for the number of available attacks
    pub mobility_weight: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        // Fewer pieces of a kind means each one matters more
        Self {
            piece_values: [2.5, 1.7, 1.0],
            scarcity_weight: 12.0,
            mobility_weight: 0.05,
        }
    }
}

/// Win value (effectively infinite)
pub const WIN_VALUE: f32 = 100000.0;

/// Evaluate a board from `color`'s point of view
pub fn evaluate(board: &Board, color: Color, heuristics: &Heuristics) -> f32 {
    if let Some(winner) = is_terminal(board) {
        return if winner == color { WIN_VALUE } else { -WIN_VALUE };
    }

    side_score(board, color, heuristics) - side_score(board, color.opponent(), heuristics)
}

/// Evaluate with a depth bonus so quicker wins score higher
pub fn evaluate_with_depth(board: &Board, color: Color, heuristics: &Heuristics, depth: i32) -> f32 {
    let base = evaluate(board, color, heuristics);
    if base >= WIN_VALUE {
        base + depth as f32
    } else if base <= -WIN_VALUE {
        base - depth as f32
    } else {
        base
    }
}

fn side_score(board: &Board, color: Color, heuristics: &Heuristics) -> f32 {
    let mut score = 0.0;
    let mut scarcest = 1.0f32;

    for kind in PieceType::ALL {
        let count = board.piece_counts(color, kind);
        score += heuristics.piece_values[kind as usize] * count as f32;
        scarcest = scarcest.min(count as f32 / kind.starting_count() as f32);
    }
    score += heuristics.scarcity_weight * scarcest;

    let attacks = legal_moves(board, color)
        .iter()
        .filter(|mv| mv.is_attack())
        .count();
    score + heuristics.mobility_weight * attacks as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::pieces::{Piece, PieceStack};

    #[test]
    fn test_standard_is_balanced() {
        let board = Board::standard();
        let h = Heuristics::default();
        let white = evaluate(&board, Color::White, &h);
        let black = evaluate(&board, Color::Black, &h);
        assert!((white + black).abs() < 1e-3);
    }

    #[test]
    fn test_terminal_scores() {
        let board = Board::from_placements(vec![(
            Position::new(1, 0),
            PieceStack::single(Piece::new(Color::Black, PieceType::Tott)),
        )])
        .unwrap();
        let h = Heuristics::default();
        assert_eq!(evaluate(&board, Color::Black, &h), WIN_VALUE);
        assert_eq!(evaluate(&board, Color::White, &h), -WIN_VALUE);
        assert!(evaluate_with_depth(&board, Color::Black, &h, 2) > WIN_VALUE);
    }
}
