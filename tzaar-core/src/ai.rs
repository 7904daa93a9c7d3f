//! CPU-based Alpha-Beta AI

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::eval::{evaluate, evaluate_with_depth, Heuristics};
use crate::game::{Board, Move};
use crate::pieces::Color;
use crate::player::{Player, PlayerError};
use crate::rules::{apply, is_terminal, legal_moves};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Noise scale for evaluation variety
const NOISE_SCALE: f32 = 0.1;

/// Default number of candidate moves searched per node
const DEFAULT_MAX_MOVES: usize = 15;

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player
pub struct AlphaBetaPlayer {
    pub depth: u32,
    pub max_moves: usize,
    pub heuristics: Heuristics,
    rng: ChaCha8Rng,
}

impl AlphaBetaPlayer {
    pub fn new(depth: u32, heuristics: Heuristics) -> Self {
        Self::with_seed(depth, heuristics, 42)
    }

    pub fn with_seed(depth: u32, heuristics: Heuristics, seed: u64) -> Self {
        Self {
            depth,
            max_moves: DEFAULT_MAX_MOVES,
            heuristics,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Get best move for `color`
    pub fn best_move(&mut self, board: &Board, color: Color) -> Move {
        let mut moves = legal_moves(board, color);
        if moves.len() == 1 {
            return moves[0];
        }
        order_moves(board, color, &mut moves);
        moves.truncate(self.max_moves);

        let mut best_move = moves[0];
        let mut best_score = f32::NEG_INFINITY;
        let mut alpha = f32::NEG_INFINITY;

        for mv in moves {
            let child = apply(board, mv);
            let score = -self.negamax(
                &child,
                color.opponent(),
                self.depth as i32 - 1,
                f32::NEG_INFINITY,
                -alpha,
            );
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
            alpha = alpha.max(score);
        }

        best_move
    }

    fn negamax(&mut self, board: &Board, color: Color, depth: i32, mut alpha: f32, beta: f32) -> f32 {
        // Terminal check with depth bonus
        if is_terminal(board).is_some() {
            return evaluate_with_depth(board, color, &self.heuristics, depth);
        }

        if depth <= 0 {
            let base = evaluate(board, color, &self.heuristics);
            let noise = (self.rng.gen::<f32>() - 0.5) * NOISE_SCALE;
            return base + noise;
        }

        let mut moves = legal_moves(board, color);
        order_moves(board, color, &mut moves);
        moves.truncate(self.max_moves);

        let mut best = f32::NEG_INFINITY;
        for mv in moves {
            let child = apply(board, mv);
            let score = -self.negamax(&child, color.opponent(), depth - 1, -beta, -alpha);

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Player for AlphaBetaPlayer {
    fn name(&self) -> &str {
        "alphabeta"
    }

    fn choose_move(&mut self, board: &Board, color: Color) -> Result<Move, PlayerError> {
        Ok(self.best_move(board, color))
    }
}

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Score a move for ordering (higher = search first)
fn move_score(board: &Board, color: Color, mv: &Move) -> f32 {
    match *mv {
        Move::Pass => -1000.0,
        Move::Stack { from, .. } => {
            // Prefer moving the scarcest kind
            let kind = board.get(from).map(|s| s.kind());
            match kind {
                Some(kind) => -(board.piece_counts(color, kind) as f32),
                None => -100.0,
            }
        }
        Move::Attack { to, .. } => match board.get(to) {
            Some(victim) => {
                let remaining = board.piece_counts(victim.owner(), victim.kind()).max(1);
                100.0 / remaining as f32 + victim.height() as f32
            }
            None => 0.0,
        },
    }
}

fn order_moves(board: &Board, color: Color, moves: &mut [Move]) {
    moves.sort_by(|a, b| {
        move_score(board, color, b)
            .partial_cmp(&move_score(board, color, a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::pieces::{Piece, PieceStack, PieceType};

    fn single(owner: Color, kind: PieceType) -> PieceStack {
        PieceStack::single(Piece::new(owner, kind))
    }

    #[test]
    fn test_ai_returns_legal_move() {
        let board = Board::standard();
        let mut ai = AlphaBetaPlayer::new(2, Heuristics::default());
        let mv = ai.best_move(&board, Color::White);
        assert!(legal_moves(&board, Color::White).contains(&mv));
    }

    #[test]
    fn test_ai_takes_last_tzaar() {
        let at = |s: &str| s.parse::<Position>().unwrap();
        let board = Board::from_placements(vec![
            (at("A1"), single(Color::White, PieceType::Tzaar)),
            (at("A3"), single(Color::White, PieceType::Tzarra)),
            (at("A5"), single(Color::White, PieceType::Tott)),
            (at("E3"), single(Color::White, PieceType::Tott)),
            (at("E4"), single(Color::Black, PieceType::Tzaar)),
            (at("E2"), single(Color::Black, PieceType::Tott)),
            (at("I3"), single(Color::Black, PieceType::Tzarra)),
            (at("I5"), single(Color::Black, PieceType::Tott)),
        ])
        .unwrap();

        let mut ai = AlphaBetaPlayer::new(2, Heuristics::default());
        let mv = ai.best_move(&board, Color::White);
        assert_eq!(mv, Move::Attack { from: at("E3"), to: at("E4") });
    }

    #[test]
    fn test_move_ordering() {
        let board = Board::standard();
        let pass_score = move_score(&board, Color::White, &Move::Pass);
        for mv in legal_moves(&board, Color::White) {
            assert!(move_score(&board, Color::White, &mv) > pass_score);
        }
    }

    #[test]
    fn test_single_move_shortcut() {
        let board = Board::from_placements(vec![
            (Position::new(-4, 0), single(Color::White, PieceType::Tzaar)),
            (Position::new(4, 0), single(Color::Black, PieceType::Tzaar)),
        ])
        .unwrap();
        let mut ai = AlphaBetaPlayer::new(3, Heuristics::default());
        assert_eq!(ai.best_move(&board, Color::White), Move::Pass);
    }
}
