//! Game arbiter - runs one game between two players
//!
//! Level 3 - Step-level implementation

use tzaar_core::{
    adjudicate, apply, is_deadlocked, is_terminal, validate, Board, Color, InvalidMoveReason,
    Move, Player, PlayerError,
};

use crate::config::ArbiterConfig;

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The loser has no pieces left of some kind
    Elimination,
    /// The loser returned a move outside the legal set
    Forfeit {
        offender: Color,
        attempted: Move,
        reason: InvalidMoveReason,
    },
    /// Neither side can attack or stack; decided on material
    Deadlock,
    /// The configured turn cap was reached; decided on material
    TurnLimit,
}

/// Outcome of a single game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Winning color
    pub winner: Color,
    /// Why the game ended
    pub reason: EndReason,
    /// Completed turns
    pub turns: u32,
    /// Move history
    pub moves: Vec<Move>,
    /// Board when the game ended
    pub final_board: Board,
}

impl GameOutcome {
    /// Check if the game ended by a protocol violation
    pub fn is_forfeit(&self) -> bool {
        matches!(self.reason, EndReason::Forfeit { .. })
    }
}

/// A failure that stops the game without a result
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{color:?} player could not move")]
    Player {
        color: Color,
        #[source]
        source: PlayerError,
    },
}

/// Runs the turn loop: ask, validate, apply, check, switch
#[derive(Clone, Debug, Default)]
pub struct GameArbiter {
    config: ArbiterConfig,
}

impl GameArbiter {
    /// Create a new arbiter
    pub fn new(config: ArbiterConfig) -> Self {
        Self { config }
    }

    /// Play one game to completion. White moves first.
    pub fn run<W, B>(&self, white: &mut W, black: &mut B, initial: Board) -> Result<GameOutcome, GameError>
    where
        W: Player + ?Sized,
        B: Player + ?Sized,
    {
        let mut board = initial;
        let mut color = Color::White;
        let mut moves = Vec::new();
        let mut turns = 0u32;

        loop {
            if let Some(winner) = is_terminal(&board) {
                return Ok(finish(winner, EndReason::Elimination, turns, moves, board));
            }
            if is_deadlocked(&board) {
                let winner = adjudicate(&board);
                return Ok(finish(winner, EndReason::Deadlock, turns, moves, board));
            }
            if self.config.max_turns.is_some_and(|cap| turns >= cap) {
                let winner = adjudicate(&board);
                return Ok(finish(winner, EndReason::TurnLimit, turns, moves, board));
            }

            let choice = match color {
                Color::White => white.choose_move(&board, color),
                Color::Black => black.choose_move(&board, color),
            };
            let mv = choice.map_err(|source| GameError::Player { color, source })?;

            if let Err(reason) = validate(&board, color, mv) {
                tracing::warn!("{:?} forfeits with illegal move {}: {}", color, mv, reason);
                let forfeit = EndReason::Forfeit {
                    offender: color,
                    attempted: mv,
                    reason,
                };
                return Ok(finish(color.opponent(), forfeit, turns, moves, board));
            }

            tracing::debug!("Turn {}: {:?} plays {}", turns + 1, color, mv);
            board = apply(&board, mv);
            moves.push(mv);
            turns += 1;
            color = color.opponent();
        }
    }
}

/// Play a game with default arbiter settings and return the winner
pub fn play_game<W, B>(white: &mut W, black: &mut B, board: Board) -> Result<Color, GameError>
where
    W: Player + ?Sized,
    B: Player + ?Sized,
{
    GameArbiter::default()
        .run(white, black, board)
        .map(|outcome| outcome.winner)
}

fn finish(winner: Color, reason: EndReason, turns: u32, moves: Vec<Move>, final_board: Board) -> GameOutcome {
    tracing::info!("{:?} wins after {} turns ({:?})", winner, turns, reason);
    GameOutcome {
        winner,
        reason,
        turns,
        moves,
        final_board,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tzaar_core::{legal_moves, Piece, PieceStack, PieceType, Position, RandomPlayer};

    /// Plays a fixed list of moves, then passes
    struct Scripted {
        moves: VecDeque<Move>,
    }

    impl Scripted {
        fn new(moves: &[&str]) -> Self {
            Self {
                moves: moves.iter().map(|m| m.parse().unwrap()).collect(),
            }
        }
    }

    impl Player for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn choose_move(&mut self, _board: &Board, _color: Color) -> Result<Move, PlayerError> {
            Ok(self.moves.pop_front().unwrap_or(Move::Pass))
        }
    }

    /// Gives up immediately
    struct Closed;

    impl Player for Closed {
        fn name(&self) -> &str {
            "closed"
        }

        fn choose_move(&mut self, _board: &Board, _color: Color) -> Result<Move, PlayerError> {
            Err(PlayerError::InputClosed)
        }
    }

    fn single(at: &str, owner: Color, kind: PieceType) -> (Position, PieceStack) {
        (at.parse().unwrap(), PieceStack::single(Piece::new(owner, kind)))
    }

    fn reserves() -> Vec<(Position, PieceStack)> {
        vec![
            single("A1", Color::White, PieceType::Tzaar),
            single("A3", Color::White, PieceType::Tzarra),
            single("A5", Color::White, PieceType::Tott),
            single("I1", Color::Black, PieceType::Tzaar),
            single("I3", Color::Black, PieceType::Tzarra),
            single("I5", Color::Black, PieceType::Tott),
        ]
    }

    #[test]
    fn test_illegal_move_forfeits() {
        let mut white = Scripted::new(&["pass"]);
        let mut black = RandomPlayer::with_seed(1);
        let outcome = GameArbiter::default()
            .run(&mut white, &mut black, Board::standard())
            .unwrap();

        assert_eq!(outcome.winner, Color::Black);
        assert_eq!(outcome.turns, 0);
        assert_eq!(
            outcome.reason,
            EndReason::Forfeit {
                offender: Color::White,
                attempted: Move::Pass,
                reason: InvalidMoveReason::PassWithMovesAvailable,
            }
        );
        assert!(outcome.is_forfeit());
    }

    #[test]
    fn test_capture_wins() {
        let mut cells = reserves();
        cells.push(single("A2", Color::Black, PieceType::Tott));
        cells.push(single("E4", Color::White, PieceType::Tott));
        cells.push(single("E3", Color::White, PieceType::Tott));
        let board = Board::from_placements(cells).unwrap();

        // White stacks, Black then takes the only white Tzaar
        let mut white = Scripted::new(&["E4-E3"]);
        let mut black = Scripted::new(&["A2xA1"]);
        let outcome = GameArbiter::default().run(&mut white, &mut black, board).unwrap();

        assert_eq!(outcome.winner, Color::Black);
        assert_eq!(outcome.reason, EndReason::Elimination);
        assert_eq!(outcome.turns, 2);
        assert_eq!(outcome.final_board.piece_counts(Color::White, PieceType::Tzaar), 0);
    }

    #[test]
    fn test_terminal_before_first_turn() {
        let board = Board::from_placements(vec![single("E4", Color::Black, PieceType::Tott)]).unwrap();
        let mut white = Closed;
        let mut black = Closed;
        assert_eq!(play_game(&mut white, &mut black, board).unwrap(), Color::Black);
    }

    #[test]
    fn test_deadlock_adjudicated() {
        let mut cells = reserves();
        cells.push(single("E2", Color::White, PieceType::Tott));
        let board = Board::from_placements(cells).unwrap();
        let mut white = Closed;
        let mut black = Closed;
        let outcome = GameArbiter::default().run(&mut white, &mut black, board).unwrap();

        assert_eq!(outcome.reason, EndReason::Deadlock);
        assert_eq!(outcome.winner, Color::White);
    }

    #[test]
    fn test_player_error_propagates() {
        let mut white = Closed;
        let mut black = RandomPlayer::with_seed(1);
        let result = play_game(&mut white, &mut black, Board::standard());
        assert!(matches!(
            result,
            Err(GameError::Player { color: Color::White, source: PlayerError::InputClosed })
        ));
    }

    #[test]
    fn test_turn_limit() {
        let mut white = RandomPlayer::with_seed(1);
        let mut black = RandomPlayer::with_seed(2);
        let arbiter = GameArbiter::new(ArbiterConfig::default().with_max_turns(4));
        let outcome = arbiter.run(&mut white, &mut black, Board::standard()).unwrap();

        assert_eq!(outcome.turns, 4);
        assert_eq!(outcome.moves.len(), 4);
        assert_eq!(outcome.reason, EndReason::TurnLimit);
    }

    #[test]
    fn test_random_game_terminates_with_legal_history() {
        let mut white = RandomPlayer::with_seed(10);
        let mut black = RandomPlayer::with_seed(20);
        let start = Board::random_seeded(30);
        let outcome = GameArbiter::default()
            .run(&mut white, &mut black, start.clone())
            .unwrap();

        assert!(!outcome.is_forfeit());

        // Replay the history and check every move was legal
        let mut board = start;
        let mut color = Color::White;
        for mv in &outcome.moves {
            assert!(legal_moves(&board, color).contains(mv));
            board = apply(&board, *mv);
            color = color.opponent();
        }
        assert_eq!(board, outcome.final_board);
    }
}
