//! TZAAR Core - Rules engine and players
//!
//! This crate provides the core game logic for TZAAR:
//! - Board geometry (60-cell hex grid with axial coordinates)
//! - Pieces, colors and stacks
//! - Board values, moves and starting layouts
//! - Move legality, application and termination
//! - The player contract with random and alpha-beta players

pub mod board;
pub mod error;
pub mod pieces;
pub mod game;
pub mod rules;
pub mod player;
pub mod eval;
pub mod ai;
pub mod layout;

// Re-exports for convenient access
pub use board::{Position, BOARD_RADIUS, CELL_COUNT, DIRECTIONS};
pub use error::{BoardError, ParseError};
pub use pieces::{Color, Piece, PieceStack, PieceType, PIECES_PER_COLOR};
pub use game::{Board, Move};
pub use rules::{adjudicate, apply, is_deadlocked, is_terminal, legal_moves, validate, InvalidMoveReason};
pub use player::{Player, PlayerError, RandomPlayer};
pub use eval::{evaluate, Heuristics, WIN_VALUE};
pub use ai::AlphaBetaPlayer;
pub use layout::Layout;
