//! TZAAR Arena - Running games between players
//!
//! This crate provides the game-playing infrastructure:
//! - The arbiter loop that alternates two players and enforces the rules
//! - Match play between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: play_match (phases)
//! - Level 3: GameArbiter::run, play_game (steps)
//! - Level 4: utilities, configuration

mod arbiter;
mod config;
mod match_play;

pub use arbiter::{play_game, EndReason, GameArbiter, GameError, GameOutcome};
pub use config::{AiConfig, ArbiterConfig, MatchConfig, PlayerType};
pub use match_play::{play_match, MatchResult};
