//! Configuration types for games and matches
//!
//! Level 4 - Utilities and configuration

use tzaar_core::{AlphaBetaPlayer, Heuristics, Player, RandomPlayer};

/// Computer player kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerType {
    /// Uniform choice among legal moves
    #[default]
    Random,
    /// Alpha-Beta pruning search
    AlphaBeta,
}

/// AI configuration for game playing
#[derive(Clone, Debug)]
pub struct AiConfig {
    /// Player type
    pub player_type: PlayerType,
    /// Search depth for alpha-beta
    pub depth: u32,
    /// Heuristics for evaluation
    pub heuristics: Heuristics,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            player_type: PlayerType::Random,
            depth: 2,
            heuristics: Heuristics::default(),
            seed: None,
        }
    }
}

impl AiConfig {
    /// Create config for the random-but-legal player
    pub fn random() -> Self {
        Self::default()
    }

    /// Create config for alpha-beta at given depth
    pub fn alpha_beta(depth: u32) -> Self {
        Self {
            player_type: PlayerType::AlphaBeta,
            depth,
            ..Default::default()
        }
    }

    /// Set custom heuristics
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Instantiate the player; `seed` overrides the configured one
    pub fn build(&self, seed: Option<u64>) -> Box<dyn Player + Send> {
        let seed = seed.or(self.seed);
        match self.player_type {
            PlayerType::Random => match seed {
                Some(s) => Box::new(RandomPlayer::with_seed(s)),
                None => Box::new(RandomPlayer::new()),
            },
            PlayerType::AlphaBeta => Box::new(AlphaBetaPlayer::with_seed(
                self.depth,
                self.heuristics.clone(),
                seed.unwrap_or(42),
            )),
        }
    }
}

/// Arbiter configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArbiterConfig {
    /// Safety cap on completed turns; `None` plays until the game decides itself
    pub max_turns: Option<u32>,
}

impl ArbiterConfig {
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = Some(max_turns);
        self
    }
}

/// Configuration for a series of games between two computer players
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Number of games (colors alternate, so even counts are fairest)
    pub games: usize,
    /// Player that takes White in the first game
    pub first: AiConfig,
    /// Player that takes Black in the first game
    pub second: AiConfig,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Shuffle the starting layout for every game instead of the standard one
    pub random_layouts: bool,
    /// Arbiter settings for every game
    pub arbiter: ArbiterConfig,
    /// Base seed; game `i` uses `seed + i`
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 10,
            first: AiConfig::default(),
            second: AiConfig::default(),
            parallel: true,
            random_layouts: false,
            arbiter: ArbiterConfig::default().with_max_turns(1000),
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Create match config between two players
    pub fn new(first: AiConfig, second: AiConfig, games: usize) -> Self {
        Self {
            games,
            first,
            second,
            ..Default::default()
        }
    }

    /// Play games one after another
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tzaar_core::{legal_moves, Board, Color};

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.player_type, PlayerType::Random);
        assert_eq!(config.depth, 2);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_ai_config_alpha_beta() {
        let config = AiConfig::alpha_beta(3).with_seed(7);
        assert_eq!(config.player_type, PlayerType::AlphaBeta);
        assert_eq!(config.depth, 3);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_ai_config_with_heuristics() {
        let heuristics = Heuristics {
            mobility_weight: 0.0,
            ..Heuristics::default()
        };
        let config = AiConfig::alpha_beta(1).with_heuristics(heuristics);
        assert_eq!(config.heuristics.mobility_weight, 0.0);
        assert_eq!(config.heuristics.piece_values, Heuristics::default().piece_values);
    }

    #[test]
    fn test_build_players() {
        let board = Board::standard();
        for config in [AiConfig::random(), AiConfig::alpha_beta(1)] {
            let mut player = config.build(Some(3));
            let mv = player.choose_move(&board, Color::White).unwrap();
            assert!(legal_moves(&board, Color::White).contains(&mv));
        }
    }

    #[test]
    fn test_match_config_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.games, 10);
        assert!(config.parallel);
        assert_eq!(config.arbiter.max_turns, Some(1000));
        assert!(!MatchConfig::default().sequential().parallel);
    }
}
