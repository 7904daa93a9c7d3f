//! Match command - play games between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: match_config(), report_results()
//! - Level 4: heuristics loading, formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tzaar_arena::{play_match, AiConfig, ArbiterConfig, EndReason, MatchConfig, MatchResult};
use tzaar_core::Heuristics;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Computer player kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AiKind {
    Random,
    Alphabeta,
}

#[derive(Args)]
pub struct MatchArgs {
    /// Player that takes White in the first game
    #[arg(long, value_enum, default_value = "alphabeta")]
    pub white: AiKind,

    /// Player that takes Black in the first game
    #[arg(long, value_enum, default_value = "random")]
    pub black: AiKind,

    /// Number of games to play (will alternate colors)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// AI search depth (for alpha-beta)
    #[arg(long, default_value = "2")]
    pub depth: u32,

    /// JSON file with evaluation weights for alpha-beta players
    #[arg(long)]
    pub heuristics: Option<PathBuf>,

    /// Shuffle the starting layout for every game
    #[arg(long)]
    pub random_layouts: bool,

    /// Maximum turns per game
    #[arg(long, default_value = "1000")]
    pub max_turns: u32,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build the match configuration
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let heuristics = match &args.heuristics {
        Some(path) => load_heuristics(path)?,
        None => Heuristics::default(),
    };
    let config = match_config(&args, &heuristics, seed);

    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games, depth={})",
        args.white,
        args.black,
        args.games,
        args.depth
    );

    let results = play_match(&config).context("match aborted")?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn match_config(args: &MatchArgs, heuristics: &Heuristics, seed: Option<u64>) -> MatchConfig {
    let first = ai_config(args.white, args.depth, heuristics);
    let second = ai_config(args.black, args.depth, heuristics);
    let mut config = MatchConfig::new(first, second, args.games);
    config.random_layouts = args.random_layouts;
    config.arbiter = ArbiterConfig::default().with_max_turns(args.max_turns);
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if args.sequential {
        config = config.sequential();
    }
    config
}

/// Report match results
fn report_results(results: &MatchResult, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args)
    } else {
        print_text_results(results, args);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Load evaluation weights from a JSON file
pub fn load_heuristics(path: &Path) -> Result<Heuristics> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("malformed heuristics file {}", path.display()))
}

fn ai_config(kind: AiKind, depth: u32, heuristics: &Heuristics) -> AiConfig {
    match kind {
        AiKind::Random => AiConfig::random(),
        AiKind::Alphabeta => AiConfig::alpha_beta(depth).with_heuristics(heuristics.clone()),
    }
}

fn reason_label(reason: &EndReason) -> &'static str {
    match reason {
        EndReason::Elimination => "elimination",
        EndReason::Forfeit { .. } => "forfeit",
        EndReason::Deadlock => "deadlock",
        EndReason::TurnLimit => "turn-limit",
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResult, args: &MatchArgs) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: String,
        reason: &'static str,
        turns: u32,
        moves: Vec<String>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: String,
        second: String,
        total_games: u32,
        first_wins: u32,
        second_wins: u32,
        white_wins: u32,
        black_wins: u32,
        first_win_rate: f32,
        second_win_rate: f32,
        white_win_rate: f32,
        forfeits: u32,
        avg_turns: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        first: format!("{:?}", args.white).to_lowercase(),
        second: format!("{:?}", args.black).to_lowercase(),
        total_games: results.games_played,
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        white_wins: results.white_wins,
        black_wins: results.black_wins,
        first_win_rate: results.first_win_rate(),
        second_win_rate: results.second_win_rate(),
        white_win_rate: results.white_win_rate(),
        forfeits: results.forfeits,
        avg_turns: results.avg_turns,
        games: results
            .game_outcomes
            .iter()
            .enumerate()
            .map(|(i, g)| JsonGame {
                game_number: i + 1,
                winner: format!("{:?}", g.winner),
                reason: reason_label(&g.reason),
                turns: g.turns,
                moves: g.moves.iter().map(|m| m.to_string()).collect(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResult, args: &MatchArgs) {
    println!("\n=== Match Results ===");
    println!("Total games: {}", results.games_played);
    println!(
        "{:<10} {} ({:.1}%)",
        format!("{:?}:", args.white),
        results.first_wins,
        results.first_win_rate() * 100.0
    );
    println!(
        "{:<10} {} ({:.1}%)",
        format!("{:?}:", args.black),
        results.second_wins,
        results.second_win_rate() * 100.0
    );
    println!(
        "White side: {} ({:.1}%)",
        results.white_wins,
        results.white_win_rate() * 100.0
    );
    println!("Forfeits:   {}", results.forfeits);
    println!("Avg turns:  {:.1}", results.avg_turns);

    println!("\nGame details:");
    for (i, game) in results.game_outcomes.iter().enumerate() {
        println!(
            "  Game {}: {:?} wins by {} in {} turns",
            i + 1,
            game.winner,
            reason_label(&game.reason),
            game.turns
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tzaar_arena::PlayerType;

    fn args() -> MatchArgs {
        MatchArgs {
            white: AiKind::Alphabeta,
            black: AiKind::Random,
            games: 4,
            depth: 3,
            heuristics: None,
            random_layouts: true,
            max_turns: 50,
            sequential: true,
            json: false,
        }
    }

    #[test]
    fn test_match_config_from_args() {
        let config = match_config(&args(), &Heuristics::default(), Some(9));
        assert_eq!(config.games, 4);
        assert_eq!(config.first.player_type, PlayerType::AlphaBeta);
        assert_eq!(config.first.depth, 3);
        assert_eq!(config.second.player_type, PlayerType::Random);
        assert_eq!(config.arbiter.max_turns, Some(50));
        assert_eq!(config.seed, 9);
        assert!(config.random_layouts);
        assert!(!config.parallel);
    }

    #[test]
    fn test_match_config_keeps_default_seed() {
        let config = match_config(&args(), &Heuristics::default(), None);
        assert_eq!(config.seed, MatchConfig::default().seed);
    }

    #[test]
    fn test_heuristics_file_reaches_alpha_beta_only() {
        let path = std::env::temp_dir().join(format!("tzaar-heuristics-{}.json", std::process::id()));
        let json = r#"{"piece_values": [5.0, 3.0, 1.0], "scarcity_weight": 2.0, "mobility_weight": 0.0}"#;
        std::fs::write(&path, json).unwrap();
        let heuristics = load_heuristics(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let config = match_config(&args(), &heuristics, None);
        assert_eq!(config.first.heuristics.piece_values, [5.0, 3.0, 1.0]);
        assert_eq!(config.first.heuristics.scarcity_weight, 2.0);
        assert_eq!(config.second.heuristics.piece_values, Heuristics::default().piece_values);
    }

    #[test]
    fn test_bad_heuristics_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("tzaar-bad-heuristics-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"piece_values": [1.0]}"#).unwrap();
        let result = load_heuristics(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());

        assert!(load_heuristics(Path::new("/nonexistent/tzaar/heuristics.json")).is_err());
    }
}
