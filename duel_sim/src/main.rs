//! Headless Duel Runner
//!
//! Plays seeded AI vs AI games and prints every report plus aggregate
//! results as text or JSON.

use clap::{Parser, ValueEnum};
use duel_core::config::{default_game_constants, load_game_constants};
use duel_core::{GameConstants, GameReport, GameSession, SessionState, Side};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};

/// Turn limit applied when the config leaves games unlimited
const DEFAULT_MAX_TURNS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Headless Duel Runner - AI vs AI games for balance checks
#[derive(Parser, Debug)]
#[command(name = "duel_sim")]
#[command(about = "Run seeded AI vs AI duels and report the results")]
struct Args {
    /// Game constants TOML (defaults to the bundled config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Turn limit when the config sets none (0 keeps games unlimited)
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Print every turn to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One finished game
#[derive(Debug, Serialize)]
struct GameRun {
    game: u32,
    report: GameReport,
}

/// JSON output structure
#[derive(Debug, Default, Serialize)]
struct SimSummary {
    seed: u64,
    games: u32,
    first_wins: u32,
    second_wins: u32,
    draws: u32,
    turn_limits: u32,
    total_turns: u64,
    average_turns: f64,
    runs: Vec<GameRun>,
}

impl SimSummary {
    fn record(&mut self, run: GameRun) {
        match run.report.state {
            SessionState::Won(Side::First) => self.first_wins += 1,
            SessionState::Won(Side::Second) => self.second_wins += 1,
            SessionState::Draw => self.draws += 1,
            SessionState::TurnLimit => self.turn_limits += 1,
            SessionState::Active | SessionState::PersistentSlain => {}
        }
        self.games += 1;
        self.total_turns += u64::from(run.report.total_turns);
        self.average_turns = self.total_turns as f64 / f64::from(self.games);
        self.runs.push(run);
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut constants = match &args.config {
        Some(path) => load_game_constants(path).unwrap_or_else(|err| {
            eprintln!("duel_sim: {err}");
            process::exit(2);
        }),
        None => default_game_constants(),
    };
    if constants.rules.max_turns == 0 {
        constants.rules.max_turns = args.max_turns;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, games = args.games, "starting simulation");

    let summary = run_games(&constants, args.games, seed, args.verbose);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).map_err(io::Error::other)?;
            println!("{json}");
        }
        OutputFormat::Text => print_text(&summary),
    }

    Ok(())
}

/// Play `games` AI vs AI games from one seeded generator
fn run_games(constants: &GameConstants, games: u32, seed: u64, verbose: bool) -> SimSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = SimSummary {
        seed,
        ..SimSummary::default()
    };

    for game in 1..=games {
        let mut session = GameSession::ai_vs_ai(constants, &mut rng);
        let report = session.run(&mut rng, |record| {
            if verbose {
                eprintln!(
                    "[game {game} turn {}] {} | {}",
                    record.turn, record.first_outcome, record.second_outcome
                );
            }
        });
        debug!(game, state = %report.state, turns = report.total_turns, "game finished");
        summary.record(GameRun { game, report });
    }

    summary
}

fn print_text(summary: &SimSummary) {
    for run in &summary.runs {
        println!("=== Game {} ===", run.game);
        println!("{}", run.report);
        println!();
    }

    println!("=== Summary (seed {}) ===", summary.seed);
    println!("Games played:  {}", summary.games);
    println!("First wins:    {}", summary.first_wins);
    println!("Second wins:   {}", summary.second_wins);
    println!("Draws:         {}", summary.draws);
    println!("Turn limits:   {}", summary.turn_limits);
    println!("Average turns: {:.1}", summary.average_turns);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constants() -> GameConstants {
        let mut constants = GameConstants::default();
        constants.rules.max_turns = 300;
        constants
    }

    #[test]
    fn test_runs_are_deterministic_per_seed() {
        let first = run_games(&constants(), 5, 99, false);
        let second = run_games(&constants(), 5, 99, false);

        assert_eq!(first.games, 5);
        let states: Vec<_> = first.runs.iter().map(|run| &run.report).collect();
        let again: Vec<_> = second.runs.iter().map(|run| &run.report).collect();
        assert_eq!(states, again);
    }

    #[test]
    fn test_summary_counts_every_game() {
        let summary = run_games(&constants(), 20, 7, false);

        assert_eq!(
            summary.first_wins + summary.second_wins + summary.draws + summary.turn_limits,
            20
        );
        assert_eq!(summary.runs.len(), 20);
        assert!(summary.runs.iter().all(|run| run.report.total_turns <= 300));
        assert!(summary.runs.iter().all(|run| run.report.finals.len() == 2));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["games"], 20);
        assert_eq!(json["runs"][0]["report"]["mode"], "ai_vs_ai");
    }
}
