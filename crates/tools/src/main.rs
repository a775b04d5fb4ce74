use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use treasure_core::history::newest_first;
use treasure_core::history_file::load_history_file;
use treasure_core::mapgen::BoardSummary;
use treasure_core::{
    Difficulty, GameResult, HistorySummary, Session, TierConfig, generate_board,
};

mod tier_file;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a board and print it as ASCII followed by a JSON summary
    Board {
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// TOML file overriding the built-in tier table
        #[arg(long)]
        tiers: Option<PathBuf>,
    },
    /// List the recorded results for one player, newest first
    History {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value = "player")]
        player: String,
    },
}

#[derive(Serialize)]
struct BoardReport {
    difficulty: Difficulty,
    seed: u64,
    snapshot_hash: String,
    #[serde(flatten)]
    summary: BoardSummary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Args::parse().command {
        Command::Board { difficulty, seed, tiers } => print_board(difficulty, seed, tiers),
        Command::History { path, player } => print_history(&path, &player),
    }
}

fn print_board(difficulty: Difficulty, seed: u64, tiers: Option<PathBuf>) -> Result<()> {
    let table = match tiers {
        Some(path) => tier_file::load_tier_table(&path)?,
        None => Default::default(),
    };
    let config = table.get(difficulty);
    config.validate().with_context(|| format!("Invalid {difficulty} tier"))?;

    let (rows, report) = preview_board(difficulty, config, seed);
    for row in rows {
        println!("{row}");
    }
    let json =
        serde_json::to_string_pretty(&report).context("Failed to serialize board summary")?;
    println!("{json}");
    Ok(())
}

/// Generates one board and returns its ASCII rows with the matching summary.
fn preview_board(
    difficulty: Difficulty,
    config: TierConfig,
    seed: u64,
) -> (Vec<String>, BoardReport) {
    let board = generate_board(&config, seed);
    let summary = board.summary();
    let session = Session::from_board(difficulty, config, board, seed);

    let report = BoardReport {
        difficulty,
        seed,
        snapshot_hash: format!("{:016x}", session.snapshot_hash()),
        summary,
    };
    (session.snapshot().to_ascii(), report)
}

fn print_history(path: &Path, player: &str) -> Result<()> {
    let loaded = load_history_file(path)
        .with_context(|| format!("Failed to load history file: {}", path.display()))?;
    let results: Vec<GameResult> = newest_first(&loaded.results, player);

    if results.is_empty() {
        println!("No results recorded for {player}.");
        return Ok(());
    }
    for result in &results {
        println!(
            "{:>15}  {:<6}  {:<4}  {:>4}s",
            result.recorded_at_unix_ms,
            result.difficulty.label(),
            result.outcome.code(),
            result.elapsed_seconds
        );
    }

    let summary = HistorySummary::from_results(&results);
    println!("Wins: {}  Losses: {}", summary.wins, summary.losses);
    if let Some(fastest) = summary.fastest_win_seconds {
        println!("Fastest win: {fastest}s");
    }
    Ok(())
}
