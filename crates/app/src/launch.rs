//! Command-line flags for the desktop app.

use std::path::PathBuf;

use clap::Parser;
use treasure_core::Difficulty;

use crate::history_store::default_history_path;
use crate::seed::{SeedChoice, generate_runtime_seed};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "treasure-hunt", about = "Find the treasure before your lives or time run out")]
pub struct LaunchArgs {
    /// Board seed; a fresh one is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,

    /// Name results are recorded under.
    #[arg(long, default_value = "player")]
    pub player: String,

    /// History file; defaults to the platform data directory.
    #[arg(long)]
    pub history: Option<PathBuf>,
}

impl LaunchArgs {
    pub fn seed_choice(&self) -> SeedChoice {
        match self.seed {
            Some(seed) => SeedChoice::Cli(seed),
            None => SeedChoice::Generated(generate_runtime_seed()),
        }
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.history.clone().or_else(default_history_path)
    }
}
