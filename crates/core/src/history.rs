//! Finished-game results and the store contract the front-end records them through.

use std::cmp::Reverse;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::tiers::Difficulty;
use crate::types::{EndReport, RunOutcome};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub player: String,
    pub difficulty: Difficulty,
    pub outcome: RunOutcome,
    pub elapsed_seconds: u64,
    pub recorded_at_unix_ms: u64,
}

impl GameResult {
    pub fn from_report(player: &str, report: &EndReport, recorded_at_unix_ms: u64) -> Self {
        Self {
            player: player.to_string(),
            difficulty: report.difficulty,
            outcome: report.outcome,
            elapsed_seconds: report.elapsed_seconds(),
            recorded_at_unix_ms,
        }
    }
}

pub trait ResultStore {
    type Error;

    fn record_result(&mut self, result: &GameResult) -> Result<(), Self::Error>;

    /// Results recorded for `player`, newest first.
    fn fetch_history(&self, player: &str) -> Vec<GameResult>;
}

/// Filters `results` (in recording order) down to `player`, newest first. Results sharing a
/// timestamp keep reverse recording order.
pub fn newest_first<'a>(
    results: impl IntoIterator<Item = &'a GameResult>,
    player: &str,
) -> Vec<GameResult> {
    let mut matching: Vec<GameResult> =
        results.into_iter().filter(|result| result.player == player).cloned().collect();
    matching.reverse();
    matching.sort_by_key(|result| Reverse(result.recorded_at_unix_ms));
    matching
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub wins: usize,
    pub losses: usize,
    pub fastest_win_seconds: Option<u64>,
}

impl HistorySummary {
    pub fn from_results(results: &[GameResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result.outcome {
                RunOutcome::Win => {
                    summary.wins += 1;
                    let seconds = result.elapsed_seconds;
                    summary.fastest_win_seconds =
                        Some(summary.fastest_win_seconds.map_or(seconds, |best| best.min(seconds)));
                }
                RunOutcome::Loss => summary.losses += 1,
            }
        }
        summary
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryResultStore {
    results: Vec<GameResult>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl ResultStore for MemoryResultStore {
    type Error = Infallible;

    fn record_result(&mut self, result: &GameResult) -> Result<(), Self::Error> {
        self.results.push(result.clone());
        Ok(())
    }

    fn fetch_history(&self, player: &str) -> Vec<GameResult> {
        newest_first(&self.results, player)
    }
}

#[cfg(test)]
pub(crate) fn sample_result(
    player: &str,
    outcome: RunOutcome,
    recorded_at_unix_ms: u64,
) -> GameResult {
    GameResult {
        player: player.to_string(),
        difficulty: Difficulty::Medium,
        outcome,
        elapsed_seconds: recorded_at_unix_ms / 1000,
        recorded_at_unix_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_report_truncates_to_whole_seconds() {
        let report = EndReport {
            outcome: RunOutcome::Win,
            elapsed_ms: 61_999,
            difficulty: Difficulty::Hard,
        };
        let result = GameResult::from_report("ada", &report, 1_700_000_000_000);
        assert_eq!(result.elapsed_seconds, 61);
        assert_eq!(result.difficulty, Difficulty::Hard);
        assert_eq!(result.outcome.code(), "WIN");
    }

    #[test]
    fn memory_store_filters_by_player_newest_first() {
        let mut store = MemoryResultStore::new();
        for result in [
            sample_result("ada", RunOutcome::Loss, 1_000),
            sample_result("bob", RunOutcome::Win, 2_000),
            sample_result("ada", RunOutcome::Win, 3_000),
            sample_result("ada", RunOutcome::Loss, 2_500),
        ] {
            store.record_result(&result).expect("memory store never fails");
        }

        let history = store.fetch_history("ada");

        let stamps: Vec<u64> = history.iter().map(|result| result.recorded_at_unix_ms).collect();
        assert_eq!(stamps, vec![3_000, 2_500, 1_000]);
        assert_eq!(store.len(), 4);
        assert!(store.fetch_history("carol").is_empty());
    }

    #[test]
    fn equal_timestamps_list_the_later_record_first() {
        let first = sample_result("ada", RunOutcome::Loss, 5_000);
        let second = sample_result("ada", RunOutcome::Win, 5_000);

        let history = newest_first([&first, &second], "ada");

        assert_eq!(history, vec![second, first]);
    }

    #[test]
    fn summary_counts_outcomes_and_fastest_win() {
        let results = vec![
            sample_result("ada", RunOutcome::Win, 90_000),
            sample_result("ada", RunOutcome::Loss, 10_000),
            sample_result("ada", RunOutcome::Win, 45_000),
        ];
        let summary = HistorySummary::from_results(&results);
        assert_eq!(summary, HistorySummary { wins: 2, losses: 1, fastest_win_seconds: Some(45) });
    }
}
