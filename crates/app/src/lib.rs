pub mod app_loop;
pub mod history_store;
pub mod launch;
pub mod seed;

use treasure_core::{RunOutcome, SessionState};

pub const APP_NAME: &str = "Treasure Hunt";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// `m:ss`, used for the clock and the recap.
pub fn format_clock(elapsed_ms: u64) -> String {
    let total_seconds = elapsed_ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn reason_code(outcome: RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Win => "WIN_TREASURE",
        RunOutcome::Loss => "LOSS",
    }
}

pub fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Running => "Running",
        SessionState::Won => "Won",
        SessionState::Lost => "Lost",
    }
}
