//! Text formatting for the status bar, side panels, recap, and event log entries.

use treasure_app::app_loop::AppMode;
use treasure_app::{format_clock, format_seed, format_snapshot_hash, reason_code, state_label};
use treasure_core::{
    BoardSnapshot, Difficulty, EndReport, GameResult, HistorySummary, MovementMode, SessionEvent,
};

pub fn status_text(mode: &AppMode, movement: MovementMode) -> String {
    match mode {
        AppMode::Playing if movement.is_random() => {
            "RANDOM WALK: every key press moves one random step (R to steer again)".to_string()
        }
        AppMode::Playing => {
            "Find the treasure ($). Arrows/WASD move, R toggles random walk".to_string()
        }
        AppMode::Finished(report) => {
            format!("Finished: {} (Enter for a new board)", reason_code(report.outcome))
        }
    }
}

pub fn stats_panel_lines(
    snapshot: &BoardSnapshot,
    difficulty: Difficulty,
    run_seed: u64,
    movement: MovementMode,
) -> Vec<String> {
    let triggered = snapshot.traps.iter().filter(|trap| trap.triggered).count();
    let clock = if snapshot.time_limit_ms > 0 {
        let remaining = snapshot.time_limit_ms.saturating_sub(snapshot.elapsed_ms);
        format!("Time left: {}", format_clock(remaining))
    } else {
        format!("Time: {}", format_clock(snapshot.elapsed_ms))
    };

    vec![
        format!("Difficulty: {difficulty}"),
        format!("Seed: {}", format_seed(run_seed)),
        format!("Lives: {}", snapshot.lives),
        clock,
        format!("Traps sprung: {triggered}/{}", snapshot.traps.len()),
        format!("Adversaries: {}", snapshot.adversaries.len()),
        format!("Movement: {}", if movement.is_random() { "random walk" } else { "directional" }),
        format!("State: {}", state_label(snapshot.state)),
    ]
}

pub fn controls_lines() -> Vec<String> {
    [
        "Controls:",
        "Arrows/WASD  move",
        "R            random walk",
        "Enter/N      new board",
        "@ you  $ treasure",
        "^ trap  x sprung  E adversary",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

pub fn history_lines(player: &str, results: &[GameResult], limit: usize) -> Vec<String> {
    let summary = HistorySummary::from_results(results);
    let fastest = summary
        .fastest_win_seconds
        .map_or_else(|| "-".to_string(), |seconds| format_clock(seconds * 1000));
    let mut lines = vec![
        format!("History for {player}:"),
        format!("{} wins / {} losses, fastest win {fastest}", summary.wins, summary.losses),
    ];
    if results.is_empty() {
        lines.push("No finished games yet".to_string());
    }
    for result in results.iter().take(limit) {
        lines.push(format!(
            "{:<4} {:<6} {}",
            result.outcome.code(),
            result.difficulty.label(),
            format_clock(result.elapsed_seconds * 1000)
        ));
    }
    lines
}

pub fn finished_recap_lines(report: &EndReport, run_seed: u64, snapshot_hash: u64) -> Vec<String> {
    vec![
        "Game recap:".to_string(),
        format!("Reason: {}", reason_code(report.outcome)),
        format!("Difficulty: {}", report.difficulty),
        format!("Time: {}", format_clock(report.elapsed_ms)),
        format!("Seed: {}", format_seed(run_seed)),
        format!("Snapshot: {}", format_snapshot_hash(snapshot_hash)),
    ]
}

pub fn event_log_line(event: &SessionEvent) -> String {
    match event {
        SessionEvent::GoalReached { .. } => "Treasure found!".to_string(),
        SessionEvent::TrapTriggered { pos, lives_left, .. } => {
            format!("Trap at ({}, {}) sprung, {lives_left} lives left", pos.x, pos.y)
        }
        SessionEvent::AdversaryContact { pos, lives_left, .. } => {
            format!("Caught by adversary at ({}, {}), {lives_left} lives left", pos.x, pos.y)
        }
        SessionEvent::LivesExhausted => "No lives left".to_string(),
        SessionEvent::TimeExpired { time_limit_ms, .. } => {
            format!("Time is up ({} limit)", format_clock(*time_limit_ms))
        }
    }
}
