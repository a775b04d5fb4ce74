//! Rendering for the main game frame and UI panels.

use crate::game_layout::{FrameLayout, PanelRect};
use crate::ui_text::{
    controls_lines, event_log_line, finished_recap_lines, history_lines, stats_panel_lines,
    status_text,
};
use macroquad::prelude::*;
use treasure_app::app_loop::{AppMode, AppState};
use treasure_core::{BoardSnapshot, GameResult, Pos, Session};

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const LINE_HEIGHT: f32 = 18.0;
const PANEL_FONT_SIZE: f32 = 16.0;
const PANEL_LINE_STEP: f32 = 16.0;
const HISTORY_ROWS: usize = 6;
const EVENT_LOG_ROWS: usize = 20;

pub struct FrameContext<'a> {
    pub session: &'a Session,
    pub app_state: &'a AppState,
    pub player: &'a str,
    pub history: &'a [GameResult],
    pub run_seed: u64,
}

pub fn draw_frame(frame: &FrameContext<'_>, layout: &FrameLayout) {
    let snapshot = frame.session.snapshot();

    for panel in layout.panels() {
        draw_rectangle_lines(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            BORDER_THICKNESS,
            BORDER_COLOR,
        );
    }
    draw_board(&snapshot, layout.board);
    draw_event_log(frame.session, layout.event_log);
    draw_text(
        &status_text(&frame.app_state.mode, frame.app_state.movement),
        layout.status.x + PANEL_PAD_X,
        layout.status.y + PANEL_PAD_Y,
        20.0,
        WHITE,
    );
    draw_stats_panel(frame, &snapshot, layout.stats);
    draw_lines(&controls_lines(), layout.controls, LIGHTGRAY);
    draw_lines(
        &history_lines(frame.player, frame.history, HISTORY_ROWS),
        layout.history,
        LIGHTGRAY,
    );
}

fn draw_stats_panel(frame: &FrameContext<'_>, snapshot: &BoardSnapshot, panel: PanelRect) {
    if let AppMode::Finished(report) = &frame.app_state.mode {
        let recap = finished_recap_lines(report, frame.run_seed, frame.session.snapshot_hash());
        draw_lines(&recap, panel, YELLOW);
        return;
    }

    let lines = stats_panel_lines(
        snapshot,
        frame.session.difficulty(),
        frame.run_seed,
        frame.app_state.movement,
    );
    draw_lines(&lines, panel, WHITE);
}

fn draw_lines(lines: &[String], panel: PanelRect, color: Color) {
    let text_x = panel.x + PANEL_PAD_X;
    let mut text_y = panel.y + PANEL_PAD_Y;
    for line in fit_lines_to_panel(lines, panel.height, PANEL_LINE_STEP, PANEL_PAD_Y) {
        draw_text(&line, text_x, text_y, PANEL_FONT_SIZE, color);
        text_y += PANEL_LINE_STEP;
    }
}

fn fit_lines_to_panel(
    lines: &[String],
    panel_height: f32,
    line_step: f32,
    panel_pad_y: f32,
) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }

    let usable_height = (panel_height - panel_pad_y).max(0.0);
    let max_lines = (usable_height / line_step).floor() as usize;
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    if max_lines == 1 {
        return vec![format!("... and {} more", lines.len())];
    }

    let hidden_count = lines.len() - (max_lines - 1);
    let mut fitted_lines = lines[..max_lines - 1].to_vec();
    fitted_lines.push(format!("... and {hidden_count} more"));
    fitted_lines
}

/// Largest square cell that fits the whole board inside `panel`.
fn cell_size(snapshot: &BoardSnapshot, panel: PanelRect) -> f32 {
    let usable_width = (panel.width - 2.0 * PANEL_PAD_X).max(0.0);
    let usable_height = (panel.height - 2.0 * PANEL_PAD_X).max(0.0);
    let columns = snapshot.width.max(1) as f32;
    let rows = snapshot.height.max(1) as f32;
    (usable_width / columns).min(usable_height / rows).floor()
}

fn draw_board(snapshot: &BoardSnapshot, panel: PanelRect) {
    let size = cell_size(snapshot, panel);
    if size < 1.0 {
        return;
    }

    for y in 0..snapshot.height {
        for x in 0..snapshot.width {
            let glyph = snapshot.glyph_at(Pos { y: y as i32, x: x as i32 });
            let (label, fill, ink) = cell_style(glyph);
            let cell_x = panel.x + PANEL_PAD_X + x as f32 * size;
            let cell_y = panel.y + PANEL_PAD_X + y as f32 * size;

            draw_rectangle(cell_x, cell_y, size, size, fill);
            if !label.is_empty() {
                draw_text(label, cell_x + size * 0.25, cell_y + size * 0.8, size, ink);
            }
        }
    }
}

/// Label, background and text color for one board glyph.
fn cell_style(glyph: char) -> (&'static str, Color, Color) {
    match glyph {
        '#' => ("", DARKGRAY, DARKGRAY),
        '@' => ("@", BLACK, GREEN),
        '$' => ("$", BLACK, GOLD),
        '^' => ("^", BLACK, ORANGE),
        'x' => ("x", BLACK, GRAY),
        'E' => ("E", BLACK, RED),
        _ => ("", BLACK, BLACK),
    }
}

fn draw_event_log(session: &Session, panel: PanelRect) {
    draw_text("Event log", panel.x + PANEL_PAD_X, panel.y + 20.0, 24.0, YELLOW);
    let events = session.log();
    let start = events.len().saturating_sub(EVENT_LOG_ROWS);

    for (index, event) in events[start..].iter().enumerate() {
        draw_text(
            &event_log_line(event),
            panel.x + PANEL_PAD_X,
            panel.y + 20.0 + (index as f32 + 1.0) * LINE_HEIGHT,
            PANEL_FONT_SIZE,
            LIGHTGRAY,
        );
    }
}
