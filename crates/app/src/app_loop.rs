use macroquad::prelude::KeyCode;
use treasure_core::rng::{GameRng, seeded_rng};
use treasure_core::types::Direction;
use treasure_core::{EndReport, MovementMode, Session};

/// Real-time interval between adversary moves.
pub const ADVERSARY_TICK_MS: u64 = 500;

const INPUT_STREAM_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Playing,
    Finished(EndReport),
}

pub struct AppState {
    pub mode: AppMode,
    pub movement: MovementMode,
    /// Adversary rounds run so far, one per elapsed `ADVERSARY_TICK_MS`.
    pub adversary_ticks: u64,
    input_rng: GameRng,
}

impl AppState {
    /// Random-walk draws come from their own stream so they never disturb the session's.
    pub fn new(seed: u64) -> Self {
        Self {
            mode: AppMode::default(),
            movement: MovementMode::default(),
            adversary_ticks: 0,
            input_rng: seeded_rng(seed ^ INPUT_STREAM_SALT),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.mode, AppMode::Finished(_))
    }

    /// Applies this frame's keys and the clock to `session`. Returns the end report on the
    /// frame the session finishes, and `None` on every other frame.
    pub fn tick(
        &mut self,
        session: &mut Session,
        keys_pressed: &[KeyCode],
        now_ms: u64,
    ) -> Option<EndReport> {
        if self.is_finished() {
            return None;
        }

        if keys_pressed.contains(&KeyCode::R) {
            self.movement = self.movement.toggle();
        }

        if session.tick(now_ms).is_ok() {
            self.apply_moves(session, keys_pressed);
        }

        while !session.state().is_terminal()
            && (self.adversary_ticks + 1) * ADVERSARY_TICK_MS <= now_ms
        {
            if session.advance_adversaries().is_err() {
                break;
            }
            self.adversary_ticks += 1;
        }

        let report = session.end_report()?;
        self.mode = AppMode::Finished(report);
        Some(report)
    }

    fn apply_moves(&mut self, session: &mut Session, keys_pressed: &[KeyCode]) {
        for direction in keys_pressed.iter().filter_map(|&key| direction_for_key(key)) {
            let Some((dx, dy)) = self.movement.resolve(direction, &mut self.input_rng) else {
                continue;
            };
            if session.move_player(dx, dy).is_err() {
                break;
            }
        }
    }
}

pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}
