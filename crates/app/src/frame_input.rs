//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_pressed};

const ACTION_KEYS: [KeyCode; 9] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::R,
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    /// Start a fresh board once the current game has ended.
    pub new_game: bool,
}

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed = ACTION_KEYS.into_iter().filter(|&key| is_key_pressed(key)).collect();
    let new_game = is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::N);

    FrameInput { keys_pressed, new_game }
}
