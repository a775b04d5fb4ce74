use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::tiers::Difficulty;

new_key_type! {
    pub struct TrapId;
    pub struct AdversaryId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Pos { y: self.y + dy, x: self.x + dx }
    }

    /// Distance in the 8-neighborhood metric: diagonal neighbors are at distance 1.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(dx, dy)` with y growing downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Running,
    Won,
    Lost,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Running)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Win,
    Loss,
}

impl RunOutcome {
    pub fn code(self) -> &'static str {
        match self {
            RunOutcome::Win => "WIN",
            RunOutcome::Loss => "LOSS",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    GoalReached { pos: Pos },
    TrapTriggered { trap: TrapId, pos: Pos, lives_left: u32 },
    AdversaryContact { adversary: AdversaryId, pos: Pos, lives_left: u32 },
    LivesExhausted,
    TimeExpired { elapsed_ms: u64, time_limit_ms: u64 },
}

/// Result of one `move_player` call, consumed by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub player: Pos,
    pub lives: u32,
    pub state: SessionState,
    pub events: Vec<SessionEvent>,
}

/// Reported once a session reaches `Won` or `Lost`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndReport {
    pub outcome: RunOutcome,
    pub elapsed_ms: u64,
    pub difficulty: Difficulty,
}

impl EndReport {
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms / 1000
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameError {
    /// A grid mutation addressed a cell outside the board.
    OutOfRange { pos: Pos },
    /// The session already reached `Won` or `Lost`.
    InvalidTransition { state: SessionState },
    /// Placement could not satisfy every constraint within its attempt budget.
    GenerationExhausted { placed: usize, requested: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { pos } => {
                write!(f, "position ({}, {}) is outside the grid", pos.x, pos.y)
            }
            Self::InvalidTransition { state } => {
                write!(f, "session already ended in state {state:?}")
            }
            Self::GenerationExhausted { placed, requested } => {
                write!(f, "placement exhausted its attempt budget after {placed} of {requested}")
            }
        }
    }
}

impl Error for GameError {}
