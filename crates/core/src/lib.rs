pub mod grid;
pub mod history;
pub mod history_file;
pub mod intent;
pub mod mapgen;
pub mod pathfinding;
pub mod rng;
pub mod session;
pub mod tiers;
pub mod types;

pub use grid::Grid;
pub use history::{GameResult, HistorySummary, MemoryResultStore, ResultStore};
pub use history_file::{HistoryFile, HistoryLoadError};
pub use intent::MovementMode;
pub use mapgen::{BoardGenerator, GeneratedBoard, generate_board};
pub use session::{BoardSnapshot, Session};
pub use tiers::{Difficulty, TierConfig, TierConfigError, TierTable};
pub use types::*;
