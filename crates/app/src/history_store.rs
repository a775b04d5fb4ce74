//! Where the desktop app records finished games.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use treasure_core::{GameResult, HistoryFile, MemoryResultStore, ResultStore};

pub const HISTORY_FILE_NAME: &str = "results_history.jsonl";

pub fn default_history_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "TreasureHunt").map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push(HISTORY_FILE_NAME);
        path
    })
}

pub fn unix_millis_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis() as u64)
}

/// File-backed history, or an in-memory one when no usable file is available.
pub enum AppHistory {
    File(HistoryFile),
    Memory(MemoryResultStore),
}

impl AppHistory {
    pub fn open(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::warn!("no data directory available; results will not be saved");
            return Self::Memory(MemoryResultStore::new());
        };
        match HistoryFile::open(path) {
            Ok(file) => Self::File(file),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "history unavailable; using memory");
                Self::Memory(MemoryResultStore::new())
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn record(&mut self, result: &GameResult) {
        match self {
            Self::File(file) => {
                if let Err(err) = file.record_result(result) {
                    tracing::warn!(%err, "failed to record game result");
                }
            }
            Self::Memory(memory) => {
                let Ok(()) = memory.record_result(result);
            }
        }
    }

    pub fn fetch(&self, player: &str) -> Vec<GameResult> {
        match self {
            Self::File(file) => file.fetch_history(player),
            Self::Memory(memory) => memory.fetch_history(player),
        }
    }
}
