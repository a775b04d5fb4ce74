//! Difficulty tiers and the single configuration table every component reads from.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Pos;

const MIN_BOARD_SIDE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn config(self) -> TierConfig {
        TierTable::default().get(self)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("unknown difficulty '{raw}' (expected easy, medium or hard)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierConfig {
    pub width: usize,
    pub height: usize,
    pub lives: u32,
    /// Zero means the session has no time limit.
    pub time_limit_ms: u64,
    pub trap_count: usize,
    pub adversary_count: usize,
    pub extra_paths: usize,
}

impl TierConfig {
    pub fn entry(&self) -> Pos {
        Pos { y: 1, x: 1 }
    }

    pub fn exit(&self) -> Pos {
        Pos { y: self.height as i32 - 2, x: self.width as i32 - 2 }
    }

    pub fn has_time_limit(&self) -> bool {
        self.time_limit_ms > 0
    }

    pub fn validate(&self) -> Result<(), TierConfigError> {
        if self.width < MIN_BOARD_SIDE || self.height < MIN_BOARD_SIDE {
            return Err(TierConfigError::BoardTooSmall { width: self.width, height: self.height });
        }
        if self.lives == 0 {
            return Err(TierConfigError::NoLives);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TierConfigError {
    BoardTooSmall { width: usize, height: usize },
    NoLives,
}

impl fmt::Display for TierConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardTooSmall { width, height } => write!(
                f,
                "board {width}x{height} is too small (minimum {MIN_BOARD_SIDE}x{MIN_BOARD_SIDE})"
            ),
            Self::NoLives => write!(f, "a tier must start with at least one life"),
        }
    }
}

impl Error for TierConfigError {}

/// One `TierConfig` per difficulty. Missing tiers fall back to the built-in values when
/// deserialized, so override files only need to name the tiers they change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub easy: TierConfig,
    pub medium: TierConfig,
    pub hard: TierConfig,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: TierConfig {
                width: 10,
                height: 10,
                lives: 5,
                time_limit_ms: 0,
                trap_count: 5,
                adversary_count: 0,
                extra_paths: 3,
            },
            medium: TierConfig {
                width: 15,
                height: 15,
                lives: 3,
                time_limit_ms: 0,
                trap_count: 12,
                adversary_count: 3,
                extra_paths: 5,
            },
            hard: TierConfig {
                width: 20,
                height: 20,
                lives: 2,
                time_limit_ms: 120_000,
                trap_count: 20,
                adversary_count: 6,
                extra_paths: 8,
            },
        }
    }
}

impl TierTable {
    pub fn get(&self, difficulty: Difficulty) -> TierConfig {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn validate(&self) -> Result<(), (Difficulty, TierConfigError)> {
        for difficulty in Difficulty::ALL {
            self.get(difficulty).validate().map_err(|err| (difficulty, err))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_scale_up_with_difficulty() {
        let table = TierTable::default();
        let (easy, medium, hard) = (table.easy, table.medium, table.hard);

        assert!(easy.width < medium.width && medium.width < hard.width);
        assert!(easy.lives > medium.lives && medium.lives > hard.lives);
        assert!(easy.trap_count < medium.trap_count && medium.trap_count < hard.trap_count);
        assert_eq!(easy.adversary_count, 0);
        assert!(medium.adversary_count < hard.adversary_count);
        assert!(!easy.has_time_limit());
        assert!(!medium.has_time_limit());
        assert_eq!(hard.time_limit_ms, 120_000);
    }

    #[test]
    fn hard_tier_exit_sits_inside_the_border() {
        let hard = Difficulty::Hard.config();
        assert_eq!(hard.entry(), Pos { y: 1, x: 1 });
        assert_eq!(hard.exit(), Pos { y: 18, x: 18 });
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        let err = "nightmare".parse::<Difficulty>().expect_err("unknown tier should fail");
        assert!(err.contains("nightmare"));
    }

    #[test]
    fn default_table_is_valid() {
        assert_eq!(TierTable::default().validate(), Ok(()));
    }

    #[test]
    fn undersized_board_is_rejected() {
        let mut table = TierTable::default();
        table.medium.width = 3;
        let (difficulty, err) = table.validate().expect_err("3 wide board must be rejected");
        assert_eq!(difficulty, Difficulty::Medium);
        assert_eq!(err, TierConfigError::BoardTooSmall { width: 3, height: 15 });
    }

    #[test]
    fn partial_json_override_keeps_other_tiers() {
        let json = r#"{"hard":{"width":24,"height":24,"lives":1,"time_limit_ms":90000,
            "trap_count":25,"adversary_count":8,"extra_paths":10}}"#;
        let table: TierTable = serde_json::from_str(json).expect("override should parse");
        assert_eq!(table.hard.width, 24);
        assert_eq!(table.easy, TierTable::default().easy);
    }
}
