//! Tier-table overrides loaded from TOML.
//!
//! Only the tiers named in the file change; every other tier keeps its built-in values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use treasure_core::TierTable;

pub fn load_tier_table(path: &Path) -> Result<TierTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tier file: {}", path.display()))?;
    let table = parse_tier_table(&raw)
        .with_context(|| format!("Invalid tier file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded tier overrides");
    Ok(table)
}

fn parse_tier_table(raw: &str) -> Result<TierTable> {
    let table: TierTable = toml::from_str(raw).context("Failed to deserialize tier TOML")?;
    table.validate().map_err(|(difficulty, err)| anyhow!("{difficulty} tier: {err}"))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use treasure_core::Difficulty;

    use super::*;

    const HARD_OVERRIDE: &str = r#"
[hard]
width = 25
height = 25
lives = 1
time_limit_ms = 90000
trap_count = 30
adversary_count = 8
extra_paths = 10
"#;

    #[test]
    fn override_replaces_only_named_tiers() {
        let table = parse_tier_table(HARD_OVERRIDE).expect("valid override");
        let defaults = TierTable::default();

        assert_eq!(table.get(Difficulty::Hard).width, 25);
        assert_eq!(table.get(Difficulty::Hard).time_limit_ms, 90_000);
        assert_eq!(table.easy, defaults.easy);
        assert_eq!(table.medium, defaults.medium);
    }

    #[test]
    fn empty_file_keeps_defaults() {
        assert_eq!(parse_tier_table("").expect("empty is valid"), TierTable::default());
    }

    #[test]
    fn undersized_board_is_rejected() {
        let raw = HARD_OVERRIDE.replace("width = 25", "width = 3");
        let err = parse_tier_table(&raw).expect_err("3 wide is too small");
        assert!(err.to_string().contains("HARD tier"), "{err}");
    }

    #[test]
    fn tier_missing_a_field_is_rejected() {
        let raw = "[easy]\nwidth = 12\n";
        assert!(parse_tier_table(raw).is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(HARD_OVERRIDE.as_bytes()).expect("write override");

        let table = load_tier_table(file.path()).expect("load override");
        assert_eq!(table.hard.lives, 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_tier_table(Path::new("/nonexistent/tiers.toml")).expect_err("missing");
        assert!(format!("{err:#}").contains("/nonexistent/tiers.toml"));
    }
}
