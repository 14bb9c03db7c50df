use super::error::LotteryError;
use super::table::{TableEntry, WeightTable};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_POOL_SIZE: usize = 1000;
pub const DEFAULT_TOP_PICKS: usize = 4;
pub const DEFAULT_EXPECTED_TOTAL: f64 = 100.0;

/// How the lottery winners are pulled out of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
pub enum DrawStrategy {
    /// Draw a ticket uniformly from the whole pool, throwing away repeats of earlier winners.
    #[default]
    Rejection,
    /// Draw among remaining participants in proportion to their tickets, removing each winner.
    WeightRemoval,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LotteryConfig {
    /// Total number of tickets in the pool.
    pub pool_size: usize,
    /// Number of positions decided by the draw.
    pub top_picks: usize,
    /// What the weights must add up to, if anything.
    pub expected_total: Option<f64>,
    pub strategy: DrawStrategy,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        LotteryConfig {
            pool_size: DEFAULT_POOL_SIZE,
            top_picks: DEFAULT_TOP_PICKS,
            expected_total: Some(DEFAULT_EXPECTED_TOTAL),
            strategy: DrawStrategy::default(),
        }
    }
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_top_picks() -> usize {
    DEFAULT_TOP_PICKS
}

fn default_expected_total() -> Option<f64> {
    Some(DEFAULT_EXPECTED_TOTAL)
}

/// Contents of a lottery settings file.
#[derive(Debug, Deserialize)]
pub struct LotterySettings {
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    #[serde(default = "default_top_picks")]
    pub top_picks: usize,
    #[serde(default = "default_expected_total")]
    pub expected_total: Option<f64>,
    #[serde(default)]
    pub strategy: DrawStrategy,
    pub participants: Vec<TableEntry>,
}

impl LotterySettings {
    pub fn from_json(json: &str) -> Result<LotterySettings, LotteryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<LotterySettings, LotteryError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| LotteryError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        LotterySettings::from_json(&contents)
    }

    /// Validates the table and splits the settings into the table and the draw configuration.
    pub fn into_parts(self) -> Result<(WeightTable, LotteryConfig), LotteryError> {
        let table = WeightTable::from_entries(self.participants)?;
        let config = LotteryConfig {
            pool_size: self.pool_size,
            top_picks: self.top_picks,
            expected_total: self.expected_total,
            strategy: self.strategy,
        };
        Ok((table, config))
    }
}

/// Reads the settings file at `path`, or falls back to the NBA table with default settings.
pub fn load_or_default(
    path: Option<&Path>,
) -> Result<(WeightTable, LotteryConfig), LotteryError> {
    match path {
        Some(path) => LotterySettings::from_file(path)?.into_parts(),
        None => Ok((WeightTable::nba_default(), LotteryConfig::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let settings = LotterySettings::from_json(
            r#"{"participants": [{"name": "A", "weight": 60.0}, {"name": "B", "weight": 40.0}]}"#,
        )
        .unwrap();
        let (table, config) = settings.into_parts().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(config, LotteryConfig::default());
    }

    #[test]
    fn test_overrides() {
        let settings = LotterySettings::from_json(
            r#"{
                "pool_size": 100,
                "top_picks": 1,
                "expected_total": null,
                "strategy": "WeightRemoval",
                "participants": [{"name": "A", "weight": 3.0}]
            }"#,
        )
        .unwrap();
        let (_, config) = settings.into_parts().unwrap();
        assert_eq!(config.pool_size, 100);
        assert_eq!(config.top_picks, 1);
        assert_eq!(config.expected_total, None);
        assert_eq!(config.strategy, DrawStrategy::WeightRemoval);
    }

    #[test]
    fn test_bad_json() {
        let err = LotterySettings::from_json(r#"{"pool_size": 10}"#).unwrap_err();
        assert!(matches!(err, LotteryError::ParseSettings(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = LotterySettings::from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LotteryError::ReadSettings { .. }));
    }

    #[test]
    fn test_load_default_table() {
        let (table, config) = load_or_default(None).unwrap();
        assert_eq!(table, WeightTable::nba_default());
        assert_eq!(config.pool_size, 1000);
        assert_eq!(config.top_picks, 4);
    }

    #[test]
    fn test_invalid_table_surfaces() {
        let settings = LotterySettings::from_json(
            r#"{"participants": [{"name": "A", "weight": 60.0}, {"name": "A", "weight": 40.0}]}"#,
        )
        .unwrap();
        assert!(matches!(
            settings.into_parts(),
            Err(LotteryError::DuplicateParticipant(_))
        ));
    }
}
