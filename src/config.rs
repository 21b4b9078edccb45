//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section and field is optional with sensible defaults, so the
//! tool runs with no config file at all.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::trade::TradeConfig;
use crate::valuation::score::{PositionWeights, ScoringWeights, WeightPreset};
use crate::valuation::tiers::{TierDef, TierTable};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub trade: TradeSettings,
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    /// Optional full tier table override. Omitted: the standard 11-tier
    /// table.
    pub tiers: Option<Vec<TierDef>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Named preset; takes precedence over the explicit weights below.
    pub preset: Option<String>,
    pub weights: ScoringWeights,
    pub position_weights: PositionWeights,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TradeSettings {
    pub margin: f64,
    pub roster_penalty_rate: f64,
    /// Calendar year for pick rosterability; omitted: the current year.
    pub current_year: Option<i32>,
    /// Optional demo trade file evaluated by the binary after ranking.
    pub trades_path: Option<String>,
}

impl Default for TradeSettings {
    fn default() -> Self {
        let d = TradeConfig::default();
        Self {
            margin: d.margin,
            roster_penalty_rate: d.roster_penalty_rate,
            current_year: None,
            trades_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file of scored player records.
    pub players_path: Option<String>,
    /// Base year for the generated pick board; omitted: the current year.
    pub base_year: Option<i32>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: String,
    pub user_id: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: "data/rankings".to_string(),
            user_id: "local".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does
    /// not exist. A present-but-broken file is still an error.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(AppConfig::default())
        }
    }

    /// Resolve the effective scoring weights: preset if named, explicit
    /// weights otherwise.
    pub fn resolve_weights(&self) -> Result<(ScoringWeights, PositionWeights)> {
        match &self.scoring.preset {
            Some(name) => {
                let preset: WeightPreset = name.parse()?;
                Ok(preset.weights())
            }
            None => Ok((self.scoring.weights, self.scoring.position_weights)),
        }
    }

    /// Build and validate the effective tier table.
    pub fn tier_table(&self) -> Result<TierTable> {
        let table = match &self.tiers {
            Some(defs) => TierTable::new(defs.clone()),
            None => TierTable::default(),
        };
        table.validate().context("Tier table failed validation")?;
        Ok(table)
    }

    /// The evaluator settings this config describes.
    pub fn trade_config(&self) -> TradeConfig {
        let defaults = TradeConfig::default();
        TradeConfig {
            margin: self.trade.margin,
            roster_penalty_rate: self.trade.roster_penalty_rate,
            current_year: self.trade.current_year.unwrap_or(defaults.current_year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = AppConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(cfg.trade.margin, 0.075);
        assert_eq!(cfg.trade.roster_penalty_rate, 0.05);
        assert_eq!(cfg.storage.user_id, "local");
        assert!(cfg.tiers.is_none());
        assert!(cfg.tier_table().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [scoring]
            preset = "contender"

            [trade]
            margin = 0.1
            roster_penalty_rate = 0.04
            current_year = 2026

            [catalog]
            players_path = "demos/players.json"
            base_year = 2026

            [storage]
            dir = "data/rankings"
            user_id = "tester"
        "#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.trade.margin, 0.1);
        assert_eq!(cfg.trade_config().current_year, 2026);
        assert_eq!(cfg.storage.user_id, "tester");

        let (weights, _) = cfg.resolve_weights().unwrap();
        let (expected, _) = WeightPreset::Contender.weights();
        assert_eq!(weights, expected);
    }

    #[test]
    fn test_explicit_weights_without_preset() {
        let toml_str = r#"
            [scoring.weights]
            age_weight = 0.9
            production_weight = 0.1
            projected_weight = 0.2
            value_weight = 0.3

            [scoring.position_weights]
            qb = 1.0
            rb = 0.5
            wr = 0.5
            te = 0.5
        "#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        let (weights, positions) = cfg.resolve_weights().unwrap();
        assert_eq!(weights.age_weight, 0.9);
        assert_eq!(positions.qb, 1.0);
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let cfg: AppConfig = toml::from_str("[scoring]\npreset = \"galaxy_brain\"\n").unwrap();
        assert!(cfg.resolve_weights().is_err());
    }

    #[test]
    fn test_custom_tier_table_validated() {
        let toml_str = r#"
            [[tiers]]
            tier = 1
            min_rank = 1
            max_rank = 10
            min_value = 2.0
            max_value = 3.0

            [[tiers]]
            tier = 2
            min_rank = 11
            max_rank = 9999
            min_value = 0.0
            max_value = 1.9
        "#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        let table = cfg.tier_table().unwrap();
        assert_eq!(table.catch_all_tier(), 2);
    }

    #[test]
    fn test_invalid_custom_tier_table_rejected() {
        // Rank gap between the two tiers
        let toml_str = r#"
            [[tiers]]
            tier = 1
            min_rank = 1
            max_rank = 10
            min_value = 2.0
            max_value = 3.0

            [[tiers]]
            tier = 2
            min_rank = 20
            max_rank = 9999
            min_value = 0.0
            max_value = 1.9
        "#;
        let cfg: AppConfig = toml::from_str(toml_str).unwrap();
        assert!(cfg.tier_table().is_err());
    }
}
