//! Shared types for the WARCHEST engine.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that valuation, reorder,
//! and trade modules can depend on them without circular references.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What kind of tradeable asset this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Player,
    Pick,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Player => write!(f, "Player"),
            AssetKind::Pick => write!(f, "Pick"),
        }
    }
}

/// On-field position of a player. Picks carry no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Qb,
    #[serde(rename = "RB")]
    Rb,
    #[serde(rename = "WR")]
    Wr,
    #[serde(rename = "TE")]
    Te,
}

impl Position {
    /// All rankable positions (useful for iteration).
    pub const ALL: &'static [Position] =
        &[Position::Qb, Position::Rb, Position::Wr, Position::Te];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Qb => write!(f, "QB"),
            Position::Rb => write!(f, "RB"),
            Position::Wr => write!(f, "WR"),
            Position::Te => write!(f, "TE"),
        }
    }
}

/// Attempt to parse a string into a Position (case-insensitive).
impl std::str::FromStr for Position {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "QB" => Ok(Position::Qb),
            "RB" => Ok(Position::Rb),
            "WR" => Ok(Position::Wr),
            "TE" => Ok(Position::Te),
            _ => Err(anyhow::anyhow!("Unknown position: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// A tradeable asset: a player or a draft pick.
///
/// Inside a [`Ranking`] every asset carries a concrete tier and a dense
/// 1-based rank. Catalog assets entering a trade side may be untiered
/// and unranked; the evaluator treats those fields as absent rather
/// than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Stable identifier, unique within a ranking.
    pub id: String,
    pub name: String,
    pub kind: AssetKind,
    /// Position label for players; `None` for picks.
    #[serde(default)]
    pub position: Option<Position>,
    /// Labeled draft year for picks; `None` for players.
    #[serde(default)]
    pub pick_year: Option<i32>,
    /// Quality bracket, 1 = best. `None` only for untiered catalog assets.
    #[serde(default)]
    pub tier: Option<u8>,
    /// Trade value in first-round-pick equivalents.
    #[serde(default)]
    pub value: f64,
    /// Dense 1-based position within the full ranking.
    #[serde(default)]
    pub rank: Option<u32>,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| self.kind.to_string());
        match self.rank {
            Some(rank) => write!(f, "{rank}. {} ({pos}) {:.2}", self.name, self.value),
            None => write!(f, "{} ({pos}) {:.2}", self.name, self.value),
        }
    }
}

impl Asset {
    /// Build an unranked player asset.
    pub fn player(name: &str, position: Option<Position>) -> Self {
        Asset {
            id: format!("player-{name}"),
            name: name.to_string(),
            kind: AssetKind::Player,
            position,
            pick_year: None,
            tier: None,
            value: 0.0,
            rank: None,
        }
    }

    /// Build an unranked draft pick asset.
    pub fn pick(id: &str, label: &str, year: i32) -> Self {
        Asset {
            id: id.to_string(),
            name: label.to_string(),
            kind: AssetKind::Pick,
            position: None,
            pick_year: Some(year),
            tier: None,
            value: 0.0,
            rank: None,
        }
    }

    /// Whether this asset occupies an active roster spot in the given
    /// calendar year. Players always do; a pick only in its labeled year.
    pub fn is_rosterable(&self, current_year: i32) -> bool {
        match self.kind {
            AssetKind::Player => true,
            AssetKind::Pick => self.pick_year == Some(current_year),
        }
    }

    /// Whether this asset is a quarterback.
    pub fn is_qb(&self) -> bool {
        self.position == Some(Position::Qb)
    }
}

// ---------------------------------------------------------------------------
// Player record (scoring input)
// ---------------------------------------------------------------------------

/// Raw scored player record from the catalog: four 0-10 sub-scores plus
/// an optional market consensus value. Missing fields deserialize to 0
/// and contribute nothing to the weighted score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub age_score: f64,
    #[serde(default)]
    pub production_score: f64,
    #[serde(default)]
    pub projected_score: f64,
    #[serde(default)]
    pub value_score: f64,
    /// Market consensus trade value, used by the outlier report.
    #[serde(default)]
    pub market_value: Option<f64>,
}

impl PlayerRecord {
    /// The asset this record describes, before ranking.
    pub fn to_asset(&self) -> Asset {
        Asset::player(&self.name, self.position)
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// An ordered sequence of assets, best first, ordered by rank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ranking {
    pub assets: Vec<Asset>,
}

impl Ranking {
    pub fn new(assets: Vec<Asset>) -> Self {
        Ranking { assets }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up an asset by id.
    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Repair a ranking loaded from storage: missing tiers fall back to
    /// the catch-all tier, missing values to 0, and ranks are renumbered
    /// from list position.
    pub fn normalize(&mut self, catch_all_tier: u8) {
        for (i, asset) in self.assets.iter_mut().enumerate() {
            if asset.tier.is_none() {
                asset.tier = Some(catch_all_tier);
            }
            if !asset.value.is_finite() {
                asset.value = 0.0;
            }
            asset.rank = Some(i as u32 + 1);
        }
    }
}

impl fmt::Display for Ranking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ranking of {} assets", self.len())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for WARCHEST.
#[derive(Debug, thiserror::Error)]
pub enum WarchestError {
    #[error("Invalid tier table: {0}")]
    InvalidTierTable(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
