//! Tier table and value interpolation.
//!
//! A tier covers a contiguous rank range and maps it onto a continuous
//! value range. Ranks interpolate linearly across the tier's span, so an
//! ordinal ranking turns into smooth trade values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::WarchestError;

/// Tier id of the default table's catch-all bottom bracket.
pub const CATCH_ALL_TIER: u8 = 11;

// ---------------------------------------------------------------------------
// Tier definition
// ---------------------------------------------------------------------------

/// One tier: a rank range mapped to a value range. Tier 1 is best.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierDef {
    pub tier: u8,
    pub min_rank: u32,
    pub max_rank: u32,
    pub min_value: f64,
    pub max_value: f64,
}

impl fmt::Display for TierDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tier {} (ranks {}-{}, values {:.2}-{:.2})",
            self.tier, self.min_rank, self.max_rank, self.min_value, self.max_value,
        )
    }
}

impl TierDef {
    /// Number of rank slots this tier covers.
    pub fn span(&self) -> u32 {
        self.max_rank - self.min_rank + 1
    }

    /// Whether a rank falls inside this tier's range.
    pub fn contains(&self, rank: u32) -> bool {
        rank >= self.min_rank && rank <= self.max_rank
    }

    /// Midpoint of the tier's value range.
    pub fn midpoint(&self) -> f64 {
        (self.min_value + self.max_value) / 2.0
    }

    /// Linearly interpolate a value for a rank inside this tier.
    ///
    /// The first rank of the tier maps to `max_value`; each later slot
    /// steps down by `1/span` of the value range, so the last slot stays
    /// strictly above `min_value` (the offset never reaches the span).
    pub fn interpolate(&self, rank: u32) -> f64 {
        let span = self.span() as f64;
        let offset = rank.saturating_sub(self.min_rank) as f64;
        self.max_value - (offset / span) * (self.max_value - self.min_value)
    }

    /// Interpolate for a rank that may fall outside the tier's configured
    /// range: the offset is clamped to the span so the result stays inside
    /// the tier's value range. Used when a manual tier override pins an
    /// asset to a tier its global rank no longer matches.
    pub fn interpolate_clamped(&self, rank: u32) -> f64 {
        let clamped = rank.clamp(self.min_rank, self.max_rank);
        self.interpolate(clamped)
    }
}

// ---------------------------------------------------------------------------
// Tier table
// ---------------------------------------------------------------------------

/// Ordered collection of tier definitions.
///
/// Rank ranges may intentionally overlap by one slot at some boundaries;
/// lookup is first-match scanning tier ids in ascending order, so the
/// lowest tier id wins.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: Vec<TierDef>,
}

impl TierTable {
    /// Build a table from definitions, sorted by ascending tier id.
    pub fn new(mut tiers: Vec<TierDef>) -> Self {
        tiers.sort_by_key(|t| t.tier);
        TierTable { tiers }
    }

    pub fn tiers(&self) -> &[TierDef] {
        &self.tiers
    }

    /// First tier whose rank range contains the given rank.
    pub fn tier_for_rank(&self, rank: u32) -> Option<&TierDef> {
        self.tiers.iter().find(|t| t.contains(rank))
    }

    /// Definition for a specific tier id.
    pub fn def(&self, tier: u8) -> Option<&TierDef> {
        self.tiers.iter().find(|t| t.tier == tier)
    }

    /// Best (lowest) tier id in the table.
    pub fn min_tier(&self) -> u8 {
        self.tiers.first().map(|t| t.tier).unwrap_or(1)
    }

    /// The reserved lowest bracket: ranks beyond every configured range
    /// fall into this tier with value 0.
    pub fn catch_all_tier(&self) -> u8 {
        self.tiers.last().map(|t| t.tier).unwrap_or(CATCH_ALL_TIER)
    }

    /// Resolve a rank to (tier id, interpolated value), falling back to
    /// the catch-all tier with value 0 when no range matches.
    pub fn value_for_rank(&self, rank: u32) -> (u8, f64) {
        match self.tier_for_rank(rank) {
            Some(def) => (def.tier, def.interpolate(rank)),
            None => (self.catch_all_tier(), 0.0),
        }
    }

    /// Check structural invariants of a (possibly user-supplied) table:
    /// non-empty, per-tier ranges well-formed, rank coverage contiguous
    /// (one-slot overlaps allowed, gaps rejected), and value ranges
    /// decreasing as tier ids increase.
    pub fn validate(&self) -> Result<(), WarchestError> {
        if self.tiers.is_empty() {
            return Err(WarchestError::InvalidTierTable("no tiers defined".to_string()));
        }

        for t in &self.tiers {
            if t.min_rank > t.max_rank {
                return Err(WarchestError::InvalidTierTable(format!(
                    "tier {} rank range inverted ({}-{})",
                    t.tier, t.min_rank, t.max_rank,
                )));
            }
            if t.min_value > t.max_value {
                return Err(WarchestError::InvalidTierTable(format!(
                    "tier {} value range inverted ({}-{})",
                    t.tier, t.min_value, t.max_value,
                )));
            }
        }

        for pair in self.tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.tier == next.tier {
                return Err(WarchestError::InvalidTierTable(format!(
                    "duplicate tier id {}",
                    prev.tier,
                )));
            }
            if next.min_rank > prev.max_rank + 1 {
                return Err(WarchestError::InvalidTierTable(format!(
                    "rank gap between tier {} (ends {}) and tier {} (starts {})",
                    prev.tier, prev.max_rank, next.tier, next.min_rank,
                )));
            }
            if next.max_value >= prev.max_value || next.min_value > prev.min_value {
                return Err(WarchestError::InvalidTierTable(format!(
                    "value ranges do not decrease from tier {} to tier {}",
                    prev.tier, next.tier,
                )));
            }
        }

        Ok(())
    }
}

/// The standard 11-tier configuration: rank boundaries and value ranges
/// carried over from the published consensus table, including its
/// intentional one-rank overlaps at some boundaries.
impl Default for TierTable {
    fn default() -> Self {
        let def = |tier, min_rank, max_rank, min_value, max_value| TierDef {
            tier,
            min_rank,
            max_rank,
            min_value,
            max_value,
        };
        TierTable::new(vec![
            def(1, 1, 3, 4.1, 4.5),
            def(2, 2, 9, 3.3, 4.0),
            def(3, 8, 23, 2.67, 3.33),
            def(4, 23, 35, 2.17, 2.66),
            def(5, 36, 50, 1.67, 2.16),
            def(6, 51, 72, 1.34, 1.66),
            def(7, 73, 84, 1.0, 1.33),
            def(8, 84, 100, 0.67, 0.99),
            def(9, 101, 125, 0.33, 0.66),
            def(10, 125, 160, 0.1, 0.32),
            def(11, 161, 9999, 0.0, 0.1),
        ])
    }
}

// ---------------------------------------------------------------------------
// Tier labels
// ---------------------------------------------------------------------------

/// Display label for a tier id ("Prometheus", "Cornerstones", ...).
pub fn tier_label(tier: u8) -> String {
    match tier {
        1 => "Prometheus".to_string(),
        2 => "Franchise Altering".to_string(),
        3 => "Cornerstones".to_string(),
        4 => "Portfolio Pillars".to_string(),
        5 => "Hopeful Elites".to_string(),
        6 => "Kind of Exciting".to_string(),
        7 => "Solid Pieces".to_string(),
        8 => "Bridge Players".to_string(),
        9 => "Rentals".to_string(),
        10 => "Bench Fodder".to_string(),
        11 => "Roster Cloggers".to_string(),
        other => format!("Tier {other}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_first_rank_is_max_value() {
        let table = TierTable::default();
        for def in table.tiers() {
            assert!(
                (def.interpolate(def.min_rank) - def.max_value).abs() < 1e-10,
                "tier {} first rank should map to max value",
                def.tier,
            );
        }
    }

    #[test]
    fn test_interpolate_monotonically_non_increasing() {
        let table = TierTable::default();
        for def in table.tiers() {
            // Bound the catch-all tier's huge span
            let last = def.max_rank.min(def.min_rank + 200);
            let mut prev = f64::INFINITY;
            for rank in def.min_rank..=last {
                let v = def.interpolate(rank);
                assert!(v <= prev, "tier {} value rose at rank {rank}", def.tier);
                prev = v;
            }
        }
    }

    #[test]
    fn test_interpolate_stays_above_min_value() {
        // Last slot approaches but never reaches min_value
        let def = TierDef {
            tier: 5,
            min_rank: 36,
            max_rank: 50,
            min_value: 1.67,
            max_value: 2.16,
        };
        let last = def.interpolate(50);
        assert!(last > def.min_value);
        // offset 14 of span 15
        assert!((last - (2.16 - (14.0 / 15.0) * 0.49)).abs() < 1e-10);
    }

    #[test]
    fn test_interpolate_exact_values_tier_one() {
        let table = TierTable::default();
        let t1 = table.def(1).unwrap();
        assert!((t1.interpolate(1) - 4.5).abs() < 1e-10);
        assert!((t1.interpolate(2) - (4.5 - (1.0 / 3.0) * 0.4)).abs() < 1e-10);
        assert!((t1.interpolate(3) - (4.5 - (2.0 / 3.0) * 0.4)).abs() < 1e-10);
    }

    #[test]
    fn test_interpolate_clamped_outside_range() {
        let t2 = *TierTable::default().def(2).unwrap();
        // Below the range: pinned to the top of the tier
        assert!((t2.interpolate_clamped(1) - t2.max_value).abs() < 1e-10);
        // Far beyond the range: pinned to the last slot, still above min
        let v = t2.interpolate_clamped(500);
        assert!((v - t2.interpolate(t2.max_rank)).abs() < 1e-10);
        assert!(v > t2.min_value);
    }

    #[test]
    fn test_overlap_resolves_to_lowest_tier_id() {
        let table = TierTable::default();
        // Tier 1 spans 1-3 and tier 2 spans 2-9: first match wins
        assert_eq!(table.tier_for_rank(2).unwrap().tier, 1);
        // Tier 2 spans 2-9 and tier 3 spans 8-23
        assert_eq!(table.tier_for_rank(8).unwrap().tier, 2);
        // Tier 3 spans 8-23 and tier 4 spans 23-35
        assert_eq!(table.tier_for_rank(23).unwrap().tier, 3);
    }

    #[test]
    fn test_rank_beyond_all_tiers_falls_back_to_catch_all() {
        let table = TierTable::default();
        let (tier, value) = table.value_for_rank(10_000);
        assert_eq!(tier, CATCH_ALL_TIER);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn test_catch_all_is_highest_tier_id() {
        let table = TierTable::default();
        assert_eq!(table.catch_all_tier(), 11);
        assert_eq!(table.min_tier(), 1);
    }

    #[test]
    fn test_midpoints_match_published_table() {
        let table = TierTable::default();
        let expect = [
            (2, 3.65),
            (3, 3.0),
            (4, 2.415),
            (5, 1.915),
            (6, 1.5),
            (7, 1.165),
            (8, 0.83),
            (9, 0.495),
            (10, 0.21),
            (11, 0.05),
        ];
        for (tier, mid) in expect {
            assert!(
                (table.def(tier).unwrap().midpoint() - mid).abs() < 1e-10,
                "tier {tier} midpoint",
            );
        }
    }

    #[test]
    fn test_default_table_validates() {
        assert!(TierTable::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        assert!(TierTable::new(vec![]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_rank_gap() {
        let table = TierTable::new(vec![
            TierDef { tier: 1, min_rank: 1, max_rank: 3, min_value: 4.0, max_value: 4.5 },
            // Starts at 5, leaving rank 4 uncovered
            TierDef { tier: 2, min_rank: 5, max_rank: 9, min_value: 3.0, max_value: 3.9 },
        ]);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_decreasing_values() {
        let table = TierTable::new(vec![
            TierDef { tier: 1, min_rank: 1, max_rank: 3, min_value: 4.0, max_value: 4.5 },
            TierDef { tier: 2, min_rank: 4, max_rank: 9, min_value: 4.1, max_value: 4.6 },
        ]);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let table = TierTable::new(vec![TierDef {
            tier: 1,
            min_rank: 10,
            max_rank: 3,
            min_value: 4.0,
            max_value: 4.5,
        }]);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_tier_label() {
        assert_eq!(tier_label(1), "Prometheus");
        assert_eq!(tier_label(11), "Roster Cloggers");
        assert_eq!(tier_label(42), "Tier 42");
    }
}
