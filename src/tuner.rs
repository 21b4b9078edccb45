//! Tier tuning wizard core.
//!
//! Walks a ranking one asset at a time and lets the user nudge each
//! asset up or down the tier ladder. The adjustment itself is a pure
//! function over one asset; the wizard session is a plain cursor with
//! seen/choice bookkeeping layered on top, so callers can skip, resume,
//! or abandon without touching the engine.

use tracing::debug;

use crate::types::{Asset, Ranking};
use crate::valuation::tiers::TierTable;
use crate::valuation::{self, BuildOptions};

// ---------------------------------------------------------------------------
// Adjustment
// ---------------------------------------------------------------------------

/// The five verdicts a user can give on one asset's current tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunerChoice {
    /// Worth much less: drop two tiers.
    MuchLower,
    /// Worth less: drop one tier.
    Lower,
    /// No change.
    AboutRight,
    /// Worth more: climb one tier.
    Higher,
    /// Worth much more: climb two tiers.
    MuchHigher,
}

impl Default for TunerChoice {
    fn default() -> Self {
        TunerChoice::AboutRight
    }
}

impl TunerChoice {
    /// Signed tier-id delta. Positive moves toward worse tiers since
    /// tier 1 is best.
    pub fn tier_delta(&self) -> i16 {
        match self {
            TunerChoice::MuchLower => 2,
            TunerChoice::Lower => 1,
            TunerChoice::AboutRight => 0,
            TunerChoice::Higher => -1,
            TunerChoice::MuchHigher => -2,
        }
    }
}

/// Apply a tuning choice to one asset: shift its tier by the choice's
/// delta, clamped to the table's tier range, and snap its value to the
/// destination tier's midpoint.
pub fn apply_adjustment(asset: &Asset, choice: TunerChoice, table: &TierTable) -> Asset {
    let current = asset.tier.unwrap_or_else(|| table.catch_all_tier());
    let target = (i16::from(current) + choice.tier_delta())
        .clamp(i16::from(table.min_tier()), i16::from(table.catch_all_tier()))
        as u8;

    let mut adjusted = asset.clone();
    adjusted.tier = Some(target);
    if let Some(def) = table.def(target) {
        adjusted.value = def.midpoint();
    }
    adjusted
}

// ---------------------------------------------------------------------------
// Wizard session
// ---------------------------------------------------------------------------

/// Cursor-driven tuning pass over a list of assets.
///
/// Choices default to [`TunerChoice::AboutRight`] and are applied when
/// the cursor leaves an asset (next/back) or the session finishes, which
/// is also when the asset is marked as seen.
#[derive(Debug, Clone)]
pub struct TunerSession {
    assets: Vec<Asset>,
    choices: Vec<TunerChoice>,
    seen: Vec<bool>,
    cursor: usize,
}

impl TunerSession {
    pub fn new(assets: Vec<Asset>) -> Self {
        let n = assets.len();
        TunerSession {
            assets,
            choices: vec![TunerChoice::default(); n],
            seen: vec![false; n],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The asset under the cursor.
    pub fn current(&self) -> Option<&Asset> {
        self.assets.get(self.cursor)
    }

    /// How many assets have been reviewed so far.
    pub fn seen_count(&self) -> usize {
        self.seen.iter().filter(|s| **s).count()
    }

    /// Record the choice for the asset under the cursor.
    pub fn choose(&mut self, choice: TunerChoice) {
        if let Some(slot) = self.choices.get_mut(self.cursor) {
            *slot = choice;
        }
    }

    /// Apply the current choice and advance. Returns false when already
    /// on the last asset.
    pub fn next(&mut self, table: &TierTable) -> bool {
        self.apply_current(table);
        if self.cursor + 1 < self.assets.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Apply the current choice and step back. Returns false when
    /// already on the first asset.
    pub fn back(&mut self, table: &TierTable) -> bool {
        self.apply_current(table);
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Apply the current choice and re-rank the tuned list, preserving
    /// the manual tier overrides.
    pub fn finish(mut self, table: &TierTable) -> Ranking {
        self.apply_current(table);
        debug!(seen = self.seen_count(), total = self.len(), "Tuner session finished");
        let ranking = Ranking::new(self.assets);
        valuation::rerank(&ranking, table, BuildOptions { skip_tier_assignment: true })
    }

    fn apply_current(&mut self, table: &TierTable) {
        if let Some(asset) = self.assets.get(self.cursor) {
            self.assets[self.cursor] = apply_adjustment(asset, self.choices[self.cursor], table);
            self.seen[self.cursor] = true;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn tiered(name: &str, tier: u8, value: f64) -> Asset {
        let mut a = Asset::player(name, Some(Position::Wr));
        a.tier = Some(tier);
        a.value = value;
        a
    }

    #[test]
    fn test_choice_deltas() {
        assert_eq!(TunerChoice::MuchLower.tier_delta(), 2);
        assert_eq!(TunerChoice::Lower.tier_delta(), 1);
        assert_eq!(TunerChoice::AboutRight.tier_delta(), 0);
        assert_eq!(TunerChoice::Higher.tier_delta(), -1);
        assert_eq!(TunerChoice::MuchHigher.tier_delta(), -2);
    }

    #[test]
    fn test_adjustment_moves_tier_and_snaps_value() {
        let table = TierTable::default();
        let asset = tiered("A", 5, 1.9);
        let adjusted = apply_adjustment(&asset, TunerChoice::Higher, &table);
        assert_eq!(adjusted.tier, Some(4));
        assert!((adjusted.value - table.def(4).unwrap().midpoint()).abs() < 1e-10);
    }

    #[test]
    fn test_adjustment_clamps_at_best_tier() {
        let table = TierTable::default();
        let asset = tiered("A", 1, 4.4);
        let adjusted = apply_adjustment(&asset, TunerChoice::MuchHigher, &table);
        assert_eq!(adjusted.tier, Some(1));
    }

    #[test]
    fn test_adjustment_clamps_at_catch_all_tier() {
        let table = TierTable::default();
        let asset = tiered("A", 11, 0.05);
        let adjusted = apply_adjustment(&asset, TunerChoice::MuchLower, &table);
        assert_eq!(adjusted.tier, Some(11));
    }

    #[test]
    fn test_about_right_still_snaps_to_midpoint() {
        let table = TierTable::default();
        let asset = tiered("A", 5, 2.16);
        let adjusted = apply_adjustment(&asset, TunerChoice::AboutRight, &table);
        assert_eq!(adjusted.tier, Some(5));
        assert!((adjusted.value - 1.915).abs() < 1e-10);
    }

    #[test]
    fn test_untiered_asset_adjusts_from_catch_all() {
        let table = TierTable::default();
        let asset = Asset::player("A", Some(Position::Wr));
        let adjusted = apply_adjustment(&asset, TunerChoice::Higher, &table);
        assert_eq!(adjusted.tier, Some(10));
    }

    #[test]
    fn test_session_cursor_and_seen_tracking() {
        let table = TierTable::default();
        let mut session = TunerSession::new(vec![
            tiered("A", 3, 3.0),
            tiered("B", 5, 1.9),
            tiered("C", 7, 1.1),
        ]);

        assert_eq!(session.cursor(), 0);
        assert_eq!(session.seen_count(), 0);

        assert!(session.next(&table));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.seen_count(), 1);

        assert!(session.back(&table));
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.seen_count(), 2);

        // Can't step back past the start
        assert!(!session.back(&table));
    }

    #[test]
    fn test_session_next_stops_at_end() {
        let table = TierTable::default();
        let mut session = TunerSession::new(vec![tiered("A", 3, 3.0)]);
        assert!(!session.next(&table));
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn test_session_choice_applied_on_advance() {
        let table = TierTable::default();
        let mut session = TunerSession::new(vec![tiered("A", 5, 1.9), tiered("B", 5, 1.8)]);
        session.choose(TunerChoice::MuchHigher);
        session.next(&table);

        // Cursor moved on; the first asset was bumped from tier 5 to 3
        let ranking = session.finish(&table);
        let a = ranking.get("player-A").unwrap();
        assert_eq!(a.tier, Some(3));
        // Rank 1 sits above tier 3's rank span, so the re-rank pins the
        // value to the top of tier 3
        assert!((a.value - table.def(3).unwrap().max_value).abs() < 1e-10);
    }

    #[test]
    fn test_finish_reranks_preserving_overrides() {
        let table = TierTable::default();
        let mut session = TunerSession::new(vec![
            tiered("Faller", 2, 3.7),
            tiered("Riser", 6, 1.5),
        ]);
        // Drop the first asset two tiers, boost the second by two
        session.choose(TunerChoice::MuchLower);
        session.next(&table);
        session.choose(TunerChoice::MuchHigher);
        let ranking = session.finish(&table);

        let riser = ranking.get("player-Riser").unwrap();
        let faller = ranking.get("player-Faller").unwrap();
        assert_eq!(riser.tier, Some(4));
        assert_eq!(faller.tier, Some(4));
        // Both land on tier 4's midpoint before the re-rank, so the
        // stable sort keeps their input order and ranks stay dense
        assert_eq!(ranking.assets[0].id, "player-Faller");
        assert_eq!(ranking.assets[0].rank, Some(1));
        assert_eq!(ranking.assets[1].rank, Some(2));
    }

    #[test]
    fn test_empty_session() {
        let table = TierTable::default();
        let mut session = TunerSession::new(vec![]);
        assert!(session.is_empty());
        assert!(session.current().is_none());
        assert!(!session.next(&table));
        let ranking = session.finish(&table);
        assert!(ranking.is_empty());
    }
}
