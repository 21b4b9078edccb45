//! Valuation engine: weighted scoring, tier resolution, and ranking
//! construction.
//!
//! The builder turns a flat list of scored assets into a tiered ranking:
//! stable descending sort by score, dense 1-based ranks, tier lookup via
//! the tier table, and linear value interpolation inside each tier.

pub mod score;
pub mod tiers;

use tracing::debug;

use crate::types::{Asset, PlayerRecord, Ranking};
use score::{PositionWeights, ScoringWeights};
use tiers::TierTable;

// ---------------------------------------------------------------------------
// Builder inputs
// ---------------------------------------------------------------------------

/// An asset paired with the scalar score that orders it.
#[derive(Debug, Clone)]
pub struct ScoredAsset {
    pub asset: Asset,
    pub score: f64,
}

/// Knobs for ranking construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Keep each asset's existing tier instead of resolving it from the
    /// table. Ranks are still recomputed from sorted position, and values
    /// re-interpolate within the kept tier, so manual tier overrides
    /// survive a re-rank without being overwritten.
    pub skip_tier_assignment: bool,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build a ranking from scored assets. The input is not mutated.
///
/// Sort is descending by score and stable, so ties keep their input
/// order and tier boundaries stay deterministic. Non-finite scores are
/// treated as 0.
pub fn build(scored: &[ScoredAsset], table: &TierTable, options: BuildOptions) -> Ranking {
    let mut ordered: Vec<ScoredAsset> = scored
        .iter()
        .map(|s| ScoredAsset {
            asset: s.asset.clone(),
            score: if s.score.is_finite() { s.score } else { 0.0 },
        })
        .collect();
    ordered.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

    let assets = ordered
        .into_iter()
        .enumerate()
        .map(|(i, s)| place(s.asset, i as u32 + 1, table, options))
        .collect();

    let ranking = Ranking::new(assets);
    debug!(assets = ranking.len(), skip_tiers = options.skip_tier_assignment, "Ranking built");
    ranking
}

/// Re-rank an existing ranking using each asset's current value as its
/// score. This is the path taken after manual edits (tuner, reorder
/// round-trips); pass `skip_tier_assignment` to preserve overrides.
pub fn rerank(ranking: &Ranking, table: &TierTable, options: BuildOptions) -> Ranking {
    let scored: Vec<ScoredAsset> = ranking
        .assets
        .iter()
        .map(|a| ScoredAsset {
            asset: a.clone(),
            score: a.value,
        })
        .collect();
    build(&scored, table, options)
}

/// Score raw player records with the given weights and build a fresh
/// ranking from them.
pub fn generate(
    records: &[PlayerRecord],
    weights: &ScoringWeights,
    position_weights: &PositionWeights,
    table: &TierTable,
) -> Ranking {
    let scored: Vec<ScoredAsset> = records
        .iter()
        .map(|r| ScoredAsset {
            asset: r.to_asset(),
            score: score::weighted_score(r, weights, position_weights),
        })
        .collect();
    build(&scored, table, BuildOptions::default())
}

/// Assign rank, tier, and value to one asset at its sorted position.
fn place(mut asset: Asset, rank: u32, table: &TierTable, options: BuildOptions) -> Asset {
    asset.rank = Some(rank);

    if options.skip_tier_assignment {
        match asset.tier.and_then(|t| table.def(t)) {
            // Value follows the kept tier, not the freshly matched one.
            Some(def) => asset.value = def.interpolate_clamped(rank),
            // Unknown or missing tier: leave the value alone only if the
            // asset had a tier we cannot resolve; untiered assets fall
            // through to normal assignment.
            None => {
                if asset.tier.is_none() {
                    let (tier, value) = table.value_for_rank(rank);
                    asset.tier = Some(tier);
                    asset.value = value;
                }
            }
        }
    } else {
        let (tier, value) = table.value_for_rank(rank);
        asset.tier = Some(tier);
        asset.value = value;
    }

    asset
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
