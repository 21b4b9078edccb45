//! Reorder engine: drag-style moves over a tiered ranking.
//!
//! A move is applied as a pure state transition `(Ranking, Move) ->
//! Ranking`; the caller's ranking is never mutated. The moved asset's
//! value is recomputed from its new neighbors rather than re-running the
//! whole-ranking interpolation, so every other asset's value is left
//! untouched. Invalid moves are no-ops, never errors: drag gestures
//! produce transient nonsense and the engine must shrug it off.

use std::collections::BTreeMap;

use tracing::debug;

use crate::types::{Asset, Ranking};

/// Untiered assets sort behind every real tier when flattening.
const UNTIERED_GROUP: u8 = u8::MAX;

/// A requested move: which asset, out of which tier group, into which
/// tier group, at which position within it. The asset's actual group is
/// located by id and must agree with `source_tier`. For cross-tier moves
/// the index is ignored; the asset always enters at the top of the
/// destination group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub asset_id: String,
    pub source_tier: u8,
    pub dest_tier: u8,
    pub dest_index: usize,
}

/// Apply a move and return the updated ranking.
///
/// After the move, global ranks are reassigned by flattening tier groups
/// in ascending tier order and numbering from 1. Ordering within a tier
/// follows the group's internal order, not value. A move referencing an
/// unknown asset or a destination tier with no group is returned
/// unchanged, and a move that lands an asset back on its own slot is the
/// identity.
pub fn apply_move(ranking: &Ranking, mv: &Move) -> Ranking {
    let mut groups: BTreeMap<u8, Vec<Asset>> = BTreeMap::new();
    for asset in &ranking.assets {
        groups
            .entry(asset.tier.unwrap_or(UNTIERED_GROUP))
            .or_default()
            .push(asset.clone());
    }

    let Some((src_tier, src_idx)) = locate(&groups, &mv.asset_id) else {
        debug!(asset_id = %mv.asset_id, "Move ignored: unknown asset");
        return ranking.clone();
    };

    if src_tier != mv.source_tier {
        debug!(
            asset_id = %mv.asset_id,
            claimed = mv.source_tier,
            actual = src_tier,
            "Move ignored: stale source tier"
        );
        return ranking.clone();
    }

    if !groups.contains_key(&mv.dest_tier) {
        debug!(dest_tier = mv.dest_tier, "Move ignored: no such tier group");
        return ranking.clone();
    }

    if src_tier == mv.dest_tier {
        let Some(group) = groups.get_mut(&src_tier) else {
            return ranking.clone();
        };
        // A drop below the last slot means "insert last"
        let new_idx = mv.dest_index.min(group.len() - 1);
        if new_idx == src_idx {
            debug!(asset_id = %mv.asset_id, "Move ignored: no position change");
            return ranking.clone();
        }

        let mut moved = group.remove(src_idx);
        moved.value = neighbor_value(group, new_idx, moved.value);
        group.insert(new_idx, moved);
    } else {
        let moved = groups.get_mut(&src_tier).map(|src| src.remove(src_idx));
        let (Some(mut moved), Some(dest)) = (moved, groups.get_mut(&mv.dest_tier)) else {
            return ranking.clone();
        };
        moved.tier = Some(mv.dest_tier);
        // Entering at the top: take the displaced leader's value
        if let Some(first) = dest.first() {
            moved.value = first.value;
        }
        dest.insert(0, moved);
    }

    renumber(groups, ranking.len())
}

/// Find which tier group holds the asset, and where.
fn locate(groups: &BTreeMap<u8, Vec<Asset>>, asset_id: &str) -> Option<(u8, usize)> {
    for (tier, group) in groups {
        if let Some(idx) = group.iter().position(|a| a.id == asset_id) {
            return Some((*tier, idx));
        }
    }
    None
}

/// Value for an asset inserted at `new_idx` into `group` (which no
/// longer contains it): top slot takes the next member's value, bottom
/// slot takes the previous member's, interior slots take the mean of
/// both neighbors. An empty group leaves the value as-is.
fn neighbor_value(group: &[Asset], new_idx: usize, own: f64) -> f64 {
    if group.is_empty() {
        own
    } else if new_idx == 0 {
        group[0].value
    } else if new_idx >= group.len() {
        group[group.len() - 1].value
    } else {
        (group[new_idx - 1].value + group[new_idx].value) / 2.0
    }
}

/// Flatten groups in ascending tier order and reassign dense ranks.
fn renumber(groups: BTreeMap<u8, Vec<Asset>>, capacity: usize) -> Ranking {
    let mut assets = Vec::with_capacity(capacity);
    for (_, group) in groups {
        assets.extend(group);
    }
    for (i, asset) in assets.iter_mut().enumerate() {
        asset.rank = Some(i as u32 + 1);
    }
    Ranking::new(assets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
