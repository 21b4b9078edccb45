//! Trade fairness evaluation.
//!
//! Takes the two asset packages of a hypothetical trade, totals their
//! values, applies the imbalance adjustments (roster clogger, roster
//! spots, quarterback scarcity, star tax) in a fixed order, and
//! classifies the outcome. Pure computation: no I/O, no failure modes;
//! malformed inputs degrade to zero contributions.

use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::types::Asset;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Active-piece gap at which the roster-clogger penalty kicks in.
const CLOGGER_TRIGGER: usize = 3;
/// The clogger penalty starts counting at the 3rd extra piece.
const CLOGGER_FREE_PIECES: f64 = 2.0;
/// Clogger penalty per extra piece beyond the free allowance.
const CLOGGER_PENALTY_PER_EXTRA: f64 = 0.10;
/// Flat tax on the side receiving the only premium quarterback.
const QB_TAX: f64 = 0.075;
/// Minimum value for a quarterback to count as premium.
const VALUABLE_QB_FLOOR: f64 = 1.5;
/// Star tax per tier beyond the allowed gap.
const STAR_TAX_PER_TIER: f64 = 0.10;
/// Star tax multiplier when a true tier-1 asset is involved.
const STAR_TAX_ELITE_MULTIPLIER: f64 = 1.5;
/// Top tiers at or above this quality tighten the allowed gap to 1.
const ELITE_TIER_CEILING: u8 = 3;

/// Evaluator settings.
#[derive(Debug, Clone, Copy)]
pub struct TradeConfig {
    /// Relative total difference under which a trade is called even.
    pub margin: f64,
    /// Penalty rate per extra active roster spot.
    pub roster_penalty_rate: f64,
    /// Calendar year deciding which picks occupy a roster spot now.
    pub current_year: i32,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            margin: 0.075,
            roster_penalty_rate: 0.05,
            current_year: chrono::Utc::now().year(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Who comes out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Nothing on either side to evaluate.
    NoAssets,
    Even,
    SideA,
    SideB,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::NoAssets => write!(f, "Add assets to evaluate"),
            Verdict::Even => write!(f, "Even Trade"),
            Verdict::SideA => write!(f, "Team A Wins"),
            Verdict::SideB => write!(f, "Team B Wins"),
        }
    }
}

/// Full evaluation output. Recomputed from scratch on every call; totals
/// are rounded to 3 decimals and percentages to 2.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub raw_total_a: f64,
    pub raw_total_b: f64,
    pub adjusted_total_a: f64,
    pub adjusted_total_b: f64,
    pub percent_a: f64,
    pub percent_b: f64,
    pub verdict: Verdict,
    pub is_even_trade: bool,
    /// One entry per adjustment rule that fired, in rule order.
    pub reasons: Vec<String>,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | A {:.3} ({:.2}%) vs B {:.3} ({:.2}%)",
            self.verdict,
            self.adjusted_total_a,
            self.percent_a,
            self.adjusted_total_b,
            self.percent_b,
        )
    }
}

// ---------------------------------------------------------------------------
// Side collection
// ---------------------------------------------------------------------------

/// Add an asset to a trade side unless its id is already present.
/// Returns whether the asset was added.
pub fn push_unique(side: &mut Vec<Asset>, asset: Asset) -> bool {
    if side.iter().any(|a| a.id == asset.id) {
        debug!(asset_id = %asset.id, "Duplicate asset rejected from trade side");
        return false;
    }
    side.push(asset);
    true
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate a trade between two asset packages.
pub fn evaluate(side_a: &[Asset], side_b: &[Asset], cfg: &TradeConfig) -> Evaluation {
    let raw_a = total(side_a);
    let raw_b = total(side_b);
    let mut adj_a = raw_a;
    let mut adj_b = raw_b;
    let mut reasons: Vec<String> = Vec::new();

    // Roster-clogger penalty: one side dumping a pile of active pieces
    let active_a = side_a.iter().filter(|a| a.is_rosterable(cfg.current_year)).count();
    let active_b = side_b.iter().filter(|a| a.is_rosterable(cfg.current_year)).count();
    let active_diff = active_a.abs_diff(active_b);

    if active_diff >= CLOGGER_TRIGGER {
        let factor = 1.0 - CLOGGER_PENALTY_PER_EXTRA * (active_diff as f64 - CLOGGER_FREE_PIECES);
        let side = if active_a > active_b { "A" } else { "B" };
        apply(&mut adj_a, &mut adj_b, side, factor);
        reasons.push(format!(
            "One side is sending {active_diff} more active pieces, a potential roster clogger. \
             Team {side}'s value adjusted by -{}%.",
            pct(1.0 - factor),
        ));
        debug!(active_diff, factor, side, "Roster-clogger penalty applied");
    }

    // Roster-spot penalty: smaller, fires on any active-count imbalance
    if active_diff > 0 {
        let factor = 1.0 - cfg.roster_penalty_rate * active_diff as f64;
        let side = if active_a > active_b { "A" } else { "B" };
        apply(&mut adj_a, &mut adj_b, side, factor);
        reasons.push(format!(
            "Team {side}'s package fills {active_diff} more roster spots. \
             Value adjusted by -{}%.",
            pct(1.0 - factor),
        ));
        debug!(active_diff, factor, side, "Roster-spot penalty applied");
    }

    // Quarterback scarcity tax: a premium QB leaving for a side with none
    let a_has_qb = side_a.iter().any(|a| a.is_qb());
    let b_has_qb = side_b.iter().any(|a| a.is_qb());
    let a_premium_qb = side_a.iter().any(|a| a.is_qb() && a.value >= VALUABLE_QB_FLOOR);
    let b_premium_qb = side_b.iter().any(|a| a.is_qb() && a.value >= VALUABLE_QB_FLOOR);

    if a_premium_qb && !b_has_qb {
        adj_b *= 1.0 - QB_TAX;
        reasons.push(
            "Only Team A sends a premium quarterback. Team B's value adjusted by -7.5%."
                .to_string(),
        );
        debug!("QB scarcity tax applied to side B");
    } else if b_premium_qb && !a_has_qb {
        adj_a *= 1.0 - QB_TAX;
        reasons.push(
            "Only Team B sends a premium quarterback. Team A's value adjusted by -7.5%."
                .to_string(),
        );
        debug!("QB scarcity tax applied to side A");
    }

    // Star tax: best asset on one side far outclasses the other side's
    let top_a = side_a.iter().filter_map(|a| a.tier).min();
    let top_b = side_b.iter().filter_map(|a| a.tier).min();

    if let (Some(ta), Some(tb)) = (top_a, top_b) {
        let gap = ta.abs_diff(tb);
        let max_gap = if ta.min(tb) <= ELITE_TIER_CEILING { 1 } else { 2 };
        if gap > max_gap {
            let mut tax = STAR_TAX_PER_TIER * f64::from(gap - max_gap);
            if ta.min(tb) == 1 {
                tax *= STAR_TAX_ELITE_MULTIPLIER;
            }
            let side = if ta > tb { "A" } else { "B" };
            apply(&mut adj_a, &mut adj_b, side, 1.0 - tax);
            reasons.push(format!(
                "Top asset tier gap is {gap}, above the allowed {max_gap}. \
                 Star tax applied: Team {side}'s value adjusted by -{}%.",
                pct(tax),
            ));
            debug!(gap, max_gap, tax, side, "Star tax applied");
        }
    }

    // Percentage split of the adjusted pot
    let combined = adj_a + adj_b;
    let percent_a = if combined == 0.0 { 50.0 } else { adj_a / combined * 100.0 };
    let percent_b = 100.0 - percent_a;

    // Classification
    let no_assets = side_a.is_empty() && side_b.is_empty();
    let all_tiers: Vec<u8> = side_a
        .iter()
        .chain(side_b)
        .filter_map(|a| a.tier)
        .collect();
    let same_tier = !all_tiers.is_empty() && all_tiers.iter().all(|t| *t == all_tiers[0]);
    let same_count = side_a.len() == side_b.len();

    let (verdict, is_even_trade) = if no_assets {
        (Verdict::NoAssets, false)
    } else if same_tier && same_count {
        // Same bracket, same piece count: a matter of preference, no
        // matter what the value totals say
        reasons.push(
            "All traded assets come from the same tier in equal numbers. \
             Differences are a matter of preference."
                .to_string(),
        );
        (Verdict::Even, true)
    } else {
        let denom = adj_a.max(adj_b);
        // Two zero totals would divide 0 by 0; call that even
        let ratio = if denom > 0.0 { (adj_a - adj_b).abs() / denom } else { 0.0 };
        if ratio <= cfg.margin {
            (Verdict::Even, true)
        } else if adj_a > adj_b {
            (Verdict::SideA, false)
        } else {
            (Verdict::SideB, false)
        }
    };

    Evaluation {
        raw_total_a: round3(raw_a),
        raw_total_b: round3(raw_b),
        adjusted_total_a: round3(adj_a),
        adjusted_total_b: round3(adj_b),
        percent_a: round2(percent_a),
        percent_b: round2(percent_b),
        verdict,
        is_even_trade,
        reasons,
    }
}

/// Sum of asset values; non-finite values contribute nothing.
fn total(side: &[Asset]) -> f64 {
    side.iter()
        .map(|a| if a.value.is_finite() { a.value } else { 0.0 })
        .sum()
}

/// Scale the named side's running total.
fn apply(adj_a: &mut f64, adj_b: &mut f64, side: &str, factor: f64) {
    if side == "A" {
        *adj_a *= factor;
    } else {
        *adj_b *= factor;
    }
}

/// Whole-number percent for reason strings (7.5 stays fractional).
fn pct(rate: f64) -> String {
    let scaled = rate * 100.0;
    if (scaled - scaled.round()).abs() < 1e-9 {
        format!("{}", scaled.round() as i64)
    } else {
        format!("{scaled:.1}")
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
