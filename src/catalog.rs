//! Asset catalogs: scored player records from disk and the generated
//! draft-pick board.
//!
//! The pick board mirrors a 12-team league: the base year gets numbered
//! picks for four rounds, and each of the three following years gets
//! Early/Mid/Late slots per round (exact draft positions are unknowable
//! that far out).

use std::path::Path;

use tracing::debug;

use crate::types::{Asset, PlayerRecord, WarchestError};

const ROUNDS: u32 = 4;
const TEAMS_PER_ROUND: u32 = 12;
const FUTURE_YEARS: i32 = 3;
const FUTURE_SLOTS: [&str; 3] = ["Early", "Mid", "Late"];

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Load scored player records from a JSON file.
pub fn load_players(path: &Path) -> Result<Vec<PlayerRecord>, WarchestError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        WarchestError::Catalog(format!("failed to read {}: {e}", path.display()))
    })?;
    let records: Vec<PlayerRecord> = serde_json::from_str(&contents).map_err(|e| {
        WarchestError::Catalog(format!("failed to parse {}: {e}", path.display()))
    })?;
    debug!(count = records.len(), path = %path.display(), "Player records loaded");
    Ok(records)
}

/// Market-consensus view of the records: one asset per record carrying
/// its market value, for the outlier report.
pub fn market_assets(records: &[PlayerRecord]) -> Vec<Asset> {
    records
        .iter()
        .map(|r| {
            let mut a = r.to_asset();
            a.value = r.market_value.unwrap_or(0.0);
            a
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Draft picks
// ---------------------------------------------------------------------------

/// Generate the tradeable pick board for a base year.
pub fn draft_picks(base_year: i32) -> Vec<Asset> {
    let mut picks = Vec::new();

    // The base year's draft order is known, so picks are numbered
    for round in 1..=ROUNDS {
        for slot in 1..=TEAMS_PER_ROUND {
            let id = format!("{base_year}_{round}_{slot}");
            let label = format!(
                "{base_year} {round}{} Rd - {round}.{slot:02}",
                ordinal_suffix(round),
            );
            picks.push(Asset::pick(&id, &label, base_year));
        }
    }

    for offset in 1..=FUTURE_YEARS {
        let year = base_year + offset;
        for round in 1..=ROUNDS {
            for slot in FUTURE_SLOTS {
                let id = format!("{year}_{round}_{}", slot.to_lowercase());
                let label = format!("{year} {round}{} Rd - {slot}", ordinal_suffix(round));
                picks.push(Asset::pick(&id, &label, year));
            }
        }
    }

    picks
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, ... 11th, 21st.
fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
