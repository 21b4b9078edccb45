//! Outlier report: where a user's ranking disagrees with the market.
//!
//! Joins the user's assets to a market catalog by name and surfaces the
//! largest positive and negative value deltas.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::Asset;

/// One asset whose user value diverges from market consensus.
#[derive(Debug, Clone, Serialize)]
pub struct Outlier {
    pub name: String,
    pub user_value: f64,
    pub market_value: f64,
    /// user value minus market value
    pub delta: f64,
}

/// Top divergences in both directions, largest magnitude first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutlierReport {
    pub higher: Vec<Outlier>,
    pub lower: Vec<Outlier>,
}

/// Compare a user ranking against market values and keep the top `limit`
/// outliers in each direction. Assets missing from the market catalog
/// are skipped.
pub fn report(user: &[Asset], market: &[Asset], limit: usize) -> OutlierReport {
    let market_by_name: HashMap<&str, f64> =
        market.iter().map(|a| (a.name.as_str(), a.value)).collect();

    let mut deltas: Vec<Outlier> = user
        .iter()
        .filter_map(|a| {
            let market_value = *market_by_name.get(a.name.as_str())?;
            Some(Outlier {
                name: a.name.clone(),
                user_value: a.value,
                market_value,
                delta: a.value - market_value,
            })
        })
        .collect();

    deltas.sort_by(|a, b| b.delta.partial_cmp(&a.delta).unwrap_or(std::cmp::Ordering::Equal));

    let higher: Vec<Outlier> = deltas
        .iter()
        .filter(|o| o.delta > 0.0)
        .take(limit)
        .cloned()
        .collect();
    // Reversed descending order puts the most negative delta first
    let lower: Vec<Outlier> = deltas
        .iter()
        .rev()
        .filter(|o| o.delta < 0.0)
        .take(limit)
        .cloned()
        .collect();

    OutlierReport { higher, lower }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn valued(name: &str, value: f64) -> Asset {
        let mut a = Asset::player(name, Some(Position::Wr));
        a.value = value;
        a
    }

    #[test]
    fn test_report_splits_directions() {
        let user = vec![valued("Up", 3.0), valued("Down", 1.0), valued("Flat", 2.0)];
        let market = vec![valued("Up", 2.0), valued("Down", 2.0), valued("Flat", 2.0)];
        let report = report(&user, &market, 5);

        assert_eq!(report.higher.len(), 1);
        assert_eq!(report.higher[0].name, "Up");
        assert!((report.higher[0].delta - 1.0).abs() < 1e-10);

        assert_eq!(report.lower.len(), 1);
        assert_eq!(report.lower[0].name, "Down");
        assert!((report.lower[0].delta + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_orders_by_magnitude_and_truncates() {
        let user = vec![
            valued("Big", 4.0),
            valued("Mid", 3.0),
            valued("Small", 2.5),
        ];
        let market = vec![
            valued("Big", 2.0),
            valued("Mid", 2.0),
            valued("Small", 2.0),
        ];
        let report = report(&user, &market, 2);

        assert_eq!(report.higher.len(), 2);
        assert_eq!(report.higher[0].name, "Big");
        assert_eq!(report.higher[1].name, "Mid");
    }

    #[test]
    fn test_lower_ordered_most_negative_first() {
        let user = vec![valued("Worst", 0.5), valued("Bad", 1.5)];
        let market = vec![valued("Worst", 3.0), valued("Bad", 2.0)];
        let report = report(&user, &market, 5);
        assert_eq!(report.lower[0].name, "Worst");
        assert_eq!(report.lower[1].name, "Bad");
    }

    #[test]
    fn test_unmatched_names_skipped() {
        let user = vec![valued("Known", 3.0), valued("Rookie", 2.0)];
        let market = vec![valued("Known", 2.0)];
        let report = report(&user, &market, 5);
        assert_eq!(report.higher.len(), 1);
        assert!(report.lower.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let report = report(&[], &[], 5);
        assert!(report.higher.is_empty());
        assert!(report.lower.is_empty());
    }
}
