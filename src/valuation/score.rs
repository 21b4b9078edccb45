//! Weighted scoring of player records.
//!
//! Turns four normalized sub-scores (age, production, projection, market
//! value) into a single scalar via configurable factor weights and a
//! per-position multiplier. The weighting is a pure configuration lookup;
//! the ranking itself happens downstream in the builder.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{PlayerRecord, Position};

/// Raw sub-scores arrive on a 0-10 scale and are normalized to 0-1
/// before weighting.
const SUB_SCORE_SCALE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Per-factor weights, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub age_weight: f64,
    pub production_weight: f64,
    pub projected_weight: f64,
    pub value_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            age_weight: 0.5,
            production_weight: 0.5,
            projected_weight: 0.5,
            value_weight: 0.5,
        }
    }
}

/// Per-position multipliers, each in [0, 1]. Records with no position
/// are not dampened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionWeights {
    pub qb: f64,
    pub rb: f64,
    pub wr: f64,
    pub te: f64,
}

impl Default for PositionWeights {
    fn default() -> Self {
        Self {
            qb: 0.8,
            rb: 0.8,
            wr: 0.8,
            te: 0.6,
        }
    }
}

impl PositionWeights {
    /// Multiplier for a position; unknown positions pass through at 1.
    pub fn weight_for(&self, position: Option<Position>) -> f64 {
        match position {
            Some(Position::Qb) => self.qb,
            Some(Position::Rb) => self.rb,
            Some(Position::Wr) => self.wr,
            Some(Position::Te) => self.te,
            None => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Named weighting profiles for quick setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPreset {
    YouthFocused,
    Contender,
    Balanced,
    ValueDaddy,
    UpsideChaser,
}

impl WeightPreset {
    pub const ALL: &'static [WeightPreset] = &[
        WeightPreset::YouthFocused,
        WeightPreset::Contender,
        WeightPreset::Balanced,
        WeightPreset::ValueDaddy,
        WeightPreset::UpsideChaser,
    ];

    /// The factor and position weights this profile expands to.
    pub fn weights(&self) -> (ScoringWeights, PositionWeights) {
        match self {
            WeightPreset::YouthFocused => (
                ScoringWeights {
                    age_weight: 0.9,
                    production_weight: 0.3,
                    projected_weight: 0.6,
                    value_weight: 0.5,
                },
                PositionWeights { qb: 0.6, rb: 0.8, wr: 1.0, te: 0.4 },
            ),
            WeightPreset::Contender => (
                ScoringWeights {
                    age_weight: 0.3,
                    production_weight: 0.9,
                    projected_weight: 0.9,
                    value_weight: 0.7,
                },
                PositionWeights { qb: 0.9, rb: 1.0, wr: 0.8, te: 0.7 },
            ),
            WeightPreset::Balanced => {
                (ScoringWeights::default(), PositionWeights::default())
            }
            WeightPreset::ValueDaddy => (
                ScoringWeights {
                    age_weight: 0.7,
                    production_weight: 0.3,
                    projected_weight: 0.6,
                    value_weight: 0.9,
                },
                PositionWeights { qb: 0.9, rb: 0.4, wr: 0.9, te: 0.3 },
            ),
            WeightPreset::UpsideChaser => (
                ScoringWeights {
                    age_weight: 0.6,
                    production_weight: 0.4,
                    projected_weight: 0.7,
                    value_weight: 0.3,
                },
                PositionWeights { qb: 0.5, rb: 1.0, wr: 0.9, te: 0.2 },
            ),
        }
    }
}

impl fmt::Display for WeightPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightPreset::YouthFocused => write!(f, "Youth Focused"),
            WeightPreset::Contender => write!(f, "Contender"),
            WeightPreset::Balanced => write!(f, "Balanced"),
            WeightPreset::ValueDaddy => write!(f, "Value Daddy"),
            WeightPreset::UpsideChaser => write!(f, "Upside Chaser"),
        }
    }
}

/// Attempt to parse a preset key (case-insensitive).
impl std::str::FromStr for WeightPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "youth" | "youth_focused" => Ok(WeightPreset::YouthFocused),
            "contender" => Ok(WeightPreset::Contender),
            "balanced" => Ok(WeightPreset::Balanced),
            "value_daddy" | "risk_averse" => Ok(WeightPreset::ValueDaddy),
            "upside_chaser" => Ok(WeightPreset::UpsideChaser),
            _ => Err(anyhow::anyhow!("Unknown weight preset: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Weighted score of a record: each sub-score is normalized, multiplied
/// by its factor weight, summed, then dampened by the position weight.
pub fn weighted_score(
    record: &PlayerRecord,
    weights: &ScoringWeights,
    position_weights: &PositionWeights,
) -> f64 {
    let base = weights.age_weight * (record.age_score / SUB_SCORE_SCALE)
        + weights.production_weight * (record.production_score / SUB_SCORE_SCALE)
        + weights.projected_weight * (record.projected_score / SUB_SCORE_SCALE)
        + weights.value_weight * (record.value_score / SUB_SCORE_SCALE);

    base * position_weights.weight_for(record.position)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(position: Option<Position>, scores: [f64; 4]) -> PlayerRecord {
        PlayerRecord {
            name: "Test Player".to_string(),
            position,
            age_score: scores[0],
            production_score: scores[1],
            projected_score: scores[2],
            value_score: scores[3],
            market_value: None,
        }
    }

    #[test]
    fn test_weighted_score_uniform_weights() {
        let rec = make_record(Some(Position::Wr), [10.0, 10.0, 10.0, 10.0]);
        let weights = ScoringWeights {
            age_weight: 1.0,
            production_weight: 1.0,
            projected_weight: 1.0,
            value_weight: 1.0,
        };
        let pos = PositionWeights { qb: 1.0, rb: 1.0, wr: 1.0, te: 1.0 };
        // Four maxed sub-scores at weight 1 sum to 4.0
        assert!((weighted_score(&rec, &weights, &pos) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_weighted_score_factor_weighting() {
        let rec = make_record(Some(Position::Rb), [8.0, 6.0, 4.0, 2.0]);
        let weights = ScoringWeights {
            age_weight: 0.5,
            production_weight: 0.25,
            projected_weight: 0.0,
            value_weight: 1.0,
        };
        let pos = PositionWeights { qb: 1.0, rb: 1.0, wr: 1.0, te: 1.0 };
        let expected = 0.5 * 0.8 + 0.25 * 0.6 + 0.0 + 1.0 * 0.2;
        assert!((weighted_score(&rec, &weights, &pos) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_position_multiplier_dampens_score() {
        let qb = make_record(Some(Position::Qb), [10.0, 10.0, 10.0, 10.0]);
        let weights = ScoringWeights::default();
        let pos = PositionWeights { qb: 0.5, rb: 1.0, wr: 1.0, te: 1.0 };

        let wr = make_record(Some(Position::Wr), [10.0, 10.0, 10.0, 10.0]);
        let qb_score = weighted_score(&qb, &weights, &pos);
        let wr_score = weighted_score(&wr, &weights, &pos);
        assert!((qb_score * 2.0 - wr_score).abs() < 1e-10);
    }

    #[test]
    fn test_missing_position_passes_through() {
        let rec = make_record(None, [10.0, 10.0, 10.0, 10.0]);
        let weights = ScoringWeights::default();
        let pos = PositionWeights { qb: 0.1, rb: 0.1, wr: 0.1, te: 0.1 };
        // No position means no dampening
        assert!((weighted_score(&rec, &weights, &pos) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_scores_zero_result() {
        let rec = make_record(Some(Position::Te), [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            weighted_score(&rec, &ScoringWeights::default(), &PositionWeights::default()),
            0.0
        );
    }

    #[test]
    fn test_preset_weights_distinct() {
        let (youth, _) = WeightPreset::YouthFocused.weights();
        let (contender, _) = WeightPreset::Contender.weights();
        assert!(youth.age_weight > contender.age_weight);
        assert!(contender.production_weight > youth.production_weight);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("balanced".parse::<WeightPreset>().unwrap(), WeightPreset::Balanced);
        assert_eq!("Youth Focused".parse::<WeightPreset>().unwrap(), WeightPreset::YouthFocused);
        assert_eq!("value-daddy".parse::<WeightPreset>().unwrap(), WeightPreset::ValueDaddy);
        assert!("galaxy_brain".parse::<WeightPreset>().is_err());
    }

    #[test]
    fn test_preset_display() {
        assert_eq!(format!("{}", WeightPreset::UpsideChaser), "Upside Chaser");
    }

    #[test]
    fn test_all_presets_resolve() {
        for preset in WeightPreset::ALL {
            let (w, p) = preset.weights();
            for v in [w.age_weight, w.production_weight, w.projected_weight, w.value_weight] {
                assert!((0.0..=1.0).contains(&v));
            }
            for v in [p.qb, p.rb, p.wr, p.te] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }
}
