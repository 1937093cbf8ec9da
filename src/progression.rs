use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Progression pattern detected in a planned-volume series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionType {
    Linear,
    Undulating,
    Mixed,
    None,
}

/// Classification of a program's week-to-week volume progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProgression {
    /// True when volume trends upward on average
    pub is_progressive: bool,

    pub progression_type: ProgressionType,

    /// Mean week-over-week volume change (percent)
    pub average_weekly_increase_pct: Decimal,

    /// 0-100 score; each percentage point of dispersion in the weekly
    /// changes costs 10 points
    pub consistency: Decimal,
}

impl VolumeProgression {
    /// Result for a series too short to classify
    fn insufficient() -> Self {
        VolumeProgression {
            is_progressive: false,
            progression_type: ProgressionType::None,
            average_weekly_increase_pct: Decimal::ZERO,
            consistency: Decimal::ZERO,
        }
    }
}

/// Classifies planned weekly volume into a progression pattern
pub struct ProgressionClassifier;

impl ProgressionClassifier {
    /// Classify a planned-volume series
    ///
    /// Weeks with zero planned volume are ignored; fewer than 2 nonzero
    /// weeks cannot express a progression and classify as `None`.
    pub fn classify(weekly_planned: &[Decimal]) -> VolumeProgression {
        let nonzero: Vec<Decimal> = weekly_planned
            .iter()
            .copied()
            .filter(|volume| *volume > Decimal::ZERO)
            .collect();

        if nonzero.len() < 2 {
            return VolumeProgression::insufficient();
        }

        let increases: Vec<Decimal> = nonzero
            .windows(2)
            .map(|pair| (pair[1] - pair[0]) / pair[0] * dec!(100))
            .collect();

        let average_weekly_increase_pct =
            increases.iter().copied().sum::<Decimal>() / Decimal::from(increases.len());

        let progression_type = Self::pattern(&increases);
        let consistency = Self::consistency_score(&increases);

        VolumeProgression {
            is_progressive: average_weekly_increase_pct > Decimal::ZERO,
            progression_type,
            average_weekly_increase_pct,
            consistency,
        }
    }

    fn pattern(increases: &[Decimal]) -> ProgressionType {
        let all_positive = increases.iter().all(|pct| *pct > Decimal::ZERO);
        if all_positive {
            return ProgressionType::Linear;
        }

        let any_negative = increases.iter().any(|pct| *pct < Decimal::ZERO);
        let any_positive = increases.iter().any(|pct| *pct > Decimal::ZERO);
        if any_negative && any_positive {
            return ProgressionType::Undulating;
        }

        if increases.iter().any(|pct| pct.abs() > Decimal::ONE) {
            return ProgressionType::Mixed;
        }

        ProgressionType::None
    }

    /// `max(0, 100 - 10 * population stddev of the weekly changes)`
    fn consistency_score(increases: &[Decimal]) -> Decimal {
        let values: Vec<f64> = increases
            .iter()
            .map(|pct| pct.to_f64().unwrap_or(0.0))
            .collect();
        let std_dev = Statistics::population_std_dev(values.iter().copied());
        let score = Decimal::from_f64_retain(100.0 - 10.0 * std_dev).unwrap_or_default();
        score.max(Decimal::ZERO)
    }
}
