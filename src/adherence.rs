use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Baseline-relative adherence report for a program
///
/// Week 1 is always the 100% baseline. A `None` weekly entry means no
/// actual data was recorded for that week ("NA", not a failure), and a
/// `None` consistency means too little data to score at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdherenceReport {
    /// Planned volume per week as a percentage of week 1
    pub planned_pct: Vec<Decimal>,

    /// Actual volume per week as a percentage of the week-1 actual;
    /// `None` where actual data is missing
    pub actual_pct: Vec<Option<Decimal>>,

    /// `max(0, 100 - mean |planned_pct - actual_pct|)` over scoreable
    /// weeks; `None` when no week is scoreable
    pub consistency: Option<Decimal>,
}

/// Scores how closely recorded training matched the planned trajectory
pub struct AdherenceScorer;

impl AdherenceScorer {
    /// Score a planned-volume series against the actual-volume series
    ///
    /// Both series are indexed by week; `actual` entries are `None` for
    /// weeks with no recorded data. The baseline week itself is never
    /// scored for deviation (it is trivially 100 vs 100).
    pub fn score(planned: &[Decimal], actual: &[Option<Decimal>]) -> AdherenceReport {
        let planned_baseline = planned.first().copied().unwrap_or(Decimal::ZERO);
        let planned_pct: Vec<Decimal> = planned
            .iter()
            .map(|volume| {
                if planned_baseline > Decimal::ZERO {
                    volume / planned_baseline * dec!(100)
                } else {
                    dec!(100)
                }
            })
            .collect();

        let actual_baseline = actual.first().copied().flatten();
        let actual_pct: Vec<Option<Decimal>> = actual
            .iter()
            .map(|entry| match (entry, actual_baseline) {
                (Some(value), Some(baseline)) if baseline > Decimal::ZERO => {
                    Some(value / baseline * dec!(100))
                }
                _ => None,
            })
            .collect();

        let consistency = Self::consistency(&planned_pct, &actual_pct);

        AdherenceReport {
            planned_pct,
            actual_pct,
            consistency,
        }
    }

    fn consistency(
        planned_pct: &[Decimal],
        actual_pct: &[Option<Decimal>],
    ) -> Option<Decimal> {
        let mut total_deviation = Decimal::ZERO;
        let mut scoreable_weeks = 0u32;

        for (week, actual) in actual_pct.iter().enumerate().skip(1) {
            if let (Some(actual), Some(planned)) = (actual, planned_pct.get(week)) {
                total_deviation += (planned - actual).abs();
                scoreable_weeks += 1;
            }
        }

        if scoreable_weeks == 0 {
            return None;
        }
        let mean_deviation = total_deviation / Decimal::from(scoreable_weeks);
        Some((dec!(100) - mean_deviation).max(Decimal::ZERO))
    }
}
