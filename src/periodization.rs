use crate::models::{PeriodizationType, ProgressionSettings};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Target generation contract violations
#[derive(Error, Debug)]
pub enum TargetError {
    #[error("Program must have at least 1 week, got {0}")]
    InvalidProgramLength(u32),
    #[error("Weekly override has {got} entries, program has {expected} weeks")]
    OverrideLengthMismatch { expected: u32, got: usize },
}

/// Generates the canonical weekly volume-percentage target curve
///
/// A pure function of periodization type, program length, and settings;
/// no hidden state. The caller's manual per-week percentages, when
/// present, replace the generated curve entirely.
pub struct TargetGenerator;

impl TargetGenerator {
    /// Weekly volume-percentage targets for a program, week 1 first
    pub fn weekly_targets(
        periodization_type: PeriodizationType,
        total_weeks: u32,
        settings: &ProgressionSettings,
    ) -> Result<Vec<Decimal>, TargetError> {
        if total_weeks < 1 {
            return Err(TargetError::InvalidProgramLength(total_weeks));
        }

        if !settings.weekly_volume_percentages.is_empty() {
            if settings.weekly_volume_percentages.len() != total_weeks as usize {
                return Err(TargetError::OverrideLengthMismatch {
                    expected: total_weeks,
                    got: settings.weekly_volume_percentages.len(),
                });
            }
            return Ok(settings.weekly_volume_percentages.clone());
        }

        let targets = match periodization_type {
            PeriodizationType::None => vec![dec!(100); total_weeks as usize],
            PeriodizationType::Linear => {
                Self::linear_targets(total_weeks, settings.volume_increment_pct)
            }
            PeriodizationType::Undulating => Self::undulating_pattern(total_weeks),
        };
        Ok(targets)
    }

    /// Week 1 baseline of 100, compounded weekly by the caller-supplied
    /// increment (the engine never invents a default increment)
    fn linear_targets(total_weeks: u32, volume_increment_pct: Decimal) -> Vec<Decimal> {
        let factor = Decimal::ONE + volume_increment_pct / dec!(100);
        let mut targets = Vec::with_capacity(total_weeks as usize);
        let mut current = dec!(100);
        for _ in 0..total_weeks {
            targets.push(current);
            current *= factor;
        }
        targets
    }

    /// Canonical undulating weekly percentages
    ///
    /// Fixed table, not derived from training-science parameters; any
    /// change to these constants is a contract revision:
    /// 1 week  -> [100]
    /// 2 weeks -> [100, 70]
    /// 3 weeks -> [100, 70, 50]
    /// 4 weeks -> [100, 70, 90, 50]
    /// beyond  -> 100, then 70/90 alternating, final week forced to 50
    pub fn undulating_pattern(total_weeks: u32) -> Vec<Decimal> {
        match total_weeks {
            0 => Vec::new(),
            1 => vec![dec!(100)],
            2 => vec![dec!(100), dec!(70)],
            3 => vec![dec!(100), dec!(70), dec!(50)],
            4 => vec![dec!(100), dec!(70), dec!(90), dec!(50)],
            _ => {
                let mut targets = vec![dec!(100)];
                for i in 0..(total_weeks - 2) {
                    targets.push(if i % 2 == 0 { dec!(70) } else { dec!(90) });
                }
                targets.push(dec!(50));
                targets
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_periodization_is_flat() {
        let targets = TargetGenerator::weekly_targets(
            PeriodizationType::None,
            4,
            &ProgressionSettings::default(),
        )
        .unwrap();
        assert_eq!(targets, vec![dec!(100); 4]);
    }

    #[test]
    fn test_linear_compounds_increment() {
        let settings = ProgressionSettings {
            volume_increment_pct: dec!(10),
            ..ProgressionSettings::default()
        };
        let targets =
            TargetGenerator::weekly_targets(PeriodizationType::Linear, 3, &settings).unwrap();
        assert_eq!(targets[0], dec!(100));
        assert_eq!(targets[1], dec!(110.0));
        assert_eq!(targets[2], dec!(121.000));
    }

    #[test]
    fn test_linear_zero_increment_is_flat() {
        let targets = TargetGenerator::weekly_targets(
            PeriodizationType::Linear,
            3,
            &ProgressionSettings::default(),
        )
        .unwrap();
        assert!(targets.iter().all(|t| *t == dec!(100)));
    }

    #[test]
    fn test_undulating_table_special_cases() {
        assert_eq!(TargetGenerator::undulating_pattern(1), vec![dec!(100)]);
        assert_eq!(
            TargetGenerator::undulating_pattern(2),
            vec![dec!(100), dec!(70)]
        );
        assert_eq!(
            TargetGenerator::undulating_pattern(3),
            vec![dec!(100), dec!(70), dec!(50)]
        );
        assert_eq!(
            TargetGenerator::undulating_pattern(4),
            vec![dec!(100), dec!(70), dec!(90), dec!(50)]
        );
    }

    #[test]
    fn test_undulating_long_program() {
        let targets = TargetGenerator::undulating_pattern(6);
        assert_eq!(
            targets,
            vec![dec!(100), dec!(70), dec!(90), dec!(70), dec!(90), dec!(50)]
        );

        // Final week is 50 regardless of where the alternation lands
        let seven = TargetGenerator::undulating_pattern(7);
        assert_eq!(seven.len(), 7);
        assert_eq!(*seven.last().unwrap(), dec!(50));
        assert_eq!(seven[1], dec!(70));
        assert_eq!(seven[2], dec!(90));
        assert_eq!(seven[5], dec!(70));
    }

    #[test]
    fn test_manual_override_wins() {
        let settings = ProgressionSettings {
            weekly_volume_percentages: vec![dec!(100), dec!(80), dec!(120)],
            ..ProgressionSettings::default()
        };
        let targets =
            TargetGenerator::weekly_targets(PeriodizationType::Undulating, 3, &settings).unwrap();
        assert_eq!(targets, vec![dec!(100), dec!(80), dec!(120)]);
    }

    #[test]
    fn test_override_length_mismatch() {
        let settings = ProgressionSettings {
            weekly_volume_percentages: vec![dec!(100), dec!(80)],
            ..ProgressionSettings::default()
        };
        let result = TargetGenerator::weekly_targets(PeriodizationType::None, 3, &settings);
        assert!(matches!(
            result,
            Err(TargetError::OverrideLengthMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_zero_weeks_rejected() {
        let result = TargetGenerator::weekly_targets(
            PeriodizationType::None,
            0,
            &ProgressionSettings::default(),
        );
        assert!(matches!(result, Err(TargetError::InvalidProgramLength(0))));
    }
}
