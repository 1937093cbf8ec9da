use crate::models::{
    ExerciseKey, ExerciseVolumeData, LoadUnit, Program, ProgramVolumeAnalysis, VolumeDataPoint,
};
use crate::volume::{aggregate_exercise, ExerciseVolume};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use thiserror::Error;

/// Structural contract violations in the caller-supplied program
///
/// Data-quality problems (missing reps, band loads, unlogged sessions)
/// never surface here; they degrade to zero/`None` in the output.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Program must have at least 1 week, got {0}")]
    InvalidProgramLength(u32),
    #[error("Week index {index} outside [1, {total_weeks}]")]
    WeekIndexOutOfRange { index: u32, total_weeks: u32 },
    #[error("Duplicate week index {0}")]
    DuplicateWeek(u32),
}

/// Weekly and program-wide volume aggregation engine
///
/// Stateless and re-entrant: every call takes its full input and returns a
/// fresh result, never mutating the program.
pub struct VolumeAnalyzer {
    preferred_unit: LoadUnit,
}

impl VolumeAnalyzer {
    pub fn new(preferred_unit: LoadUnit) -> Self {
        VolumeAnalyzer { preferred_unit }
    }

    /// Analyze a full program into per-exercise and overall volume series
    pub fn analyze(&self, program: &Program) -> Result<ProgramVolumeAnalysis, AnalysisError> {
        Self::validate(program)?;

        // Composite-key index: absence of a key is "not programmed that
        // week", no sentinel values involved.
        let mut volumes: HashMap<(u32, &ExerciseKey), ExerciseVolume> = HashMap::new();
        let mut roster: Vec<(&ExerciseKey, &str)> = Vec::new();

        for week in &program.weeks {
            for instance in &week.exercises {
                let volume = aggregate_exercise(instance, self.preferred_unit);
                volumes
                    .entry((week.week_index, &instance.key))
                    .and_modify(|existing| merge_volumes(existing, &volume))
                    .or_insert(volume);
                if !roster.iter().any(|(key, _)| *key == &instance.key) {
                    roster.push((&instance.key, &instance.name));
                }
            }
        }

        let exercise_data = roster
            .iter()
            .map(|(key, name)| self.exercise_series(key, name, program.total_weeks, &volumes))
            .collect::<Vec<_>>();

        let overall_volume_data: Vec<VolumeDataPoint> = (1..=program.total_weeks)
            .map(|week| self.overall_week(week, &roster, &volumes))
            .collect();

        let total_planned_volume = overall_volume_data
            .iter()
            .map(|point| point.planned_volume)
            .sum();
        let total_actual_volume = sum_present(
            overall_volume_data
                .iter()
                .map(|point| point.actual_volume),
        );

        Ok(ProgramVolumeAnalysis {
            program_id: program.id.clone(),
            program_name: program.name.clone(),
            unit: self.preferred_unit,
            exercise_data,
            overall_volume_data,
            total_planned_volume,
            total_actual_volume,
        })
    }

    fn validate(program: &Program) -> Result<(), AnalysisError> {
        if program.total_weeks < 1 {
            return Err(AnalysisError::InvalidProgramLength(program.total_weeks));
        }
        let mut seen: Vec<u32> = Vec::new();
        for week in &program.weeks {
            if week.week_index < 1 || week.week_index > program.total_weeks {
                return Err(AnalysisError::WeekIndexOutOfRange {
                    index: week.week_index,
                    total_weeks: program.total_weeks,
                });
            }
            if seen.contains(&week.week_index) {
                return Err(AnalysisError::DuplicateWeek(week.week_index));
            }
            seen.push(week.week_index);
        }
        Ok(())
    }

    /// Weekly series for one exercise; unprogrammed weeks are skipped
    fn exercise_series(
        &self,
        key: &ExerciseKey,
        name: &str,
        total_weeks: u32,
        volumes: &HashMap<(u32, &ExerciseKey), ExerciseVolume>,
    ) -> ExerciseVolumeData {
        let weekly_data: Vec<VolumeDataPoint> = (1..=total_weeks)
            .filter_map(|week| {
                volumes
                    .get(&(week, key))
                    .map(|volume| data_point(week, volume.planned, volume.actual))
            })
            .collect();

        let total_planned_volume: Decimal =
            weekly_data.iter().map(|point| point.planned_volume).sum();
        let total_actual_volume =
            sum_present(weekly_data.iter().map(|point| point.actual_volume));
        let average_volume_percentage = match total_actual_volume {
            Some(actual) if total_planned_volume > Decimal::ZERO => {
                Some(actual / total_planned_volume * dec!(100))
            }
            _ => None,
        };

        ExerciseVolumeData {
            key: key.clone(),
            name: name.to_string(),
            weekly_data,
            total_planned_volume,
            total_actual_volume,
            average_volume_percentage,
        }
    }

    /// Cross-exercise totals for one week; absent exercises contribute
    /// zero planned and no actual data
    fn overall_week(
        &self,
        week: u32,
        roster: &[(&ExerciseKey, &str)],
        volumes: &HashMap<(u32, &ExerciseKey), ExerciseVolume>,
    ) -> VolumeDataPoint {
        let mut planned = Decimal::ZERO;
        let mut actual = Decimal::ZERO;
        let mut has_actual_data = false;

        for (key, _) in roster {
            if let Some(volume) = volumes.get(&(week, *key)) {
                planned += volume.planned;
                if let Some(value) = volume.actual {
                    actual += value;
                    has_actual_data = true;
                }
            }
        }

        data_point(week, planned, has_actual_data.then_some(actual))
    }
}

/// Build a data point, deriving difference and percentage
///
/// Percentage short-circuits to `None` when planned is zero; the output
/// never carries Infinity or NaN.
fn data_point(week: u32, planned: Decimal, actual: Option<Decimal>) -> VolumeDataPoint {
    let volume_difference = actual.map(|value| value - planned);
    let volume_percentage = match actual {
        Some(value) if planned > Decimal::ZERO => Some(value / planned * dec!(100)),
        _ => None,
    };
    VolumeDataPoint {
        week,
        planned_volume: planned,
        actual_volume: actual,
        volume_difference,
        volume_percentage,
    }
}

fn merge_volumes(existing: &mut ExerciseVolume, incoming: &ExerciseVolume) {
    existing.planned += incoming.planned;
    existing.actual = match (existing.actual, incoming.actual) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(a), None) => Some(a),
        (None, other) => other,
    };
}

fn sum_present(values: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    let mut total = Decimal::ZERO;
    let mut any = false;
    for value in values.flatten() {
        total += value;
        any = true;
    }
    any.then_some(total)
}
