use crate::models::{ExerciseInstance, ExerciseSet, LoadUnit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Conversion factor between pounds and kilograms
pub const LBS_PER_KG: Decimal = dec!(2.20462);

/// Convert a load value between units
pub fn convert_load(value: Decimal, from: LoadUnit, to: LoadUnit) -> Decimal {
    match (from, to) {
        (LoadUnit::Kg, LoadUnit::Lbs) => value * LBS_PER_KG,
        (LoadUnit::Lbs, LoadUnit::Kg) => value / LBS_PER_KG,
        _ => value,
    }
}

/// Volume of a single set, expressed in `preferred_unit`
///
/// Volume is reps times load. Absent reps, absent load, bodyweight, and
/// band loads all contribute zero; this is a total function and never
/// fails on malformed data.
pub fn set_volume(set: &ExerciseSet, preferred_unit: LoadUnit) -> Decimal {
    let reps = match set.reps {
        Some(reps) if reps > 0 => reps,
        _ => return Decimal::ZERO,
    };
    let (value, unit) = match set.load.as_ref().and_then(|load| load.as_numeric()) {
        Some(numeric) => numeric,
        None => return Decimal::ZERO,
    };
    Decimal::from(reps) * convert_load(value, unit, preferred_unit)
}

/// Planned and actual volume totals for one exercise instance
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseVolume {
    /// Sum of planned set volumes
    pub planned: Decimal,

    /// Sum of actual set volumes, `None` when no actual set carried any
    /// quantifiable volume
    pub actual: Option<Decimal>,
}

/// Aggregate set volumes for one exercise occurrence within one week
///
/// Actual volume is reported only when at least one actual set has volume
/// greater than zero. An instance whose actual sets are recorded but all
/// zero-volume (all bodyweight, say) reports the same `None` as one that
/// was never performed.
pub fn aggregate_exercise(instance: &ExerciseInstance, preferred_unit: LoadUnit) -> ExerciseVolume {
    let planned = instance
        .planned_sets
        .iter()
        .map(|set| set_volume(set, preferred_unit))
        .sum();

    let mut actual_total = Decimal::ZERO;
    let mut has_actual_data = false;
    for set in &instance.actual_sets {
        let volume = set_volume(set, preferred_unit);
        if volume > Decimal::ZERO {
            has_actual_data = true;
        }
        actual_total += volume;
    }

    ExerciseVolume {
        planned,
        actual: has_actual_data.then_some(actual_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseKey, Load};

    fn set_with(reps: Option<u32>, load: Option<Load>) -> ExerciseSet {
        ExerciseSet {
            reps,
            load,
            ..ExerciseSet::new(1)
        }
    }

    fn numeric(value: Decimal, unit: LoadUnit) -> Option<Load> {
        Some(Load::Numeric { value, unit })
    }

    fn instance(planned: Vec<ExerciseSet>, actual: Vec<ExerciseSet>) -> ExerciseInstance {
        ExerciseInstance {
            key: ExerciseKey::Library("squat".to_string()),
            name: "Back Squat".to_string(),
            planned_sets: planned,
            actual_sets: actual,
        }
    }

    #[test]
    fn test_set_volume_same_unit() {
        let set = set_with(Some(5), numeric(dec!(225), LoadUnit::Lbs));
        assert_eq!(set_volume(&set, LoadUnit::Lbs), dec!(1125));
    }

    #[test]
    fn test_set_volume_kg_to_lbs() {
        let set = set_with(Some(10), numeric(dec!(100), LoadUnit::Kg));
        assert_eq!(set_volume(&set, LoadUnit::Lbs), dec!(2204.62));
    }

    #[test]
    fn test_set_volume_lbs_to_kg() {
        let set = set_with(Some(1), numeric(dec!(220.462), LoadUnit::Lbs));
        let volume = set_volume(&set, LoadUnit::Kg);
        assert!((volume - dec!(100)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_set_volume_absent_reps() {
        let set = set_with(None, numeric(dec!(135), LoadUnit::Lbs));
        assert_eq!(set_volume(&set, LoadUnit::Lbs), Decimal::ZERO);
    }

    #[test]
    fn test_set_volume_zero_reps() {
        let set = set_with(Some(0), numeric(dec!(135), LoadUnit::Lbs));
        assert_eq!(set_volume(&set, LoadUnit::Lbs), Decimal::ZERO);
    }

    #[test]
    fn test_set_volume_bodyweight_and_band() {
        let bw = set_with(Some(20), Some(Load::Bodyweight));
        assert_eq!(set_volume(&bw, LoadUnit::Lbs), Decimal::ZERO);

        let band = set_with(
            Some(15),
            Some(Load::Band {
                color: "red".to_string(),
            }),
        );
        assert_eq!(set_volume(&band, LoadUnit::Lbs), Decimal::ZERO);
    }

    #[test]
    fn test_set_volume_absent_load() {
        let set = set_with(Some(12), None);
        assert_eq!(set_volume(&set, LoadUnit::Kg), Decimal::ZERO);
    }

    #[test]
    fn test_round_trip_conversion() {
        let original = dec!(142.5);
        let back = convert_load(
            convert_load(original, LoadUnit::Lbs, LoadUnit::Kg),
            LoadUnit::Kg,
            LoadUnit::Lbs,
        );
        assert!((back - original).abs() < dec!(0.000001));
    }

    #[test]
    fn test_aggregate_exercise_planned_only() {
        let planned = vec![
            set_with(Some(5), numeric(dec!(200), LoadUnit::Lbs)),
            set_with(Some(5), numeric(dec!(200), LoadUnit::Lbs)),
        ];
        let volume = aggregate_exercise(&instance(planned, Vec::new()), LoadUnit::Lbs);
        assert_eq!(volume.planned, dec!(2000));
        assert_eq!(volume.actual, None);
    }

    #[test]
    fn test_aggregate_exercise_with_actuals() {
        let planned = vec![set_with(Some(5), numeric(dec!(200), LoadUnit::Lbs))];
        let actual = vec![
            set_with(Some(5), numeric(dec!(195), LoadUnit::Lbs)),
            set_with(Some(4), numeric(dec!(195), LoadUnit::Lbs)),
        ];
        let volume = aggregate_exercise(&instance(planned, actual), LoadUnit::Lbs);
        assert_eq!(volume.planned, dec!(1000));
        assert_eq!(volume.actual, Some(dec!(1755)));
    }

    #[test]
    fn test_aggregate_exercise_all_zero_actuals_is_none() {
        // Recorded sets with no quantifiable volume report None, not 0
        let planned = vec![set_with(Some(10), numeric(dec!(50), LoadUnit::Lbs))];
        let actual = vec![
            set_with(Some(10), Some(Load::Bodyweight)),
            set_with(Some(10), Some(Load::Bodyweight)),
        ];
        let volume = aggregate_exercise(&instance(planned, actual), LoadUnit::Lbs);
        assert_eq!(volume.actual, None);
    }

    #[test]
    fn test_aggregate_exercise_mixed_zero_and_nonzero_actuals() {
        // One quantifiable set is enough to flip the whole total to Some,
        // zero-volume sets included in the sum
        let actual = vec![
            set_with(Some(10), Some(Load::Bodyweight)),
            set_with(Some(8), numeric(dec!(25), LoadUnit::Lbs)),
        ];
        let volume = aggregate_exercise(&instance(Vec::new(), actual), LoadUnit::Lbs);
        assert_eq!(volume.planned, Decimal::ZERO);
        assert_eq!(volume.actual, Some(dec!(200)));
    }
}
