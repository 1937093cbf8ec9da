//! Program import from the persistence collaborator's JSON shape
//!
//! The web application stores sets as camelCase JSON with the load as a
//! raw string token (numeric literal, "BW", or a band color). Import
//! converts that shape into the typed model, resolving the load token
//! into the tagged `Load` variant.

use crate::error::ImportExportError;
use crate::models::{
    ExerciseInstance, ExerciseKey, ExerciseSet, Load, LoadUnit, PeriodizationType, Program,
    ProgramWeek, ProgressionSettings,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProgram {
    id: String,
    name: String,
    total_weeks: u32,
    #[serde(default)]
    periodization_type: Option<String>,
    #[serde(default)]
    progression_settings: Option<RawProgressionSettings>,
    #[serde(default)]
    weeks: Vec<RawWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProgressionSettings {
    #[serde(default)]
    volume_increment_pct: Option<Decimal>,
    #[serde(default)]
    load_increment_pct: Option<Decimal>,
    #[serde(default)]
    weekly_volume_percentages: Vec<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeek {
    week_index: u32,
    #[serde(default)]
    exercise_instances: Vec<RawExerciseInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExerciseInstance {
    #[serde(default)]
    exercise_library_id: Option<String>,
    #[serde(default)]
    user_exercise_library_id: Option<String>,
    exercise_name: String,
    #[serde(default)]
    planned_sets: Vec<RawSet>,
    #[serde(default)]
    actual_sets: Vec<RawSet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSet {
    set_index: u32,
    #[serde(default)]
    reps: Option<u32>,
    #[serde(default)]
    load: Option<String>,
    #[serde(default)]
    load_unit: Option<String>,
    #[serde(default)]
    rest_seconds: u32,
    #[serde(default)]
    tempo: Option<String>,
    #[serde(default)]
    rpe: Option<Decimal>,
    #[serde(default)]
    rir: Option<Decimal>,
    #[serde(default)]
    distance_meters: Option<Decimal>,
    #[serde(default)]
    duration_seconds: Option<u32>,
}

/// Import a program from a JSON file in the web application's shape
pub fn import_program<P: AsRef<Path>>(path: P) -> Result<Program, ImportExportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportExportError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| ImportExportError::ParseError {
        format: "json".to_string(),
        reason: e.to_string(),
    })?;
    let program = parse_program(&contents)?;
    tracing::info!(
        program_id = %program.id,
        weeks = program.weeks.len(),
        "Imported program from {}",
        path.display()
    );
    Ok(program)
}

/// Parse a program from a JSON string in the web application's shape
pub fn parse_program(json: &str) -> Result<Program, ImportExportError> {
    let raw: RawProgram =
        serde_json::from_str(json).map_err(|e| ImportExportError::ParseError {
            format: "json".to_string(),
            reason: e.to_string(),
        })?;
    convert_program(raw)
}

fn convert_program(raw: RawProgram) -> Result<Program, ImportExportError> {
    let periodization_type = match raw.periodization_type.as_deref() {
        None => PeriodizationType::None,
        Some(token) => {
            token
                .parse::<PeriodizationType>()
                .map_err(|reason| ImportExportError::ParseError {
                    format: "json".to_string(),
                    reason,
                })?
        }
    };

    let progression_settings = match raw.progression_settings {
        Some(raw_settings) => ProgressionSettings {
            volume_increment_pct: raw_settings.volume_increment_pct.unwrap_or(Decimal::ZERO),
            load_increment_pct: raw_settings.load_increment_pct.unwrap_or(Decimal::ZERO),
            weekly_volume_percentages: raw_settings.weekly_volume_percentages,
        },
        None => ProgressionSettings::default(),
    };

    let weeks = raw
        .weeks
        .into_iter()
        .map(convert_week)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Program {
        id: raw.id,
        name: raw.name,
        total_weeks: raw.total_weeks,
        periodization_type,
        progression_settings,
        weeks,
    })
}

fn convert_week(raw: RawWeek) -> Result<ProgramWeek, ImportExportError> {
    let exercises = raw
        .exercise_instances
        .into_iter()
        .map(convert_instance)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProgramWeek {
        week_index: raw.week_index,
        exercises,
    })
}

fn convert_instance(raw: RawExerciseInstance) -> Result<ExerciseInstance, ImportExportError> {
    // The two id spaces are mutually exclusive
    let key = match (raw.exercise_library_id, raw.user_exercise_library_id) {
        (Some(id), None) => ExerciseKey::Library(id),
        (None, Some(id)) => ExerciseKey::UserLibrary(id),
        (None, None) => {
            return Err(ImportExportError::MissingData {
                field: format!("exercise id for \"{}\"", raw.exercise_name),
            })
        }
        (Some(_), Some(_)) => {
            return Err(ImportExportError::ParseError {
                format: "json".to_string(),
                reason: format!(
                    "exercise \"{}\" has both a library id and a user library id",
                    raw.exercise_name
                ),
            })
        }
    };

    Ok(ExerciseInstance {
        key,
        name: raw.exercise_name,
        planned_sets: raw.planned_sets.into_iter().map(convert_set).collect(),
        actual_sets: raw.actual_sets.into_iter().map(convert_set).collect(),
    })
}

fn convert_set(raw: RawSet) -> ExerciseSet {
    let unit = raw
        .load_unit
        .as_deref()
        .and_then(|token| token.parse::<LoadUnit>().ok())
        .unwrap_or_default();
    ExerciseSet {
        set_index: raw.set_index,
        reps: raw.reps,
        load: raw.load.as_deref().map(|token| Load::parse(token, unit)),
        rest_seconds: raw.rest_seconds,
        tempo: raw.tempo,
        rpe: raw.rpe,
        rir: raw.rir,
        distance_meters: raw.distance_meters,
        duration_seconds: raw.duration_seconds,
    }
}
