//! Analysis export for downstream tooling
//!
//! JSON mirrors the in-memory analysis exactly (the charting layer's
//! contract); CSV flattens the weekly series into rows for spreadsheets.

use crate::error::ImportExportError;
use crate::models::{ProgramVolumeAnalysis, VolumeDataPoint};
use rust_decimal::Decimal;
use std::path::Path;

/// Export a full analysis as pretty-printed JSON
pub fn export_json<P: AsRef<Path>>(
    analysis: &ProgramVolumeAnalysis,
    output_path: P,
) -> Result<(), ImportExportError> {
    let path = output_path.as_ref();
    let json =
        serde_json::to_string_pretty(analysis).map_err(|e| ImportExportError::ExportFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    std::fs::write(path, json).map_err(|e| ImportExportError::ExportFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!("Exported analysis to {}", path.display());
    Ok(())
}

/// Export weekly volume series to CSV
///
/// One row per (series, week): the overall program series first, then
/// each exercise's own series. Missing actual data exports as empty
/// cells, preserving the null-vs-zero distinction.
pub fn export_csv<P: AsRef<Path>>(
    analysis: &ProgramVolumeAnalysis,
    output_path: P,
) -> Result<(), ImportExportError> {
    let path = output_path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| ImportExportError::ExportFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    writer
        .write_record([
            "series",
            "week",
            "planned_volume",
            "actual_volume",
            "volume_difference",
            "volume_percentage",
        ])
        .map_err(|e| export_failed(path, e))?;

    for point in &analysis.overall_volume_data {
        write_point(&mut writer, "overall", point).map_err(|e| export_failed(path, e))?;
    }
    for exercise in &analysis.exercise_data {
        for point in &exercise.weekly_data {
            write_point(&mut writer, &exercise.name, point).map_err(|e| export_failed(path, e))?;
        }
    }

    writer.flush().map_err(|e| ImportExportError::ExportFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!("Exported analysis to {}", path.display());
    Ok(())
}

fn write_point(
    writer: &mut csv::Writer<std::fs::File>,
    series: &str,
    point: &VolumeDataPoint,
) -> Result<(), csv::Error> {
    writer.write_record([
        series.to_string(),
        point.week.to_string(),
        point.planned_volume.to_string(),
        optional_cell(point.actual_volume),
        optional_cell(point.volume_difference),
        optional_cell(point.volume_percentage),
    ])
}

fn optional_cell(value: Option<Decimal>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

fn export_failed(path: &Path, err: csv::Error) -> ImportExportError {
    ImportExportError::ExportFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseKey, ExerciseVolumeData, LoadUnit};
    use rust_decimal_macros::dec;

    fn sample_analysis() -> ProgramVolumeAnalysis {
        ProgramVolumeAnalysis {
            program_id: "prog-1".to_string(),
            program_name: "Block".to_string(),
            unit: LoadUnit::Lbs,
            exercise_data: vec![ExerciseVolumeData {
                key: ExerciseKey::Library("squat".to_string()),
                name: "Back Squat".to_string(),
                weekly_data: vec![VolumeDataPoint {
                    week: 1,
                    planned_volume: dec!(1000),
                    actual_volume: Some(dec!(950)),
                    volume_difference: Some(dec!(-50)),
                    volume_percentage: Some(dec!(95)),
                }],
                total_planned_volume: dec!(1000),
                total_actual_volume: Some(dec!(950)),
                average_volume_percentage: Some(dec!(95)),
            }],
            overall_volume_data: vec![
                VolumeDataPoint {
                    week: 1,
                    planned_volume: dec!(1000),
                    actual_volume: Some(dec!(950)),
                    volume_difference: Some(dec!(-50)),
                    volume_percentage: Some(dec!(95)),
                },
                VolumeDataPoint {
                    week: 2,
                    planned_volume: dec!(1100),
                    actual_volume: None,
                    volume_difference: None,
                    volume_percentage: None,
                },
            ],
            total_planned_volume: dec!(2100),
            total_actual_volume: Some(dec!(950)),
        }
    }

    #[test]
    fn test_export_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        let analysis = sample_analysis();

        export_json(&analysis, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: ProgramVolumeAnalysis = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, analysis);
    }

    #[test]
    fn test_export_csv_rows_and_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.csv");

        export_csv(&sample_analysis(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        // Header + 2 overall weeks + 1 squat week
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("overall,1,1000,950"));
        // Week 2 has no actual data: empty trailing cells, not zeros
        assert_eq!(lines[2], "overall,2,1100,,,");
        assert!(lines[3].starts_with("Back Squat,1,1000"));
    }

    #[test]
    fn test_export_to_bad_path_fails() {
        let result = export_csv(&sample_analysis(), "/nonexistent/dir/analysis.csv");
        assert!(matches!(
            result,
            Err(ImportExportError::ExportFailed { .. })
        ));
    }
}
