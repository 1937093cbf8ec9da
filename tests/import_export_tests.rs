use liftrs::analysis::VolumeAnalyzer;
use liftrs::error::ImportExportError;
use liftrs::export::{export_csv, export_json};
use liftrs::import::import_program;
use liftrs::models::{LoadUnit, PeriodizationType, ProgramVolumeAnalysis};
use rust_decimal_macros::dec;
use std::io::Write;

/// File-based import/export tests using the web application's JSON shape

const PROGRAM_JSON: &str = r#"{
    "id": "prog-42",
    "name": "Push Pull Legs",
    "totalWeeks": 2,
    "periodizationType": "Undulating",
    "weeks": [
        {
            "weekIndex": 1,
            "exerciseInstances": [
                {
                    "exerciseLibraryId": "deadlift",
                    "exerciseName": "Deadlift",
                    "plannedSets": [
                        {"setIndex": 1, "reps": 5, "load": "140", "loadUnit": "kg", "restSeconds": 180},
                        {"setIndex": 2, "reps": 5, "load": "140", "loadUnit": "kg", "restSeconds": 180}
                    ],
                    "actualSets": [
                        {"setIndex": 1, "reps": 5, "load": "140", "loadUnit": "kg", "restSeconds": 200},
                        {"setIndex": 2, "reps": 3, "load": "140", "loadUnit": "kg", "restSeconds": 0}
                    ]
                },
                {
                    "exerciseLibraryId": "pullup",
                    "exerciseName": "Pull-Up",
                    "plannedSets": [
                        {"setIndex": 1, "reps": 10, "load": "BW", "restSeconds": 90}
                    ],
                    "actualSets": [
                        {"setIndex": 1, "reps": 10, "load": "BW", "restSeconds": 90}
                    ]
                }
            ]
        },
        {
            "weekIndex": 2,
            "exerciseInstances": [
                {
                    "exerciseLibraryId": "deadlift",
                    "exerciseName": "Deadlift",
                    "plannedSets": [
                        {"setIndex": 1, "reps": 5, "load": "145", "loadUnit": "kg", "restSeconds": 180}
                    ]
                }
            ]
        }
    ]
}"#;

fn write_program_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("program.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(PROGRAM_JSON.as_bytes()).unwrap();
    path
}

#[test]
fn test_import_and_analyze_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_program_file(&dir);

    let program = import_program(&path).unwrap();
    assert_eq!(program.id, "prog-42");
    assert_eq!(program.periodization_type, PeriodizationType::Undulating);

    let analysis = VolumeAnalyzer::new(LoadUnit::Kg).analyze(&program).unwrap();

    // Deadlift week 1: planned 1400, actual 700 + 420
    let week1 = &analysis.overall_volume_data[0];
    assert_eq!(week1.planned_volume, dec!(1400));
    assert_eq!(week1.actual_volume, Some(dec!(1120)));

    // Pull-ups are bodyweight: zero quantifiable volume, and their
    // logged session alone would not count as actual data
    let pullup = analysis
        .exercise_data
        .iter()
        .find(|e| e.name == "Pull-Up")
        .unwrap();
    assert_eq!(pullup.total_planned_volume, dec!(0));
    assert_eq!(pullup.total_actual_volume, None);
}

#[test]
fn test_import_respects_set_units() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_program_file(&dir);
    let program = import_program(&path).unwrap();

    // Sets recorded in kg, analysis requested in lbs
    let analysis = VolumeAnalyzer::new(LoadUnit::Lbs).analyze(&program).unwrap();
    let week1 = &analysis.overall_volume_data[0];
    // 1400 kg-volume * 2.20462
    assert_eq!(week1.planned_volume, dec!(3086.468));
}

#[test]
fn test_export_import_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let program_path = write_program_file(&dir);
    let out_path = dir.path().join("analysis.json");

    let program = import_program(&program_path).unwrap();
    let analysis = VolumeAnalyzer::new(LoadUnit::Kg).analyze(&program).unwrap();
    export_json(&analysis, &out_path).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: ProgramVolumeAnalysis = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed, analysis);
}

#[test]
fn test_export_csv_contains_all_series() {
    let dir = tempfile::tempdir().unwrap();
    let program_path = write_program_file(&dir);
    let out_path = dir.path().join("analysis.csv");

    let program = import_program(&program_path).unwrap();
    let analysis = VolumeAnalyzer::new(LoadUnit::Kg).analyze(&program).unwrap();
    export_csv(&analysis, &out_path).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    // Header + 2 overall + 2 deadlift + 1 pull-up
    assert_eq!(contents.lines().count(), 6);
    assert!(contents.contains("overall,1,1400,1120"));
    assert!(contents.contains("Deadlift,2,725,,,"));
}

#[test]
fn test_import_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let result = import_program(dir.path().join("absent.json"));
    assert!(matches!(
        result,
        Err(ImportExportError::FileNotFound { .. })
    ));
}

#[test]
fn test_import_garbage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "definitely not json").unwrap();
    let result = import_program(&path);
    assert!(matches!(result, Err(ImportExportError::ParseError { .. })));
}
