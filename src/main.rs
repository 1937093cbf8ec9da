use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use liftrs::adherence::AdherenceScorer;
use liftrs::analysis::VolumeAnalyzer;
use liftrs::config::AppConfig;
use liftrs::export;
use liftrs::import::import_program;
use liftrs::logging::{init_logging, LogLevel};
use liftrs::models::{LoadUnit, PeriodizationType, Program, ProgramVolumeAnalysis, ProgressionSettings};
use liftrs::periodization::TargetGenerator;
use liftrs::progression::ProgressionClassifier;

/// liftrs - Training Volume Analysis CLI
///
/// Analyzes multi-week resistance-training programs: planned vs actual
/// volume, progression classification, periodization targets, and
/// adherence scoring.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(version = "0.1.0")]
#[command(about = "Training Volume Analysis CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze planned vs actual training volume for a program
    Analyze {
        /// Program file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Load unit for all volume numbers (lbs, kg)
        #[arg(short, long)]
        unit: Option<LoadUnit>,
    },

    /// Classify a program's volume progression pattern
    Progression {
        /// Program file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Load unit for all volume numbers (lbs, kg)
        #[arg(short, long)]
        unit: Option<LoadUnit>,
    },

    /// Generate periodization volume-percentage targets
    Targets {
        /// Periodization type (none, linear, undulating)
        #[arg(short, long)]
        periodization: PeriodizationType,

        /// Program length in weeks
        #[arg(short, long)]
        weeks: u32,

        /// Weekly volume increment percentage (linear periodization)
        #[arg(long, default_value_t = Decimal::ZERO)]
        volume_increment: Decimal,
    },

    /// Score adherence of recorded training against the plan
    Adherence {
        /// Program file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Load unit for all volume numbers (lbs, kg)
        #[arg(short, long)]
        unit: Option<LoadUnit>,
    },

    /// Export an analysis to CSV or JSON
    Export {
        /// Program file (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (csv, json)
        #[arg(short = 'F', long, default_value = "csv")]
        format: String,

        /// Load unit for all volume numbers (lbs, kg)
        #[arg(short, long)]
        unit: Option<LoadUnit>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    let mut log_config = config.logging.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&log_config)?;

    match cli.command {
        Commands::Analyze { file, unit } => {
            let unit = unit.unwrap_or(config.settings.preferred_unit);
            let analysis = load_and_analyze(&file, unit)?;
            print_analysis(&analysis);
        }

        Commands::Progression { file, unit } => {
            let unit = unit.unwrap_or(config.settings.preferred_unit);
            let analysis = load_and_analyze(&file, unit)?;
            let planned: Vec<Decimal> = analysis
                .overall_volume_data
                .iter()
                .map(|point| point.planned_volume)
                .collect();
            let progression = ProgressionClassifier::classify(&planned);

            println!("{}", "Volume progression".cyan().bold());
            println!("  Pattern:          {:?}", progression.progression_type);
            println!(
                "  Progressive:      {}",
                if progression.is_progressive { "yes" } else { "no" }
            );
            println!(
                "  Avg weekly change: {}%",
                progression.average_weekly_increase_pct.round_dp(2)
            );
            println!(
                "  Consistency:      {}/100",
                progression.consistency.round_dp(1)
            );
        }

        Commands::Targets {
            periodization,
            weeks,
            volume_increment,
        } => {
            let settings = ProgressionSettings {
                volume_increment_pct: volume_increment,
                ..ProgressionSettings::default()
            };
            let targets = TargetGenerator::weekly_targets(periodization, weeks, &settings)?;

            println!("{}", "Weekly volume targets".green().bold());
            let rows: Vec<TargetRow> = targets
                .iter()
                .enumerate()
                .map(|(i, target)| TargetRow {
                    week: i as u32 + 1,
                    target_pct: format!("{}%", target.round_dp(1)),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::sharp()));
        }

        Commands::Adherence { file, unit } => {
            let unit = unit.unwrap_or(config.settings.preferred_unit);
            let analysis = load_and_analyze(&file, unit)?;
            let planned: Vec<Decimal> = analysis
                .overall_volume_data
                .iter()
                .map(|point| point.planned_volume)
                .collect();
            let actual: Vec<Option<Decimal>> = analysis
                .overall_volume_data
                .iter()
                .map(|point| point.actual_volume)
                .collect();
            let report = AdherenceScorer::score(&planned, &actual);

            println!("{}", "Adherence".blue().bold());
            let rows: Vec<AdherenceRow> = report
                .planned_pct
                .iter()
                .zip(&report.actual_pct)
                .enumerate()
                .map(|(i, (planned, actual))| AdherenceRow {
                    week: i as u32 + 1,
                    planned_pct: format!("{}%", planned.round_dp(1)),
                    actual_pct: actual
                        .map_or_else(|| "NA".to_string(), |pct| format!("{}%", pct.round_dp(1))),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::sharp()));
            match report.consistency {
                Some(score) => println!("  Consistency: {}/100", score.round_dp(1)),
                None => println!("  Consistency: not enough data"),
            }
        }

        Commands::Export {
            file,
            output,
            format,
            unit,
        } => {
            let unit = unit.unwrap_or(config.settings.preferred_unit);
            let analysis = load_and_analyze(&file, unit)?;
            match format.as_str() {
                "csv" => export::export_csv(&analysis, &output)?,
                "json" => export::export_json(&analysis, &output)?,
                other => anyhow::bail!("Unsupported export format: {}", other),
            }
            println!(
                "{}",
                format!("Exported analysis to {}", output.display()).green()
            );
        }
    }

    Ok(())
}

fn load_and_analyze(file: &PathBuf, unit: LoadUnit) -> Result<ProgramVolumeAnalysis> {
    let program: Program = import_program(file)?;
    tracing::info!(program = %program.name, ?unit, "Analyzing program");
    let analysis = VolumeAnalyzer::new(unit).analyze(&program)?;
    Ok(analysis)
}

fn print_analysis(analysis: &ProgramVolumeAnalysis) {
    println!(
        "{} {}",
        "Program:".bold(),
        analysis.program_name.as_str().cyan()
    );
    println!("Unit: {:?}", analysis.unit);

    println!("\n{}", "Weekly volume".bold());
    let week_rows: Vec<WeekRow> = analysis
        .overall_volume_data
        .iter()
        .map(|point| WeekRow {
            week: point.week,
            planned: point.planned_volume.round_dp(1).to_string(),
            actual: optional(point.actual_volume),
            difference: optional(point.volume_difference),
            percentage: point
                .volume_percentage
                .map_or_else(|| "-".to_string(), |pct| format!("{}%", pct.round_dp(1))),
        })
        .collect();
    println!("{}", Table::new(week_rows).with(Style::sharp()));

    println!("\n{}", "Per exercise".bold());
    let exercise_rows: Vec<ExerciseRow> = analysis
        .exercise_data
        .iter()
        .map(|exercise| ExerciseRow {
            exercise: exercise.name.clone(),
            weeks: exercise.weekly_data.len(),
            planned: exercise.total_planned_volume.round_dp(1).to_string(),
            actual: optional(exercise.total_actual_volume),
            avg_pct: exercise
                .average_volume_percentage
                .map_or_else(|| "-".to_string(), |pct| format!("{}%", pct.round_dp(1))),
        })
        .collect();
    println!("{}", Table::new(exercise_rows).with(Style::sharp()));

    println!(
        "\nTotal planned: {}  Total actual: {}",
        analysis.total_planned_volume.round_dp(1),
        optional(analysis.total_actual_volume)
    );
}

fn optional(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.round_dp(1).to_string())
}

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Planned")]
    planned: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Diff")]
    difference: String,
    #[tabled(rename = "Actual %")]
    percentage: String,
}

#[derive(Tabled)]
struct ExerciseRow {
    #[tabled(rename = "Exercise")]
    exercise: String,
    #[tabled(rename = "Weeks")]
    weeks: usize,
    #[tabled(rename = "Planned")]
    planned: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Avg %")]
    avg_pct: String,
}

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Target")]
    target_pct: String,
}

#[derive(Tabled)]
struct AdherenceRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Planned %")]
    planned_pct: String,
    #[tabled(rename = "Actual %")]
    actual_pct: String,
}
