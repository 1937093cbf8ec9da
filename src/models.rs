use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Load units supported for volume calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadUnit {
    Lbs,
    Kg,
}

impl Default for LoadUnit {
    fn default() -> Self {
        LoadUnit::Lbs
    }
}

impl std::str::FromStr for LoadUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbs" | "lb" | "pounds" => Ok(LoadUnit::Lbs),
            "kg" | "kgs" | "kilograms" => Ok(LoadUnit::Kg),
            _ => Err(format!("Invalid load unit: {}", s)),
        }
    }
}

/// Training load prescribed or performed for a single set
///
/// Only `Numeric` loads carry quantifiable volume. Bodyweight and band
/// loads contribute zero volume by convention: bands have no canonical
/// weight equivalent, and bodyweight is not tracked by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Load {
    /// Quantifiable external load with its recording unit
    Numeric { value: Decimal, unit: LoadUnit },
    /// Bodyweight only
    Bodyweight,
    /// Resistance band identified by color
    Band { color: String },
}

impl Load {
    /// Parse a raw load token from the persistence layer
    ///
    /// Accepts a numeric literal, a bodyweight marker ("BW", case
    /// insensitive), or any other token treated as a band color.
    pub fn parse(raw: &str, unit: LoadUnit) -> Load {
        let token = raw.trim();
        if let Ok(value) = token.parse::<Decimal>() {
            return Load::Numeric { value, unit };
        }
        match token.to_lowercase().as_str() {
            "bw" | "bodyweight" => Load::Bodyweight,
            _ => Load::Band {
                color: token.to_string(),
            },
        }
    }

    /// Numeric value and unit, if this load is quantifiable
    pub fn as_numeric(&self) -> Option<(Decimal, LoadUnit)> {
        match self {
            Load::Numeric { value, unit } => Some((*value, *unit)),
            _ => None,
        }
    }
}

/// Identity of an exercise inside a program week
///
/// An exercise comes from either the shared library catalog or the user's
/// personal library; the two id spaces are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKey {
    /// Exercise from the shared library catalog
    Library(String),
    /// User-defined exercise
    UserLibrary(String),
}

impl ExerciseKey {
    pub fn id(&self) -> &str {
        match self {
            ExerciseKey::Library(id) => id,
            ExerciseKey::UserLibrary(id) => id,
        }
    }
}

/// A single planned or performed set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Position within the exercise, 1-based
    pub set_index: u32,

    /// Prescribed or performed repetitions
    pub reps: Option<u32>,

    /// Training load for this set
    pub load: Option<Load>,

    /// Rest after this set in seconds
    pub rest_seconds: u32,

    /// 4-phase tempo code (eccentric, pause, concentric, pause)
    pub tempo: Option<String>,

    /// Rate of perceived exertion
    pub rpe: Option<Decimal>,

    /// Reps in reserve
    pub rir: Option<Decimal>,

    /// Distance for non-rep exercise families (meters)
    pub distance_meters: Option<Decimal>,

    /// Working duration for non-rep exercise families (seconds)
    pub duration_seconds: Option<u32>,
}

impl ExerciseSet {
    /// A bare set with no prescription, at the given 1-based position
    pub fn new(set_index: u32) -> Self {
        ExerciseSet {
            set_index,
            reps: None,
            load: None,
            rest_seconds: 0,
            tempo: None,
            rpe: None,
            rir: None,
            distance_meters: None,
            duration_seconds: None,
        }
    }
}

/// One occurrence of an exercise inside one program week
///
/// `actual_sets` is empty until a session is logged; the engine treats the
/// whole structure as read-only once an analysis begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseInstance {
    pub key: ExerciseKey,
    pub name: String,
    pub planned_sets: Vec<ExerciseSet>,
    pub actual_sets: Vec<ExerciseSet>,
}

/// All exercise instances programmed for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramWeek {
    /// Week position within the program, 1-based
    pub week_index: u32,
    pub exercises: Vec<ExerciseInstance>,
}

/// Declared periodization strategy for a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodizationType {
    None,
    Linear,
    Undulating,
}

impl std::str::FromStr for PeriodizationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(PeriodizationType::None),
            "linear" => Ok(PeriodizationType::Linear),
            "undulating" => Ok(PeriodizationType::Undulating),
            _ => Err(format!("Invalid periodization type: {}", s)),
        }
    }
}

/// Progression settings declared on a program
///
/// `weekly_volume_percentages`, when non-empty, is a manual per-week
/// override of the generated target curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSettings {
    /// Weekly volume increment for linear periodization (percent)
    pub volume_increment_pct: Decimal,

    /// Weekly load increment for linear periodization (percent)
    pub load_increment_pct: Decimal,

    /// Manual per-week volume percentage override
    pub weekly_volume_percentages: Vec<Decimal>,
}

impl Default for ProgressionSettings {
    fn default() -> Self {
        ProgressionSettings {
            volume_increment_pct: Decimal::ZERO,
            load_increment_pct: Decimal::ZERO,
            weekly_volume_percentages: Vec::new(),
        }
    }
}

/// A complete multi-week training program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub total_weeks: u32,
    pub periodization_type: PeriodizationType,
    pub progression_settings: ProgressionSettings,
    pub weeks: Vec<ProgramWeek>,
}

impl Program {
    /// Create an empty program shell with a generated id
    pub fn new(
        name: impl Into<String>,
        total_weeks: u32,
        periodization_type: PeriodizationType,
    ) -> Self {
        Program {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            total_weeks,
            periodization_type,
            progression_settings: ProgressionSettings::default(),
            weeks: Vec::new(),
        }
    }

    /// Look up a week by its 1-based index
    pub fn week(&self, week_index: u32) -> Option<&ProgramWeek> {
        self.weeks.iter().find(|w| w.week_index == week_index)
    }
}

/// Planned/actual volume for one week of one series
///
/// `None` actual fields mean no actual data was recorded for the week,
/// which is strictly distinct from a recorded zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDataPoint {
    pub week: u32,
    pub planned_volume: Decimal,
    pub actual_volume: Option<Decimal>,
    pub volume_difference: Option<Decimal>,
    pub volume_percentage: Option<Decimal>,
}

/// Weekly volume series and totals for a single exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseVolumeData {
    pub key: ExerciseKey,
    pub name: String,

    /// One entry per week the exercise was programmed; unprogrammed weeks
    /// are skipped, not zero-filled
    pub weekly_data: Vec<VolumeDataPoint>,

    pub total_planned_volume: Decimal,
    pub total_actual_volume: Option<Decimal>,
    pub average_volume_percentage: Option<Decimal>,
}

/// Full program volume analysis for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramVolumeAnalysis {
    pub program_id: String,
    pub program_name: String,

    /// Unit every volume number in this analysis is expressed in
    pub unit: LoadUnit,

    pub exercise_data: Vec<ExerciseVolumeData>,

    /// Program-wide series, always `total_weeks` entries
    pub overall_volume_data: Vec<VolumeDataPoint>,

    pub total_planned_volume: Decimal,
    pub total_actual_volume: Option<Decimal>,
}
