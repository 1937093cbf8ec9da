// Library interface for the liftrs volume analysis engine
// This allows integration tests and the CLI to access the core functionality

pub mod adherence;
pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod periodization;
pub mod progression;
pub mod tempo;
pub mod volume;

// Re-export commonly used types for convenience
pub use adherence::{AdherenceReport, AdherenceScorer};
pub use analysis::{AnalysisError, VolumeAnalyzer};
pub use error::{LiftRsError, Result};
pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use periodization::{TargetError, TargetGenerator};
pub use progression::{ProgressionClassifier, ProgressionType, VolumeProgression};
