//! Unified error hierarchy for liftrs
//!
//! Structural contract violations surface as errors; missing or malformed
//! per-set data never does (it degrades to documented zero/`None` values
//! inside the engine).

use crate::analysis::AnalysisError;
use crate::periodization::TargetError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all liftrs operations
#[derive(Debug, Error)]
pub enum LiftRsError {
    /// Program structure violated the analysis contract
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Target generation contract violation
    #[error("Target error: {0}")]
    Target(#[from] TargetError),

    /// Import/export errors
    #[error("Import/Export error: {0}")]
    ImportExport(#[from] ImportExportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Import and export errors
#[derive(Debug, Error)]
pub enum ImportExportError {
    /// File not found at specified path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Format-specific parsing error
    #[error("Parse error in {format}: {reason}")]
    ParseError { format: String, reason: String },

    /// Missing required data
    #[error("Missing required data: {field}")]
    MissingData { field: String },

    /// Unsupported export format
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Export failed
    #[error("Export failed to {path}: {reason}")]
    ExportFailed { path: PathBuf, reason: String },
}

/// Result type alias for liftrs operations
pub type Result<T> = std::result::Result<T, LiftRsError>;

impl LiftRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LiftRsError::ImportExport(ImportExportError::FileNotFound { .. }) => {
                ErrorSeverity::Warning
            }
            LiftRsError::Analysis(_) | LiftRsError::Target(_) => ErrorSeverity::Error,
            LiftRsError::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LiftRsError::ImportExport(ImportExportError::FileNotFound { path }) => {
                format!("Could not find program file: {}", path.display())
            }
            LiftRsError::ImportExport(ImportExportError::ParseError { reason, .. }) => {
                format!("Program file is not valid: {}", reason)
            }
            LiftRsError::Analysis(err) => {
                format!("Program structure is invalid: {}", err)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical | ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
