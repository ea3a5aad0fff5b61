//! Error types for the attendance engine.
//!
//! Only structural failures are errors. Per-record anomalies such as an
//! unparseable punch timestamp or an unknown leave code are absorbed into the
//! day-status vocabulary and never surface here.

use thiserror::Error;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::MissingColumn {
///     table: "leave".to_string(),
///     column: "Employee Id".to_string(),
/// };
/// assert_eq!(error.to_string(), "leave table is missing required column 'Employee Id'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input table could not be opened or read.
    #[error("Failed to read input '{path}': {message}")]
    InputRead {
        /// The path (or stream label) of the input.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// An input table lacks a column the engine cannot work without.
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn {
        /// Which table ("punch" or "leave").
        table: String,
        /// The display name of the missing column.
        column: String,
    },

    /// The punch table holds no dated record, so the month is unknown.
    #[error("No valid punch dates found; cannot determine the reporting month")]
    NoPunchDates,

    /// A clock time was not a valid `HH:MM` value.
    #[error("Invalid clock time '{value}': expected HH:MM")]
    InvalidClockTime {
        /// The rejected value.
        value: String,
    },

    /// The spreadsheet writer failed.
    #[error("Failed to render report: {message}")]
    RenderError {
        /// A description of the writer error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<rust_xlsxwriter::XlsxError> for EngineError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        EngineError::RenderError {
            message: error.to_string(),
        }
    }
}
