//! Error types for the liftlog_core library.

use chrono::NaiveDate;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftlog_core operations
///
/// The unit converter, date classifier and overload classifier are total
/// functions and never produce these; errors only come from parsing user
/// input and from the local store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A date string that is not a `YYYY-MM-DD` key
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A unit name other than kg or lbs
    #[error("Invalid weight unit: {0} (expected kg or lbs)")]
    InvalidUnit(String),

    /// Exercise id not present in the catalog
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Meal logging is closed for this date (weekend or future)
    #[error("Meals cannot be logged for {date}: {reason}")]
    MealLogClosed { date: NaiveDate, reason: String },

    /// A set or meal entry with values the store refuses to record
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
