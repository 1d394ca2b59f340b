//! Error types for timetable generation.

use thiserror::Error;

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building inputs or generating combinations.
#[derive(Error, Debug)]
pub enum Error {
    /// A meeting's time range could not be parsed.
    #[error("Invalid time range '{input}': {reason}")]
    TimeParse {
        /// The offending text.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Input does not follow the expected course/section/meeting shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generator configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON parsing or serialization error at the wire boundary.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn time_parse(input: &str, reason: impl Into<String>) -> Self {
        Error::TimeParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
