//! Error types for building a rota.

use thiserror::Error;

use crate::schedule::Role;

/// Errors that stop a rota from being generated.
///
/// Everything here is fatal for the run: the assembler never hands back a
/// partial schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No weekday was configured as a meeting day.
    #[error("no meeting days configured")]
    NoMeetingDays,

    /// A role has nobody eligible to fill it.
    #[error("nobody is eligible for the {0} role")]
    EmptyRolePool(Role),

    /// Every eligible person was excluded, even after falling back to the
    /// full eligibility pool.
    #[error("no eligible candidate for {role} on {label}")]
    NoEligibleCandidate { role: Role, label: String },

    /// A configured date did not match the configured date format.
    #[error("invalid date '{value}': expected format '{format}'")]
    InvalidDate { value: String, format: String },

    /// A configured weekday name was not recognised.
    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),

    /// The end date is not after the start date.
    #[error("end date {end} is not after start date {start}")]
    EmptyRange { start: String, end: String },

    /// An input file was missing a required column.
    #[error("missing '{column}' column in {file}")]
    MissingColumn { column: &'static str, file: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    /// Returns true if this error comes from the run configuration rather
    /// than from the input data or the filesystem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::NoMeetingDays
                | ScheduleError::InvalidDate { .. }
                | ScheduleError::UnknownWeekday(_)
                | ScheduleError::EmptyRange { .. }
        )
    }
}
