use thiserror::Error;

use crate::conflict::ConflictReport;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Schedule conflict: {}", .report.describe())]
    ScheduleConflict {
        slot_index: usize,
        report: ConflictReport,
    },

    #[error("Capacity reached: {0}")]
    Capacity(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CourseResult<T> = Result<T, CourseError>;
