//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Coursedesk API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses, ensuring a consistent error handling experience across
//! the entire API.
//!
//! Every error body carries an `error` message. Schedule conflicts add the
//! structured result so clients can tell a room clash from a teacher clash:
//!
//! ```json
//! { "error": "Schedule conflict: room", "conflict": true, "reasons": ["room"], "slotIndex": 0 }
//! ```

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coursedesk_core::errors::CourseError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `CourseError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub CourseError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CourseError::NotFound(_) => StatusCode::NOT_FOUND,
            CourseError::Validation(_) => StatusCode::BAD_REQUEST,
            CourseError::Duplicate(_) => StatusCode::CONFLICT,
            CourseError::ScheduleConflict { .. } => StatusCode::CONFLICT,
            CourseError::Capacity(_) => StatusCode::CONFLICT,
            CourseError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CourseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = match &self.0 {
            CourseError::ScheduleConflict { slot_index, report } => json!({
                "error": message,
                "conflict": report.conflict,
                "reasons": report.reasons,
                "slotIndex": slot_index,
            }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Automatic conversion from CourseError to AppError
impl From<CourseError> for AppError {
    fn from(err: CourseError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `CourseError::Database`
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CourseError::Database(err))
    }
}

/// Malformed JSON bodies are client errors, reported as 400 rather than
/// axum's default 422.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(CourseError::Validation(rejection.body_text()))
    }
}

/// `Json` extractor whose rejection goes through [`AppError`]
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Maps a CourseError to an HTTP response
pub fn map_error(err: CourseError) -> Response {
    AppError(err).into_response()
}
