//! Standalone conflict check used by the course form before submission.
//! Read-only: nothing is stored and the write gate is not taken.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use coursedesk_core::{
    conflict::ConflictReport,
    errors::CourseError,
    index::ScheduleIndex,
    models::schedule::{CheckConflictRequest, CheckConflictResponse, SlotCandidate},
};

use super::resolve_teacher;
use crate::{middleware::error_handling::AppError, ApiState};

/// `POST /api/courses/check-conflict`
///
/// Returns `{conflict, reasons}`. Invalid payloads (missing field, bad
/// time, unknown teacher) get a 400 with `{conflict: false, reasons: [],
/// message}`; storage failures fall through to the usual error body.
pub async fn check_conflict(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CheckConflictRequest>, JsonRejection>,
) -> Response {
    match evaluate(&state, payload).await {
        Ok(report) => Json(CheckConflictResponse::from(report)).into_response(),
        Err(CourseError::Validation(message)) => {
            debug!("Rejected conflict check: {}", message);
            (StatusCode::BAD_REQUEST, Json(CheckConflictResponse::invalid(message))).into_response()
        }
        Err(err) => AppError(err).into_response(),
    }
}

async fn evaluate(
    state: &ApiState,
    payload: Result<Json<CheckConflictRequest>, JsonRejection>,
) -> Result<ConflictReport, CourseError> {
    let Json(request) = payload.map_err(|rejection| CourseError::Validation(rejection.body_text()))?;

    let candidate = SlotCandidate::try_from(&request.slot)?;
    let teacher = resolve_teacher(state.repo.as_ref(), request.teacher_id.as_deref()).await?;

    let courses = state.repo.list_courses().await?;
    let report = ScheduleIndex::build(&courses).check(&candidate, teacher.id);
    debug!(
        "Conflict check: day={}, {}-{}, room={}, teacher={} -> {}",
        candidate.day_of_week,
        candidate.start_time,
        candidate.end_time,
        candidate.room,
        teacher.id,
        report.describe()
    );

    Ok(report)
}
