use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use coursedesk_core::{
    errors::CourseError,
    models::attendance::{Attendance, ListAttendanceResponse, RecordAttendanceRequest},
};

use super::{course::course_not_found, required_text};
use crate::{
    middleware::error_handling::{AppError, AppJson},
    ApiState,
};

/// Records one attendance entry. Only enrolled students can be marked.
#[axum::debug_handler]
pub async fn record_attendance(
    State(state): State<Arc<ApiState>>,
    Path(course_id): Path<Uuid>,
    AppJson(payload): AppJson<RecordAttendanceRequest>,
) -> Result<(StatusCode, Json<Attendance>), AppError> {
    let student_id = required_text(payload.student_id.as_deref(), "studentId")?;
    let date = payload
        .date
        .ok_or_else(|| CourseError::Validation("date is required".to_string()))?;
    let status = payload
        .status
        .ok_or_else(|| CourseError::Validation("status is required".to_string()))?;

    // Held until the insert so an unenroll cannot slip in after the check
    let _gate = state.write_gate.lock().await;

    let course = state
        .repo
        .get_course(course_id)
        .await?
        .ok_or_else(|| course_not_found(course_id))?;
    if !course.is_enrolled(&student_id) {
        return Err(CourseError::Validation(format!(
            "Student {} is not enrolled in course {}",
            student_id, course_id
        ))
        .into());
    }

    let record = Attendance {
        id: Uuid::new_v4(),
        course_id,
        student_id,
        date,
        status,
        notes: payload
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };
    let stored = state.repo.insert_attendance(record).await?;
    tracing::debug!(
        "Attendance recorded: course={}, student={}, date={}, status={}",
        stored.course_id,
        stored.student_id,
        stored.date,
        stored.status
    );

    Ok((StatusCode::CREATED, Json(stored)))
}

#[axum::debug_handler]
pub async fn list_attendance(
    State(state): State<Arc<ApiState>>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<ListAttendanceResponse>, AppError> {
    if state.repo.get_course(course_id).await?.is_none() {
        return Err(course_not_found(course_id).into());
    }

    let records = state.repo.list_attendance(course_id).await?;
    Ok(Json(ListAttendanceResponse { records }))
}
