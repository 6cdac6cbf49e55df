use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use coursedesk_core::{
    errors::CourseError,
    models::course::{Course, EnrollStudentRequest, Enrollment},
};

use super::{course::course_not_found, required_text};
use crate::{
    middleware::error_handling::{AppError, AppJson},
    ApiState,
};

#[axum::debug_handler]
pub async fn enroll_student(
    State(state): State<Arc<ApiState>>,
    Path(course_id): Path<Uuid>,
    AppJson(payload): AppJson<EnrollStudentRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let student_id = required_text(payload.student_id.as_deref(), "studentId")?;

    let _gate = state.write_gate.lock().await;

    let mut course = state
        .repo
        .get_course(course_id)
        .await?
        .ok_or_else(|| course_not_found(course_id))?;

    if course.is_enrolled(&student_id) {
        return Err(CourseError::Duplicate(format!(
            "Student {} is already enrolled in course {}",
            student_id, course_id
        ))
        .into());
    }
    if course.is_full() {
        return Err(CourseError::Capacity(format!(
            "Course {} already has {} of {} students",
            course_id,
            course.students.len(),
            course.max_students
        ))
        .into());
    }

    let now = Utc::now();
    course.students.push(Enrollment {
        student_id: student_id.clone(),
        enrolled_at: now,
    });
    course.sync_student_count();
    course.updated_at = now;

    let updated = state
        .repo
        .update_course(course)
        .await?
        .ok_or_else(|| course_not_found(course_id))?;
    info!("Student {} enrolled in course {}", student_id, course_id);

    Ok((StatusCode::CREATED, Json(updated)))
}

#[axum::debug_handler]
pub async fn unenroll_student(
    State(state): State<Arc<ApiState>>,
    Path((course_id, student_id)): Path<(Uuid, String)>,
) -> Result<Json<Course>, AppError> {
    let _gate = state.write_gate.lock().await;

    let mut course = state
        .repo
        .get_course(course_id)
        .await?
        .ok_or_else(|| course_not_found(course_id))?;

    let before = course.students.len();
    course.students.retain(|s| s.student_id != student_id);
    if course.students.len() == before {
        return Err(CourseError::NotFound(format!(
            "Student {} is not enrolled in course {}",
            student_id, course_id
        ))
        .into());
    }
    course.sync_student_count();
    course.updated_at = Utc::now();

    let updated = state
        .repo
        .update_course(course)
        .await?
        .ok_or_else(|| course_not_found(course_id))?;
    info!("Student {} removed from course {}", student_id, course_id);

    Ok(Json(updated))
}
