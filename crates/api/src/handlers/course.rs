//! # Course Handlers
//!
//! Course creation and schedule updates are the only writes that can break
//! the booking invariant: no two persisted slots may share a room, or a
//! teacher, on the same weekday with overlapping times. Both run the same
//! sequence while holding the write gate:
//!
//! 1. Snapshot every stored course
//! 2. Build a [`ScheduleIndex`] over the snapshot (minus the course being
//!    edited, on update)
//! 3. Check each submitted slot against the index and against its siblings
//! 4. Persist only if nothing conflicts; the whole course is rejected
//!    otherwise

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use coursedesk_core::{
    errors::CourseError,
    index::{ScheduleIndex, SlotConflict},
    models::{
        course::{Course, CreateCourseRequest, ListCoursesResponse, UpdateCourseRequest},
        schedule::{ScheduleSlot, SlotCandidate},
    },
};

use super::{parse_schedule, required_text, resolve_teacher};
use crate::{
    middleware::error_handling::{AppError, AppJson},
    ApiState,
};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 200;
/// Largest cap the PostgreSQL `INTEGER` column can hold
const MAX_STUDENTS_CAP: u32 = i32::MAX as u32;

#[derive(Debug, Deserialize)]
pub struct ListCoursesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_courses(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<ListCoursesResponse>, AppError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if page == 0 || limit == 0 {
        return Err(CourseError::Validation("page and limit must be at least 1".to_string()).into());
    }
    let limit = limit.min(MAX_LIMIT);

    let offset = (page as usize - 1) * limit as usize;
    let courses = state.repo.page_courses(offset, limit as usize).await?;
    let total = state.repo.count_courses().await?;

    Ok(Json(ListCoursesResponse {
        courses,
        total,
        page,
        limit,
    }))
}

#[axum::debug_handler]
pub async fn get_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = state
        .repo
        .get_course(id)
        .await?
        .ok_or_else(|| course_not_found(id))?;

    Ok(Json(course))
}

#[axum::debug_handler]
pub async fn create_course(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let title = required_text(payload.title.as_deref(), "title")?;
    let slots = parse_schedule(&payload.schedule)?;
    check_date_range(payload.start_date, payload.end_date)?;
    let max_students = check_max_students(payload.max_students.unwrap_or(0))?;

    let _gate = state.write_gate.lock().await;

    let teacher = resolve_teacher(state.repo.as_ref(), payload.teacher_id.as_deref()).await?;

    let existing = state.repo.list_courses().await?;
    let index = ScheduleIndex::build(&existing);
    if let Some(conflict) = index.check_batch(&slots, teacher.id) {
        return Err(reject_conflict(&title, conflict));
    }

    let now = Utc::now();
    let course = Course {
        id: Uuid::new_v4(),
        title,
        description: payload.description.unwrap_or_default(),
        teacher_id: teacher.id,
        teacher_name: Some(teacher.name),
        students: Vec::new(),
        start_date: payload.start_date,
        end_date: payload.end_date,
        status: payload.status.unwrap_or_default(),
        max_students,
        current_students: 0,
        schedule: slots.into_iter().map(ScheduleSlot::from_candidate).collect(),
        created_at: now,
        updated_at: now,
    };

    let created = state.repo.insert_course(course).await?;
    info!(
        "Course created: id={}, title={}, slots={}",
        created.id,
        created.title,
        created.schedule.len()
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Merges the provided fields into the stored course. A new schedule, or a
/// new teacher, is re-checked against every other course.
#[axum::debug_handler]
pub async fn update_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    let new_slots = payload.schedule.as_deref().map(parse_schedule).transpose()?;

    let _gate = state.write_gate.lock().await;

    let mut course = state
        .repo
        .get_course(id)
        .await?
        .ok_or_else(|| course_not_found(id))?;

    if let Some(title) = payload.title.as_deref() {
        course.title = required_text(Some(title), "title")?;
    }
    if let Some(description) = payload.description {
        course.description = description;
    }
    if let Some(status) = payload.status {
        course.status = status;
    }
    if let Some(start_date) = payload.start_date {
        course.start_date = Some(start_date);
    }
    if let Some(end_date) = payload.end_date {
        course.end_date = Some(end_date);
    }
    check_date_range(course.start_date, course.end_date)?;

    if let Some(max_students) = payload.max_students {
        let max_students = check_max_students(max_students)?;
        if max_students > 0 && (max_students as usize) < course.students.len() {
            return Err(CourseError::Validation(format!(
                "maxStudents {} is below the {} students already enrolled",
                max_students,
                course.students.len()
            ))
            .into());
        }
        course.max_students = max_students;
    }

    let mut teacher_changed = false;
    if payload.teacher_id.is_some() {
        let teacher = resolve_teacher(state.repo.as_ref(), payload.teacher_id.as_deref()).await?;
        teacher_changed = teacher.id != course.teacher_id;
        course.teacher_id = teacher.id;
        course.teacher_name = Some(teacher.name);
    }

    if new_slots.is_some() || teacher_changed {
        let candidates: Vec<SlotCandidate> = match &new_slots {
            Some(slots) => slots.clone(),
            None => course.schedule.iter().map(SlotCandidate::from).collect(),
        };

        let existing = state.repo.list_courses().await?;
        let index = ScheduleIndex::build_excluding(&existing, course.id);
        if let Some(conflict) = index.check_batch(&candidates, course.teacher_id) {
            return Err(reject_conflict(&course.title, conflict));
        }

        if let Some(slots) = new_slots {
            course.schedule = slots.into_iter().map(ScheduleSlot::from_candidate).collect();
        }
    }

    course.updated_at = Utc::now();
    let updated = state
        .repo
        .update_course(course)
        .await?
        .ok_or_else(|| course_not_found(id))?;
    info!("Course updated: id={}", updated.id);

    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn delete_course(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let _gate = state.write_gate.lock().await;

    let removed = state
        .repo
        .delete_course(id)
        .await?
        .ok_or_else(|| course_not_found(id))?;
    info!("Course deleted: id={}", removed.id);

    Ok(Json(removed))
}

pub(crate) fn course_not_found(id: Uuid) -> CourseError {
    CourseError::NotFound(format!("Course with ID {} not found", id))
}

fn check_date_range(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<(), CourseError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(CourseError::Validation(
            "endDate must not be before startDate".to_string(),
        )),
        _ => Ok(()),
    }
}

fn check_max_students(max_students: u32) -> Result<u32, CourseError> {
    if max_students > MAX_STUDENTS_CAP {
        return Err(CourseError::Validation(format!(
            "maxStudents must not exceed {MAX_STUDENTS_CAP}"
        )));
    }
    Ok(max_students)
}

fn reject_conflict(title: &str, conflict: SlotConflict) -> AppError {
    warn!(
        "Schedule conflict for course {:?}: slot {} ({})",
        title,
        conflict.slot_index,
        conflict.report.describe()
    );

    AppError(CourseError::ScheduleConflict {
        slot_index: conflict.slot_index,
        report: conflict.report,
    })
}
