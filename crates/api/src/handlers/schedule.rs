use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use coursedesk_core::{
    errors::CourseError,
    weekly::{build_weekly, WeeklyScheduleResponse},
};

use crate::{middleware::error_handling::AppError, ApiState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyQuery {
    pub teacher_id: Option<Uuid>,
}

/// Every slot of every course grouped by weekday, monday first. With
/// `?teacherId=` only that professor's courses are included.
#[axum::debug_handler]
pub async fn weekly_schedule(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<WeeklyScheduleResponse>, AppError> {
    let courses = match query.teacher_id {
        Some(teacher_id) => {
            if state.repo.get_professor(teacher_id).await?.is_none() {
                return Err(CourseError::NotFound(format!(
                    "Professor with ID {} not found",
                    teacher_id
                ))
                .into());
            }
            state.repo.find_courses_by_teacher(teacher_id).await?
        }
        None => state.repo.list_courses().await?,
    };

    Ok(Json(WeeklyScheduleResponse {
        days: build_weekly(&courses),
    }))
}
