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
    models::professor::{CreateProfessorRequest, ListProfessorsResponse, Professor},
};

use crate::{
    middleware::error_handling::{AppError, AppJson},
    ApiState,
};

const MIN_NAME_CHARS: usize = 2;

#[axum::debug_handler]
pub async fn list_professors(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListProfessorsResponse>, AppError> {
    let professors = state.repo.list_professors().await?;
    Ok(Json(ListProfessorsResponse { professors }))
}

#[axum::debug_handler]
pub async fn create_professor(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateProfessorRequest>,
) -> Result<(StatusCode, Json<Professor>), AppError> {
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| n.chars().count() >= MIN_NAME_CHARS)
        .ok_or_else(|| {
            CourseError::Validation(format!("name must be at least {MIN_NAME_CHARS} characters"))
        })?
        .to_string();

    let _gate = state.write_gate.lock().await;

    if state.repo.find_professor_by_name(&name).await?.is_some() {
        return Err(CourseError::Duplicate(format!("Professor {name:?} already exists")).into());
    }

    let professor = state
        .repo
        .insert_professor(Professor {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        })
        .await?;
    info!("Professor created: id={}, name={}", professor.id, professor.name);

    Ok((StatusCode::CREATED, Json(professor)))
}

#[axum::debug_handler]
pub async fn delete_professor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Professor>, AppError> {
    let _gate = state.write_gate.lock().await;

    let removed = state
        .repo
        .delete_professor(id)
        .await?
        .ok_or_else(|| CourseError::NotFound(format!("Professor with ID {} not found", id)))?;
    info!("Professor deleted: id={}", removed.id);

    Ok(Json(removed))
}
