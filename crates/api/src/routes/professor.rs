use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/professors",
            get(handlers::professor::list_professors).post(handlers::professor::create_professor),
        )
        .route(
            "/api/professors/:id",
            delete(handlers::professor::delete_professor),
        )
}
