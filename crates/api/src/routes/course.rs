use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/courses",
            get(handlers::course::list_courses).post(handlers::course::create_course),
        )
        .route(
            "/api/courses/check-conflict",
            post(handlers::conflict::check_conflict),
        )
        .route(
            "/api/courses/:id",
            get(handlers::course::get_course)
                .put(handlers::course::update_course)
                .delete(handlers::course::delete_course),
        )
        .route(
            "/api/courses/:id/students",
            post(handlers::enrollment::enroll_student),
        )
        .route(
            "/api/courses/:id/students/:student_id",
            delete(handlers::enrollment::unenroll_student),
        )
        .route(
            "/api/courses/:id/attendance",
            get(handlers::attendance::list_attendance).post(handlers::attendance::record_attendance),
        )
}
