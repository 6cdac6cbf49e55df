use std::sync::Arc;

use axum::http::StatusCode;
use coursedesk_api::middleware::error_handling::map_error;
use coursedesk_core::{conflict::ConflictReport, errors::CourseError};
use coursedesk_db::mock::repositories::MockCourseRepo;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{slot, TestContext};

#[rstest]
#[case(CourseError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case(CourseError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(CourseError::Duplicate("Already there".to_string()), StatusCode::CONFLICT)]
#[case(CourseError::Capacity("Full".to_string()), StatusCode::CONFLICT)]
#[case(
    CourseError::ScheduleConflict { slot_index: 0, report: ConflictReport::from_flags(true, false) },
    StatusCode::CONFLICT
)]
#[case(CourseError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    CourseError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: CourseError, #[case] status: StatusCode) {
    // Map the error to a response
    let response = map_error(error);

    // Assert the response has the correct status code
    assert_eq!(response.status(), status);
}

#[test_log::test(tokio::test)]
async fn test_repository_failure_is_internal_error() {
    let mut repo = MockCourseRepo::new();
    repo.expect_list_courses()
        .returning(|| Err(eyre::eyre!("connection reset")));

    let ctx = TestContext::with_repo(Arc::new(repo));
    let response = ctx.server.get("/api/schedule/weekly").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("connection reset"));
}

#[test_log::test(tokio::test)]
async fn test_conflict_check_surfaces_storage_failure() {
    let mut repo = MockCourseRepo::new();
    repo.expect_get_professor().returning(|id| {
        Ok(Some(coursedesk_core::models::professor::Professor {
            id,
            name: "Mocked".to_string(),
            created_at: chrono::Utc::now(),
        }))
    });
    repo.expect_list_courses()
        .times(1)
        .returning(|| Err(eyre::eyre!("disk on fire")));

    let ctx = TestContext::with_repo(Arc::new(repo));
    let mut body = slot("monday", "09:00", "10:00", "A101");
    body["teacherId"] = json!(uuid::Uuid::new_v4());
    let response = ctx.server.post("/api/courses/check-conflict").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_list_uses_repository_paging() {
    let mut repo = MockCourseRepo::new();
    repo.expect_page_courses()
        .withf(|offset, limit| *offset == 20 && *limit == 10)
        .times(1)
        .returning(|_, _| Ok(Vec::new()));
    repo.expect_count_courses().returning(|| Ok(20));

    let ctx = TestContext::with_repo(Arc::new(repo));
    let response = ctx.server.get("/api/courses").add_query_param("page", 3).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"courses": [], "total": 20, "page": 3, "limit": 10})
    );
}
