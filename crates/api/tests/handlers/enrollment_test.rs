use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{slot, TestContext};

async fn course_with_cap(ctx: &TestContext, max_students: u32) -> String {
    let teacher = ctx.professor("Teacher One").await;
    let response = ctx
        .server
        .post("/api/courses")
        .json(&json!({
            "title": "Seminar",
            "teacherId": teacher,
            "maxStudents": max_students,
            "schedule": [slot("wednesday", "14:00", "16:00", "S1")],
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    response.json::<Value>()["id"].as_str().unwrap().to_string()
}

#[test_log::test(tokio::test)]
async fn test_enroll_and_unenroll_student() {
    let ctx = TestContext::new();
    let id = course_with_cap(&ctx, 10).await;

    let response = ctx
        .server
        .post(&format!("/api/courses/{id}/students"))
        .json(&json!({"studentId": "s-1"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["currentStudents"], 1);
    assert_eq!(body["students"][0]["studentId"], "s-1");

    let response = ctx.server.delete(&format!("/api/courses/{id}/students/s-1")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["currentStudents"], 0);
    assert_eq!(body["students"], json!([]));

    let response = ctx.server.delete(&format!("/api/courses/{id}/students/s-1")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_enrolling_twice_conflicts() {
    let ctx = TestContext::new();
    let id = course_with_cap(&ctx, 10).await;
    let path = format!("/api/courses/{id}/students");

    ctx.server.post(&path).json(&json!({"studentId": "s-1"})).await;
    let response = ctx.server.post(&path).json(&json!({"studentId": "s-1"})).await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_full_course_rejects_enrollment() {
    let ctx = TestContext::new();
    let id = course_with_cap(&ctx, 1).await;
    let path = format!("/api/courses/{id}/students");

    let response = ctx.server.post(&path).json(&json!({"studentId": "s-1"})).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = ctx.server.post(&path).json(&json!({"studentId": "s-2"})).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .starts_with("Capacity reached"));
}

#[test_log::test(tokio::test)]
async fn test_cap_cannot_drop_below_enrollment() {
    let ctx = TestContext::new();
    let id = course_with_cap(&ctx, 5).await;
    let path = format!("/api/courses/{id}/students");
    ctx.server.post(&path).json(&json!({"studentId": "s-1"})).await;
    ctx.server.post(&path).json(&json!({"studentId": "s-2"})).await;

    let response = ctx
        .server
        .put(&format!("/api/courses/{id}"))
        .json(&json!({"maxStudents": 1}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_enrollment_requires_student_id() {
    let ctx = TestContext::new();
    let id = course_with_cap(&ctx, 0).await;

    let response = ctx
        .server
        .post(&format!("/api/courses/{id}/students"))
        .json(&json!({"studentId": "  "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
