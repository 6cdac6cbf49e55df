use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{slot, TestContext};

/// T1 teaches one course, Monday 09:00-10:30 in A101; T2 teaches nothing.
async fn seeded() -> (TestContext, String, String) {
    let ctx = TestContext::new();
    let t1 = ctx.professor("Teacher One").await;
    let t2 = ctx.professor("Teacher Two").await;
    ctx.course("Seed", &t1, json!([slot("monday", "09:00", "10:30", "A101")]))
        .await;
    (ctx, t1, t2)
}

async fn check_slot(ctx: &TestContext, teacher: &str, start: &str, end: &str, room: &str) -> Value {
    let mut body = slot("monday", start, end, room);
    body["teacherId"] = json!(teacher);

    let response = ctx.server.post("/api/courses/check-conflict").json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json()
}

#[test_log::test(tokio::test)]
async fn test_room_taken_by_another_teacher() {
    let (ctx, _, t2) = seeded().await;

    let body = check_slot(&ctx, &t2, "10:00", "11:00", "A101").await;

    assert_eq!(body, json!({"conflict": true, "reasons": ["room"]}));
}

#[test_log::test(tokio::test)]
async fn test_teacher_busy_in_another_room() {
    let (ctx, t1, _) = seeded().await;

    let body = check_slot(&ctx, &t1, "10:00", "11:00", "B202").await;

    assert_eq!(body, json!({"conflict": true, "reasons": ["teacher"]}));
}

#[test_log::test(tokio::test)]
async fn test_same_teacher_same_room() {
    let (ctx, t1, _) = seeded().await;

    let body = check_slot(&ctx, &t1, "10:00", "11:00", "A101").await;

    assert_eq!(body, json!({"conflict": true, "reasons": ["room", "teacher"]}));
}

#[test_log::test(tokio::test)]
async fn test_touching_endpoint_is_free() {
    let (ctx, t1, _) = seeded().await;

    let body = check_slot(&ctx, &t1, "10:30", "11:30", "A101").await;

    assert_eq!(body, json!({"conflict": false, "reasons": []}));
}

#[test_log::test(tokio::test)]
async fn test_check_does_not_store_anything() {
    let (ctx, _, t2) = seeded().await;
    check_slot(&ctx, &t2, "13:00", "14:00", "C303").await;

    let list: Value = ctx.server.get("/api/courses").await.json();
    assert_eq!(list["total"], 1);
}

#[rstest]
#[case(json!({"dayOfWeek": "monday", "startTime": "09:00", "endTime": "10:00"}))]
#[case(json!({"dayOfWeek": "monday", "startTime": "09:00", "room": "A101"}))]
#[case(json!({"startTime": "09:00", "endTime": "10:00", "room": "A101"}))]
#[case(json!({"dayOfWeek": "monday", "startTime": "nine", "endTime": "10:00", "room": "A101"}))]
#[case(json!({"dayOfWeek": "monday", "startTime": "10:00", "endTime": "09:00", "room": "A101"}))]
#[tokio::test]
async fn test_invalid_check_is_bad_request(#[case] mut body: Value) {
    let (ctx, t1, _) = seeded().await;
    body["teacherId"] = json!(t1);

    let response = ctx.server.post("/api/courses/check-conflict").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["conflict"], false);
    assert_eq!(body["reasons"], json!([]));
    assert!(body["message"].is_string());
}

#[test_log::test(tokio::test)]
async fn test_check_requires_known_teacher() {
    let (ctx, _, _) = seeded().await;

    let mut body = slot("monday", "12:00", "13:00", "A101");
    body["teacherId"] = json!(Uuid::new_v4());
    let response = ctx.server.post("/api/courses/check-conflict").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["conflict"], false);
}

#[test_log::test(tokio::test)]
async fn test_check_with_unparseable_body() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/courses/check-conflict")
        .content_type("application/json")
        .bytes("[1, 2".into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["conflict"], false);
}
