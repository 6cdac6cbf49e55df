use axum::http::StatusCode;
use fake::{faker::name::en::Name, Fake};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::TestContext;

#[test_log::test(tokio::test)]
async fn test_create_and_list_professors() {
    let ctx = TestContext::new();
    let first: String = Name().fake();
    let second = format!("{first} Jr");

    ctx.professor(&first).await;
    ctx.professor(&second).await;

    let response = ctx.server.get("/api/professors").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let names: Vec<&str> = body["professors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec![second.as_str(), first.as_str()]);
}

#[test_log::test(tokio::test)]
async fn test_professor_name_is_trimmed() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/professors")
        .json(&json!({"name": "  Grace Hopper  "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Grace Hopper");
    assert!(body["createdAt"].is_string());
}

#[rstest]
#[case(json!({}))]
#[case(json!({"name": ""}))]
#[case(json!({"name": " X "}))]
#[tokio::test]
async fn test_professor_name_validation(#[case] body: Value) {
    let ctx = TestContext::new();

    let response = ctx.server.post("/api/professors").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_duplicate_professor_name_conflicts() {
    let ctx = TestContext::new();
    ctx.professor("Alan Turing").await;

    let response = ctx
        .server
        .post("/api/professors")
        .json(&json!({"name": "alan turing"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn test_delete_professor() {
    let ctx = TestContext::new();
    let id = ctx.professor("Barbara Liskov").await;

    let response = ctx.server.delete(&format!("/api/professors/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["id"], id.as_str());

    let response = ctx.server.delete(&format!("/api/professors/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = ctx
        .server
        .delete(&format!("/api/professors/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
