//! Roster API integration tests
//!
//! Drives the public `/api/students` surface through the full router with
//! `tower::ServiceExt::oneshot`, asserting envelopes, status codes, and
//! the query pipeline end to end.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use campusd::config::AppConfig;
use campusd::http::HttpServer;

fn test_router() -> Router {
    let config = AppConfig {
        cors_origins: vec![],
        ..AppConfig::default()
    };
    HttpServer::new(config).router()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_student(router: &Router, body: Value) -> Value {
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/students", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn health_reports_running() {
    let router = test_router();

    let response = router.oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Server is running"));
}

#[tokio::test]
async fn create_returns_full_record_with_defaults() {
    let router = test_router();

    let body = create_student(
        &router,
        json!({
            "firstName": "Alice",
            "lastName": "Johnson",
            "email": "Alice.Johnson@Example.COM"
        }),
    )
    .await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Student created successfully"));

    let data = &body["data"];
    assert_eq!(data["firstName"], json!("Alice"));
    assert_eq!(data["email"], json!("alice.johnson@example.com"));
    assert_eq!(data["status"], json!("active"));
    assert!(data["id"].is_string());
    assert!(data["createdAt"].is_string());
    assert!(data["enrollmentDate"].is_string());
}

#[tokio::test]
async fn create_rejects_invalid_body_with_error_list() {
    let router = test_router();

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/students",
            json!({ "firstName": "Solo", "email": "not-an-email" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));

    let errors = body["errors"].as_array().unwrap();
    let fields: Vec<&str> = errors
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"lastName"));
    assert!(fields.contains(&"email"));
}

#[tokio::test]
async fn duplicate_email_is_a_client_error() {
    let router = test_router();

    create_student(
        &router,
        json!({ "firstName": "A", "lastName": "B", "email": "dup@example.com" }),
    )
    .await;

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/students",
            json!({ "firstName": "C", "lastName": "D", "email": "dup@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Email already exists"));
}

#[tokio::test]
async fn list_carries_count_and_honors_search() {
    let router = test_router();

    create_student(
        &router,
        json!({ "firstName": "Emma", "lastName": "Wilson", "email": "emma@example.com",
                "course": "Computer Science" }),
    )
    .await;
    create_student(
        &router,
        json!({ "firstName": "Liam", "lastName": "Brown", "email": "liam@example.com",
                "course": "Mathematics" }),
    )
    .await;

    let response = router
        .clone()
        .oneshot(get_request("/api/students?search=computer"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["firstName"], json!("Emma"));

    // Unknown status matches nothing rather than failing
    let response = router
        .oneshot(get_request("/api/students?status=enrolled"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn unknown_sort_field_is_rejected() {
    let router = test_router();

    let response = router
        .oneshot(get_request("/api/students?sort=-favoriteColor"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"][0]["field"], json!("sort"));
}

#[tokio::test]
async fn update_merges_and_delete_removes() {
    let router = test_router();

    let created = create_student(
        &router,
        json!({ "firstName": "Noah", "lastName": "Davis", "email": "noah@example.com" }),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/students/{}", id),
            json!({ "grade": "A", "status": "graduated" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Student updated successfully"));
    assert_eq!(body["data"]["grade"], json!("A"));
    assert_eq!(body["data"]["status"], json!("graduated"));
    // Untouched fields survive the merge
    assert_eq!(body["data"]["firstName"], json!("Noah"));

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/students/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Student deleted successfully"));
    assert!(body["data"].as_object().unwrap().is_empty());

    let response = router
        .oneshot(get_request(&format!("/api/students/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_body_gets_an_envelope() {
    let router = test_router();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/students")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"][0]["field"], json!("body"));
}

#[tokio::test]
async fn malformed_id_reads_as_not_found() {
    let router = test_router();

    let response = router
        .oneshot(get_request("/api/students/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Student not found"));
}
