//! HTTP API integration tests.
//!
//! Drives the router directly with `tower::ServiceExt::oneshot`, no socket.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use common::{candidate_workbook, simple_workbook};
use intake::server::build_router;
use intake::{validate_candidate_record, MemoryStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "intake-test-boundary";
const MAX_UPLOAD: usize = 1024 * 1024;

fn setup_app() -> Router {
    build_router(Arc::new(MemoryStore::new()), MAX_UPLOAD)
}

/// Multipart body with text fields and an optional spreadsheet.
fn multipart_body(fields: &[(&str, &str)], file: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some(bytes) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"file\"; filename=\"candidate.xlsx\"\r\n",
        );
        body.extend_from_slice(
            b"Content-Type: application/vnd.openxmlformats-officedocument.spreadsheetml.sheet\r\n\r\n",
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(fields: &[(&str, &str)], file: Option<&[u8]>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/candidates")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap()
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn upload_ada(app: &Router) -> Value {
    let xlsx = candidate_workbook("senior", 5.0, true);
    let response = app
        .clone()
        .oneshot(upload_request(
            &[("name", "Ada"), ("surname", "Lovelace")],
            Some(&xlsx),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn test_health() {
    let response = setup_app().oneshot(request(Method::GET, "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_upload_then_list() {
    let app = setup_app();
    let created = upload_ada(&app).await;

    assert_eq!(created["name"], "Ada");
    assert_eq!(created["surname"], "Lovelace");
    assert_eq!(created["seniority"], "senior");
    assert_eq!(created["years"], 5.0);
    assert_eq!(created["availability"], true);
    assert!(validate_candidate_record(&created).is_ok());

    let response = app.oneshot(request(Method::GET, "/api/candidates")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list = json_body(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0], created);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = setup_app();
    let first = upload_ada(&app).await;
    let second = upload_ada(&app).await;

    let list = json_body(app.oneshot(request(Method::GET, "/api/candidates")).await.unwrap()).await;
    assert_eq!(list[0]["id"], second["id"]);
    assert_eq!(list[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_missing_file() {
    let response = setup_app()
        .oneshot(upload_request(&[("name", "Ada"), ("surname", "Lovelace")], None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["kind"], "missing_file");
    assert_eq!(body["message"], "File is required");
}

#[tokio::test]
async fn test_invalid_identity_is_rejected_before_file() {
    let response = setup_app()
        .oneshot(upload_request(&[("name", ""), ("surname", "Lovelace")], None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["kind"], "bad_request");
    let messages = body["message"].as_array().unwrap();
    assert!(messages.iter().all(|m| m.as_str().unwrap().starts_with("name:")));
}

#[tokio::test]
async fn test_ingest_error_kinds() {
    let app = setup_app();
    let cases = [
        (simple_workbook(&["Seniority", "Years", "Availability"], &["junior", "-2", "yes"]), "negative_years"),
        (simple_workbook(&["Seniority", "Years", "Availability"], &["junior", "2", "maybe"]), "invalid_availability"),
        (simple_workbook(&["Seniority", "Years"], &["junior", "2"]), "missing_columns"),
        (b"plain text, not a workbook".to_vec(), "malformed_input"),
    ];

    for (bytes, kind) in cases {
        let response = app
            .clone()
            .oneshot(upload_request(
                &[("name", "Ada"), ("surname", "Lovelace")],
                Some(&bytes),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", kind);
        assert_eq!(json_body(response).await["kind"], kind);
    }

    // nothing was stored
    let list = json_body(app.oneshot(request(Method::GET, "/api/candidates")).await.unwrap()).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_by_id() {
    let app = setup_app();
    let created = upload_ada(&app).await;
    let uri = format!("/api/candidates/{}", created["id"]);

    let response = app.clone().oneshot(request(Method::DELETE, &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(request(Method::DELETE, &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["kind"], "not_found");
}

#[tokio::test]
async fn test_delete_with_bad_id() {
    let response = setup_app()
        .oneshot(request(Method::DELETE, "/api/candidates/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_all() {
    let app = setup_app();
    upload_ada(&app).await;
    upload_ada(&app).await;

    let response = app.clone().oneshot(request(Method::DELETE, "/api/candidates")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["deleted"], 2);

    let list = json_body(app.oneshot(request(Method::GET, "/api/candidates")).await.unwrap()).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_over_limit() {
    let app = build_router(Arc::new(MemoryStore::new()), 512);
    let padding = vec![b'x'; 4096];

    let response = app
        .oneshot(upload_request(
            &[("name", "Ada"), ("surname", "Lovelace")],
            Some(&padding),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
