//! Routing and request-validation behaviour that is decided before any query runs.
//! The pool is lazy, so no database is needed.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use clinic_backend::{app, AppState, ClinicModel};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn test_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/clinic_test")
        .unwrap();
    app(AppState::new(pool, ClinicModel::new("public")), 1024 * 1024)
}

async fn send(method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(b.to_string())
        }
        None => Body::empty(),
    };
    let res = test_app().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn version_reports_package() {
    let (status, body) = send(Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "clinic-backend");
}

#[tokio::test]
async fn unknown_resource_is_not_found() {
    let (status, body) = send(Method::GET, "/widgets", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "resource 'widgets' not found");

    let (status, _) = send(Method::DELETE, "/widgets/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let (status, body) = send(Method::GET, "/clinics/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["message"], "invalid id 'abc'");
}

#[tokio::test]
async fn key_shape_must_match_entity() {
    let (status, body) = send(Method::GET, "/role_permissions/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, _) = send(Method::DELETE, "/clinics/1/2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_requires_mandatory_columns() {
    let (status, body) = send(Method::POST, "/clinics", Some(r#"{"address":"1 Main St"}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["message"], "name is required");
}

#[tokio::test]
async fn body_must_be_an_object() {
    let (status, _) = send(Method::POST, "/clinics", Some("[1, 2]")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(Method::PUT, "/clinics/1", Some("\"name\"")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = send(Method::POST, "/clinics", Some("{\"name\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn pagination_is_validated() {
    let (status, _) = send(Method::GET, "/clinics?skip=-1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(Method::GET, "/clinics?limit=ten", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn password_is_validated_before_hashing() {
    let body = r#"{"username":"amy","email":"amy@example.com","first_name":"Amy",
        "last_name":"Ng","role_id":1,"password":"short"}"#;
    let (status, body) = send(Method::POST, "/users", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
}
