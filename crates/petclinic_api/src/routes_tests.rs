//! Tests for routes module

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

#[test]
fn test_router_creation() {
    let state = AppState::default();
    let _router = create_router(state);
    // Router creation should succeed without panicking
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let request = Request::builder()
        .uri("/api/v1/owners")
        .body(Body::empty())
        .unwrap();

    let response = create_router(AppState::default())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_returns_405() {
    let request = Request::builder()
        .method("DELETE")
        .uri("/owners/1")
        .body(Body::empty())
        .unwrap();

    let response = create_router(AppState::default())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/owners")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = create_router(AppState::default())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let request = Request::builder()
        .uri("/pettypes")
        .body(Body::empty())
        .unwrap();

    let response = create_router(AppState::default())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(&crate::middleware::REQUEST_ID_HEADER));
}
