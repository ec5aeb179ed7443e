use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use uuid::Uuid;

mod support;

#[tokio::test]
async fn test_request_id_header_added_to_response() {
    let (app, _) = support::test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_request_id_header_persists_client_id() {
    let (app, _) = support::test_app();

    let client_id = "client-req-123";
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", client_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), client_id);
}

#[tokio::test]
async fn test_request_id_header_persists_correlation_id_on_errors() {
    let (app, _) = support::test_app();

    let correlation_id = "corr-req-456";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header("x-correlation-id", correlation_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get("x-request-id").unwrap(), correlation_id);
}

#[tokio::test]
async fn test_request_id_header_replaces_oversized_client_id() {
    let (app, _) = support::test_app();

    let oversized = "r".repeat(200);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", oversized.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
}
