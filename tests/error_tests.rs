//! Error handling tests

use airelay::utils::error::{AppError, ErrorResponse};
use axum::{http::StatusCode, response::IntoResponse};
use serde_json::{json, Value};

async fn response_parts(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[test]
fn test_labels() {
    let cases = [
        (AppError::MethodNotAllowed, "Method Not Allowed"),
        (AppError::InvalidJson, "Invalid JSON"),
        (AppError::InvalidMessages, "Invalid messages format"),
        (AppError::MissingPrompt, "Missing required field"),
        (AppError::MissingApiKey, "Configuration Error"),
        (AppError::Validation("x".to_string()), "Invalid request body"),
        (AppError::ImageGeneration("x".to_string()), "Image Generation Error"),
        (AppError::Internal("x".to_string()), "Internal Server Error"),
        (
            AppError::Upstream { status: 500, body: String::new() },
            "OpenAI API Error",
        ),
    ];

    for (error, label) in cases {
        assert_eq!(error.label(), label);
    }
}

#[test]
fn test_unexpected_errors_carry_kind() {
    let parse_error = serde_json::from_str::<Value>("{").unwrap_err();
    assert_eq!(AppError::Serialization(parse_error).kind(), Some("SerializationError"));
    assert_eq!(AppError::Internal("x".to_string()).kind(), Some("InternalError"));
    assert_eq!(AppError::MissingPrompt.kind(), None);
    assert!(!AppError::MissingApiKey.is_unexpected());
}

#[test]
fn test_upstream_error_response() {
    let error = AppError::Upstream {
        status: 503,
        body: "overloaded".to_string(),
    };

    assert_eq!(
        error.to_error_response(),
        ErrorResponse {
            error: "OpenAI API Error".to_string(),
            message: Some("OpenAI API returned 503: overloaded".to_string()),
            status: Some(503),
            error_type: None,
        }
    );
}

#[test]
fn test_image_relabeling() {
    let relabeled = AppError::Internal("disk full".to_string()).into_image_error();
    assert_eq!(relabeled.label(), "Image Generation Error");
    assert_eq!(relabeled.to_string(), "disk full");

    let upstream = AppError::Upstream { status: 400, body: "bad".to_string() }.into_image_error();
    assert_eq!(upstream.label(), "OpenAI API Error");
}

#[tokio::test]
async fn test_rest_response_shape() {
    let (status, body) = response_parts(AppError::MissingApiKey.into_response()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "Configuration Error",
            "message": "OpenAI API key is not configured"
        })
    );
}

#[tokio::test]
async fn test_method_not_allowed_response() {
    let (status, body) = response_parts(AppError::MethodNotAllowed.into_response()).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method Not Allowed"}));
}

#[tokio::test]
async fn test_internal_response_includes_type() {
    let (status, body) = response_parts(AppError::Internal("boom".to_string()).into_response()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Internal Server Error", "message": "boom", "type": "InternalError"})
    );
}

#[tokio::test]
async fn test_graphql_response_shape() {
    let (status, body) = response_parts(AppError::UnsupportedOperation.into_graphql_response()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"errors": [{"message": "Unsupported GraphQL operation"}]}));

    let (status, body) = response_parts(
        AppError::Upstream { status: 401, body: "nope".to_string() }.into_graphql_response(),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"errors": [{"message": "OpenAI API returned 401: nope"}]}));
}
