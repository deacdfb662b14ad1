//! REST proxy handlers
//!
//! Handles chat and image requests and forwards them to the OpenAI API.
//! Any POST that is not `/graphql` or an image path lands here and is
//! classified by the shape of its body.

use crate::handlers::AppState;
use crate::models::chat::ChatCompletionRequest;
use crate::models::image::ImageGenerationRequest;
use crate::utils::error::{AppError, AppResult};
use crate::utils::json::is_truthy;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    response::Response,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// What a REST POST body asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Chat,
    Image,
}

/// Handle any path without a dedicated route
pub async fn handle_proxy(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    if method != Method::POST {
        debug!("Method not allowed: {}", method);
        return Err(AppError::MethodNotAllowed);
    }

    let payload = parse_json_body(&body)?;

    match detect_request_kind(&payload) {
        RequestKind::Image => forward_image(&state, &headers, payload).await,
        RequestKind::Chat => forward_chat(&state, &headers, payload).await,
    }
}

/// Handle POST /images/generations and POST /generate-image
pub async fn handle_image_generation(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    let payload = parse_json_body(&body)?;
    forward_image(&state, &headers, payload).await
}

/// Fallback for a known path hit with the wrong method
pub async fn method_not_allowed(method: Method) -> AppError {
    debug!("Method not allowed: {}", method);
    AppError::MethodNotAllowed
}

async fn forward_chat(state: &AppState, headers: &HeaderMap, payload: Value) -> AppResult<Response> {
    validate_messages(&payload)?;

    let request: ChatCompletionRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::Validation(format!("Invalid chat request: {}", e)))?;
    let api_key = state.require_api_key(headers)?;

    state.forwarder.forward_chat(request, &api_key).await
}

async fn forward_image(state: &AppState, headers: &HeaderMap, payload: Value) -> AppResult<Response> {
    if !payload.is_object() {
        return Err(AppError::MissingPrompt);
    }

    let request: ImageGenerationRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::Validation(format!("Invalid image request: {}", e)))?;
    let upstream = request.into_upstream()?;
    let api_key = state.require_api_key(headers)?;

    state.forwarder.forward_image(upstream, &api_key).await
}

/// Parse a request body as JSON
pub fn parse_json_body(body: &[u8]) -> AppResult<Value> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("JSON parse error: {}", e);
        AppError::InvalidJson
    })
}

/// Decide between chat and image forwarding
///
/// Image when the body carries an `action: "generate-image"` marker, or a
/// truthy `prompt` without truthy `messages`.
pub fn detect_request_kind(payload: &Value) -> RequestKind {
    let marked = payload.get("action").and_then(Value::as_str) == Some("generate-image");
    let prompt_only = payload.get("prompt").map_or(false, is_truthy)
        && !payload.get("messages").map_or(false, is_truthy);

    if marked || prompt_only {
        RequestKind::Image
    } else {
        RequestKind::Chat
    }
}

/// Require `messages` to be an array
pub fn validate_messages(payload: &Value) -> AppResult<()> {
    match payload.get("messages") {
        Some(Value::Array(_)) => Ok(()),
        other => {
            debug!("Invalid messages format: {:?}", other);
            Err(AppError::InvalidMessages)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_request_kind() {
        assert_eq!(detect_request_kind(&json!({"messages": []})), RequestKind::Chat);
        assert_eq!(detect_request_kind(&json!({"prompt": "a cat"})), RequestKind::Image);
        assert_eq!(
            detect_request_kind(&json!({"prompt": "a cat", "messages": [{"role": "user"}]})),
            RequestKind::Chat
        );
        assert_eq!(
            detect_request_kind(&json!({"action": "generate-image", "messages": []})),
            RequestKind::Image
        );
        assert_eq!(detect_request_kind(&json!({"prompt": ""})), RequestKind::Chat);
    }

    #[test]
    fn test_validate_messages() {
        assert!(validate_messages(&json!({"messages": []})).is_ok());
        assert!(matches!(validate_messages(&json!({})), Err(AppError::InvalidMessages)));
        assert!(matches!(
            validate_messages(&json!({"messages": "hi"})),
            Err(AppError::InvalidMessages)
        ));
        assert!(matches!(validate_messages(&json!([1, 2])), Err(AppError::InvalidMessages)));
    }

    #[test]
    fn test_parse_json_body() {
        assert!(parse_json_body(br#"{"a":1}"#).is_ok());
        assert!(matches!(parse_json_body(b"not json"), Err(AppError::InvalidJson)));
        assert!(matches!(parse_json_body(b""), Err(AppError::InvalidJson)));
    }
}
