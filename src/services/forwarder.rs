//! Upstream forwarder
//!
//! Builds outbound chat and image bodies, calls the provider and relays
//! its answer back to the caller

use crate::models::chat::{ChatCompletionRequest, UpstreamChatRequest};
use crate::models::image::UpstreamImageRequest;
use crate::services::client::OpenAIClient;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::{
    create_chat_request_log_summary, create_chat_response_log_summary,
    create_image_request_log_summary,
};
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

/// Forwards translated requests to the upstream provider
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: OpenAIClient,
}

impl Forwarder {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    /// Relay a REST chat request
    ///
    /// Streams the upstream body through untouched when the caller asked for
    /// `stream: true`, otherwise returns the upstream JSON as-is.
    pub async fn forward_chat(
        &self,
        request: ChatCompletionRequest,
        api_key: &str,
    ) -> AppResult<Response> {
        let upstream = UpstreamChatRequest::from(request);
        debug!("Sending request to OpenAI: {}", create_chat_request_log_summary(&upstream));

        let response = self.client.chat_completions(&upstream, api_key).await?;
        let status = relay_status(response.status());

        if upstream.is_streaming() {
            debug!("Returning streaming response");
            return event_stream_response(status, response);
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        debug!("OpenAI response data: {}", create_chat_response_log_summary(&body));

        Ok((status, Json(body)).into_response())
    }

    /// Relay a REST image request
    pub async fn forward_image(
        &self,
        request: UpstreamImageRequest,
        api_key: &str,
    ) -> AppResult<Response> {
        let body = self
            .generate_image(&request, api_key)
            .await
            .map_err(AppError::into_image_error)?;

        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Run a non-streaming chat completion and return the parsed upstream body
    pub async fn complete_chat(
        &self,
        request: &UpstreamChatRequest,
        api_key: &str,
    ) -> AppResult<Value> {
        debug!("Sending request to OpenAI: {}", create_chat_request_log_summary(request));

        let response = self.client.chat_completions(request, api_key).await?;
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        debug!("OpenAI response data: {}", create_chat_response_log_summary(&body));

        Ok(body)
    }

    /// Run an image generation and return the parsed upstream body
    pub async fn generate_image(
        &self,
        request: &UpstreamImageRequest,
        api_key: &str,
    ) -> AppResult<Value> {
        debug!("Sending image request to OpenAI: {}", create_image_request_log_summary(request));

        let response = self.client.image_generations(request, api_key).await?;
        let bytes = response.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Map the client's status type onto the server's
fn relay_status(status: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Wrap the upstream body in a `text/event-stream` response without buffering
fn event_stream_response(status: StatusCode, response: reqwest::Response) -> AppResult<Response> {
    let stream = response.bytes_stream().map(|chunk| {
        if let Err(e) = &chunk {
            warn!("Upstream stream interrupted: {}", e);
        }
        chunk
    });

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build streaming response: {}", e)))
}
