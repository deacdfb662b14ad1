//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::graphql::GraphQLResponse;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Wrong HTTP verb for the path
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Request body is not JSON
    #[error("Request body is not valid JSON")]
    InvalidJson,

    /// Chat body without a `messages` array
    #[error("messages field is required and must be an array")]
    InvalidMessages,

    /// Image body without a prompt
    #[error("prompt field is required for image generation")]
    MissingPrompt,

    /// A recognized field has the wrong type
    #[error("{0}")]
    Validation(String),

    /// Neither an override header nor a configured secret supplied a key
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    /// GraphQL query matched none of the known operations
    #[error("Unsupported GraphQL operation")]
    UnsupportedOperation,

    /// Upstream answered with a non-success status
    #[error("OpenAI API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// HTTP client error
    #[error("{0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure anywhere along the image forwarding path
    #[error("{0}")]
    ImageGeneration(String),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

/// REST error response structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// Short error label
    pub error: String,
    /// Human readable detail (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Relayed upstream status (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Error kind for unexpected failures (optional)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidJson
            | AppError::InvalidMessages
            | AppError::MissingPrompt
            | AppError::Validation(_)
            | AppError::UnsupportedOperation => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::MissingApiKey
            | AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::ImageGeneration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the short label placed in the REST `error` field
    pub fn label(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "Method Not Allowed",
            AppError::InvalidJson => "Invalid JSON",
            AppError::InvalidMessages => "Invalid messages format",
            AppError::MissingPrompt => "Missing required field",
            AppError::Validation(_) => "Invalid request body",
            AppError::MissingApiKey => "Configuration Error",
            AppError::UnsupportedOperation => "Unsupported GraphQL operation",
            AppError::Upstream { .. } => "OpenAI API Error",
            AppError::ImageGeneration(_) => "Image Generation Error",
            AppError::HttpClient(_) | AppError::Serialization(_) | AppError::Internal(_) => {
                "Internal Server Error"
            }
        }
    }

    /// Error kind reported alongside unexpected failures
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            AppError::HttpClient(_) => Some("HttpClientError"),
            AppError::Serialization(_) => Some("SerializationError"),
            AppError::Internal(_) => Some("InternalError"),
            _ => None,
        }
    }

    /// Whether this error is a failure nobody anticipated, rather than a
    /// validation, configuration or upstream outcome
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            AppError::HttpClient(_) | AppError::Serialization(_) | AppError::Internal(_)
        )
    }

    /// Re-label unexpected failures as image generation errors
    pub fn into_image_error(self) -> AppError {
        if self.is_unexpected() {
            AppError::ImageGeneration(self.to_string())
        } else {
            self
        }
    }

    /// Convert to the REST error body
    pub fn to_error_response(&self) -> ErrorResponse {
        let message = match self {
            AppError::MethodNotAllowed => None,
            other => Some(other.to_string()),
        };
        let status = match self {
            AppError::Upstream { status, .. } => Some(*status),
            _ => None,
        };

        ErrorResponse {
            error: self.label().to_string(),
            message,
            status,
            error_type: self.kind().map(str::to_string),
        }
    }

    /// Convert to a GraphQL `{ errors: [...] }` response
    pub fn into_graphql_response(self) -> Response {
        let status = self.status_code();
        self.log(status);

        (status, Json(GraphQLResponse::error(self.to_string()))).into_response()
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            tracing::error!("Application error: {} - Status code: {}", self, status);
        } else {
            tracing::warn!("Client error: {} - Status code: {}", self.label(), status);
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log(status);

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
