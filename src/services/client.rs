//! HTTP client service
//!
//! Encapsulates HTTP communication with the OpenAI API

use crate::config::Settings;
use crate::models::chat::UpstreamChatRequest;
use crate::models::image::UpstreamImageRequest;
use crate::utils::error::{AppError, AppResult};
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, error};

/// OpenAI API client
///
/// Holds no credentials; every call takes the key resolved for that request.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new client instance
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("airelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.openai.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Chat-completions endpoint URL
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Image-generations endpoint URL
    pub fn image_generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }

    /// Send a chat completion request
    ///
    /// A non-success status is turned into [`AppError::Upstream`]; on success
    /// the response is handed back untouched so the body can be streamed.
    pub async fn chat_completions(
        &self,
        request: &UpstreamChatRequest,
        api_key: &str,
    ) -> AppResult<Response> {
        debug!("Sending OpenAI chat completion request");
        self.post(&self.chat_completions_url(), request, api_key).await
    }

    /// Send an image generation request
    pub async fn image_generations(
        &self,
        request: &UpstreamImageRequest,
        api_key: &str,
    ) -> AppResult<Response> {
        debug!("Sending OpenAI image generation request");
        self.post(&self.image_generations_url(), request, api_key).await
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        api_key: &str,
    ) -> AppResult<Response> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        debug!("OpenAI response status: {}", response.status());
        Self::check_status(response).await
    }

    /// Handle HTTP response status
    async fn check_status(response: Response) -> AppResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("OpenAI API error: {} - {}", status, error_text);

        Err(AppError::Upstream {
            status: status.as_u16(),
            body: error_text,
        })
    }
}
