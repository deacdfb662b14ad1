//! Image generation data models

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";
pub const DEFAULT_IMAGE_COUNT: u32 = 1;
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_IMAGE_QUALITY: &str = "standard";
pub const DEFAULT_IMAGE_STYLE: &str = "vivid";
pub const DEFAULT_RESPONSE_FORMAT: &str = "url";

/// Image request as received from a caller
///
/// Fields outside this set are ignored, not forwarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageGenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
}

/// Body posted to the upstream image-generations endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpstreamImageRequest {
    pub prompt: String,
    pub model: String,
    pub n: u32,
    pub size: String,
    pub quality: String,
    pub style: String,
    pub response_format: String,
}

impl ImageGenerationRequest {
    /// Validate the prompt and fill every empty field with its default
    pub fn into_upstream(self) -> AppResult<UpstreamImageRequest> {
        let prompt = non_empty(self.prompt).ok_or(AppError::MissingPrompt)?;

        Ok(UpstreamImageRequest {
            prompt,
            model: or_default(self.model, DEFAULT_IMAGE_MODEL),
            n: self.n.filter(|n| *n > 0).unwrap_or(DEFAULT_IMAGE_COUNT),
            size: or_default(self.size, DEFAULT_IMAGE_SIZE),
            quality: or_default(self.quality, DEFAULT_IMAGE_QUALITY),
            style: or_default(self.style, DEFAULT_IMAGE_STYLE),
            response_format: or_default(self.response_format, DEFAULT_RESPONSE_FORMAT),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or_else(|| default.to_string())
}
