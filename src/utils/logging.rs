//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::config::settings::LoggingConfig;
use crate::models::chat::UpstreamChatRequest;
use crate::models::image::UpstreamImageRequest;
use anyhow::Result;
use serde_json::Value;

/// Set to true to include full message contents in debug logs
/// Default is false to reduce log verbosity
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Initialize logging system
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", kept, s.chars().count() - max_len)
    } else {
        s.to_string()
    }
}

/// Create a filtered summary of an outbound chat request for logging
pub fn create_chat_request_log_summary(request: &UpstreamChatRequest) -> Value {
    if VERBOSE_REQUEST_LOGGING {
        serde_json::to_value(request).unwrap_or(serde_json::json!({"error": "serialize failed"}))
    } else {
        let extra_fields: Vec<&String> = request.extra.keys().collect();
        serde_json::json!({
            "model": request.model,
            "messagesCount": request.message_count(),
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "stream": request.stream,
            "extraFields": extra_fields,
        })
    }
}

/// Create a filtered summary of an outbound image request for logging
pub fn create_image_request_log_summary(request: &UpstreamImageRequest) -> Value {
    serde_json::json!({
        "model": request.model,
        "prompt": truncate_content(&request.prompt, 80),
        "n": request.n,
        "size": request.size,
        "quality": request.quality,
        "style": request.style,
    })
}

/// Create a summary of an upstream chat response for logging
pub fn create_chat_response_log_summary(response: &Value) -> Value {
    serde_json::json!({
        "id": response.get("id"),
        "model": response.get("model"),
        "choices": response.get("choices").and_then(Value::as_array).map(Vec::len),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatCompletionRequest;
    use serde_json::json;

    #[test]
    fn test_truncate_content() {
        assert_eq!(truncate_content("short", 10), "short");
        assert_eq!(truncate_content("abcdef", 3), "abc... (3 chars truncated)");
    }

    #[test]
    fn test_chat_summary_hides_messages() {
        let request = UpstreamChatRequest::from(ChatCompletionRequest {
            messages: Some(json!([{"role": "user", "content": "secret text"}])),
            ..Default::default()
        });
        let summary = create_chat_request_log_summary(&request);

        assert_eq!(summary["messagesCount"], 1);
        assert!(!summary.to_string().contains("secret text"));
    }
}
