//! Chat completion data models
//!
//! Inbound chat requests and the body sent to the upstream chat-completions endpoint

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::utils::json::is_truthy;

/// Default upstream chat model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default completion length
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Chat request as received from a caller
///
/// Known fields are kept as raw JSON so that whatever the caller sent,
/// `null` included, reaches the upstream unchanged. `None` means the key
/// was absent. Everything else lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// Model name
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    /// Conversation so far, forwarded element for element
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub messages: Option<Value>,
    /// Temperature parameter
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    /// Maximum tokens to generate
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<Value>,
    /// Whether to stream response
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub stream: Option<Value>,
    /// Pass-through fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body posted to the upstream chat-completions endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpstreamChatRequest {
    pub model: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Value>,
    pub temperature: Value,
    pub max_tokens: Value,
    pub stream: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpstreamChatRequest {
    /// Whether the upstream should answer with an event stream
    pub fn is_streaming(&self) -> bool {
        is_truthy(&self.stream)
    }

    /// Number of messages, for log summaries
    pub fn message_count(&self) -> usize {
        self.messages
            .as_ref()
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

impl From<ChatCompletionRequest> for UpstreamChatRequest {
    /// Apply defaults for every known field the caller left out; any key the
    /// caller did send wins, whatever its value.
    fn from(request: ChatCompletionRequest) -> Self {
        Self {
            model: request.model.unwrap_or_else(|| json!(DEFAULT_CHAT_MODEL)),
            messages: request.messages,
            temperature: request.temperature.unwrap_or_else(|| json!(DEFAULT_TEMPERATURE)),
            max_tokens: request.max_tokens.unwrap_or_else(|| json!(DEFAULT_MAX_TOKENS)),
            stream: request.stream.unwrap_or(Value::Bool(false)),
            extra: request.extra,
        }
    }
}

/// Keep an explicit `null` distinct from an absent key
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Pull the assistant text out of an upstream chat-completion response
pub fn first_choice_content(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
