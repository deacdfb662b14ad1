//! GraphQL operation dispatcher
//!
//! Turns a GraphQL envelope into the `data` object of the response. Only the
//! query text decides the operation; `operationName` is logged and ignored.

use crate::models::chat::{first_choice_content, ChatCompletionRequest, UpstreamChatRequest};
use crate::models::graphql::{GraphQLRequest, ImagePayload, MessagePayload, SessionPayload};
use crate::models::image::ImageGenerationRequest;
use crate::services::forwarder::Forwarder;
use crate::services::operation::{KeywordClassifier, Operation, OperationClassifier};
use crate::utils::error::{AppError, AppResult};
use crate::utils::ids;
use crate::utils::json::text_or_empty;
use crate::utils::logging::truncate_content;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Dispatches GraphQL pseudo-operations
#[derive(Debug, Clone)]
pub struct GraphQLDispatcher {
    forwarder: Forwarder,
    classifier: Arc<dyn OperationClassifier>,
}

impl GraphQLDispatcher {
    /// Create a dispatcher using keyword classification
    pub fn new(forwarder: Forwarder) -> Self {
        Self::with_classifier(forwarder, Arc::new(KeywordClassifier))
    }

    pub fn with_classifier(forwarder: Forwarder, classifier: Arc<dyn OperationClassifier>) -> Self {
        Self { forwarder, classifier }
    }

    /// Run the operation named by `request.query`
    ///
    /// Returns the `data` object, e.g. `{"createSession": {...}}`. The API key
    /// is only consulted by operations that reach the provider.
    pub async fn dispatch(&self, request: &GraphQLRequest, api_key: Option<&str>) -> AppResult<Value> {
        let query = request.query.as_deref().unwrap_or_default();
        debug!(
            "GraphQL request: operationName={:?} query={}",
            request.operation_name,
            truncate_content(query, 80)
        );

        let operation = self
            .classifier
            .classify(query)
            .ok_or(AppError::UnsupportedOperation)?;

        let api_key = match api_key {
            None if operation.requires_upstream() => return Err(AppError::MissingApiKey),
            key => key.unwrap_or_default(),
        };

        let payload = match operation {
            Operation::CreateSession => serde_json::to_value(create_session())?,
            Operation::ChatHistory => Value::Array(Vec::new()),
            Operation::SendMessage => serde_json::to_value(send_message(&request.input()))?,
            Operation::GetAIResponse => {
                serde_json::to_value(self.get_ai_response(request.input(), api_key).await?)?
            }
            Operation::GenerateImage => {
                serde_json::to_value(self.generate_image(request.input(), api_key).await?)?
            }
        };

        let mut data = Map::new();
        data.insert(operation.field_name().to_string(), payload);
        Ok(Value::Object(data))
    }

    async fn get_ai_response(&self, input: Value, api_key: &str) -> AppResult<MessagePayload> {
        let request: ChatCompletionRequest = parse_input(input, Operation::GetAIResponse)?;

        let mut upstream = UpstreamChatRequest::from(request);
        upstream.stream = Value::Bool(false);

        let response = self.forwarder.complete_chat(&upstream, api_key).await?;
        let id = response
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| ids::message_id("ai"));

        Ok(MessagePayload {
            id,
            content: first_choice_content(&response),
            is_user: false,
            timestamp: ids::timestamp(),
            success: true,
            error: None,
        })
    }

    async fn generate_image(&self, input: Value, api_key: &str) -> AppResult<ImagePayload> {
        let request: ImageGenerationRequest = parse_input(input, Operation::GenerateImage)?;
        let upstream = request.into_upstream()?;

        let response = self.forwarder.generate_image(&upstream, api_key).await?;
        let images = response
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(ImagePayload {
            id: ids::image_id(),
            prompt: upstream.prompt,
            images,
            model: upstream.model,
            size: upstream.size,
            quality: upstream.quality,
            style: upstream.style,
            timestamp: ids::timestamp(),
            success: true,
            error: None,
        })
    }
}

fn create_session() -> SessionPayload {
    SessionPayload {
        session_id: ids::session_id(),
        success: true,
    }
}

/// Echo the caller's message back; nothing is sent upstream or stored
fn send_message(input: &Value) -> MessagePayload {
    MessagePayload {
        id: ids::message_id("user"),
        content: text_or_empty(input.get("content")),
        is_user: true,
        timestamp: ids::timestamp(),
        success: true,
        error: None,
    }
}

fn parse_input<T>(input: Value, operation: Operation) -> AppResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if input.is_null() {
        return Ok(T::default());
    }

    serde_json::from_value(input)
        .map_err(|e| AppError::Validation(format!("Invalid {} input: {}", operation.field_name(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_message_echoes_content() {
        let payload = send_message(&json!({"content": "hello"}));
        assert_eq!(payload.content, "hello");
        assert!(payload.is_user);
        assert!(payload.id.ends_with("_user"));
    }

    #[test]
    fn test_send_message_defaults_to_empty() {
        assert_eq!(send_message(&Value::Null).content, "");
        assert_eq!(send_message(&json!({"content": null})).content, "");
    }

    #[test]
    fn test_send_message_unset_content_is_empty() {
        for content in [json!(0), json!(false), json!("")] {
            assert_eq!(send_message(&json!({"content": content})).content, "");
        }
        assert_eq!(send_message(&json!({"content": 7})).content, "7");
    }

    #[test]
    fn test_parse_input_null_is_default() {
        let request: ImageGenerationRequest = parse_input(Value::Null, Operation::GenerateImage).unwrap();
        assert!(request.prompt.is_none());
    }

    #[test]
    fn test_parse_input_rejects_non_objects() {
        let result: AppResult<ChatCompletionRequest> =
            parse_input(json!("just text"), Operation::GetAIResponse);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
