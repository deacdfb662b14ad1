//! Data model tests

use airelay::models::chat::{ChatCompletionRequest, UpstreamChatRequest};
use airelay::models::graphql::{GraphQLRequest, GraphQLResponse, MessagePayload, SessionPayload};
use airelay::models::image::ImageGenerationRequest;
use airelay::utils::error::AppError;
use serde_json::{json, Value};

#[test]
fn test_chat_merge_keeps_caller_fields() {
    let request: ChatCompletionRequest = serde_json::from_value(json!({
        "messages": [{"role": "user", "content": "hi", "name": "bob"}],
        "max_tokens": 20,
        "tools": [{"type": "function"}],
        "response_format": {"type": "json_object"}
    }))
    .unwrap();

    let upstream = serde_json::to_value(UpstreamChatRequest::from(request)).unwrap();

    assert_eq!(
        upstream,
        json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": "hi", "name": "bob"}],
            "temperature": 0.7,
            "max_tokens": 20,
            "stream": false,
            "tools": [{"type": "function"}],
            "response_format": {"type": "json_object"}
        })
    );
}

#[test]
fn test_chat_message_content_parts_pass_through() {
    let parts = json!([
        {"type": "text", "text": "what is this?"},
        {"type": "image_url", "image_url": {"url": "https://example.com/a.png"}}
    ]);
    let request: ChatCompletionRequest = serde_json::from_value(json!({
        "messages": [{"role": "user", "content": parts.clone()}]
    }))
    .unwrap();

    let upstream = serde_json::to_value(UpstreamChatRequest::from(request)).unwrap();
    assert_eq!(upstream["messages"][0]["content"], parts);
}

#[test]
fn test_chat_known_fields_pass_through_as_sent() {
    let request: ChatCompletionRequest = serde_json::from_value(json!({
        "messages": [
            {"role": "assistant", "content": null, "tool_calls": []},
            "not an object"
        ],
        "max_tokens": 1000.0,
        "temperature": null
    }))
    .unwrap();

    let upstream = serde_json::to_value(UpstreamChatRequest::from(request)).unwrap();

    assert_eq!(
        upstream["messages"],
        json!([{"role": "assistant", "content": null, "tool_calls": []}, "not an object"])
    );
    assert_eq!(upstream["max_tokens"], json!(1000.0));
    assert_eq!(upstream["temperature"], Value::Null);
    assert_eq!(upstream["model"], "gpt-3.5-turbo");
}

#[test]
fn test_image_request_defaults() {
    let request: ImageGenerationRequest = serde_json::from_value(json!({"prompt": "a boat"})).unwrap();
    let upstream = serde_json::to_value(request.into_upstream().unwrap()).unwrap();

    assert_eq!(
        upstream,
        json!({
            "prompt": "a boat",
            "model": "dall-e-3",
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
            "style": "vivid",
            "response_format": "url"
        })
    );
}

#[test]
fn test_image_request_ignores_unknown_fields() {
    let request: ImageGenerationRequest =
        serde_json::from_value(json!({"prompt": "a boat", "action": "generate-image", "seed": 4}))
            .unwrap();
    let upstream = serde_json::to_value(request.into_upstream().unwrap()).unwrap();

    assert!(upstream.get("action").is_none());
    assert!(upstream.get("seed").is_none());
}

#[test]
fn test_image_request_missing_prompt() {
    let request = ImageGenerationRequest::default();
    assert!(matches!(request.into_upstream(), Err(AppError::MissingPrompt)));
}

#[test]
fn test_graphql_request_input() {
    let request: GraphQLRequest = serde_json::from_value(json!({
        "query": "mutation { sendMessage }",
        "operationName": "Send",
        "variables": {"input": {"content": "x"}}
    }))
    .unwrap();

    assert_eq!(request.operation_name.as_deref(), Some("Send"));
    assert_eq!(request.input(), json!({"content": "x"}));

    let empty = GraphQLRequest::default();
    assert_eq!(empty.input(), Value::Null);
}

#[test]
fn test_graphql_payloads_use_camel_case() {
    let session = serde_json::to_value(SessionPayload {
        session_id: "session_1_abc".to_string(),
        success: true,
    })
    .unwrap();
    assert_eq!(session, json!({"sessionId": "session_1_abc", "success": true}));

    let message = serde_json::to_value(MessagePayload {
        id: "msg_1_user".to_string(),
        content: "hi".to_string(),
        is_user: true,
        timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        success: true,
        error: None,
    })
    .unwrap();
    assert_eq!(message["isUser"], true);
    assert_eq!(message["error"], Value::Null);
}

#[test]
fn test_graphql_response_envelopes() {
    assert_eq!(
        serde_json::to_value(GraphQLResponse::data(json!({"chatHistory": []}))).unwrap(),
        json!({"data": {"chatHistory": []}})
    );
    assert_eq!(
        serde_json::to_value(GraphQLResponse::error("boom")).unwrap(),
        json!({"errors": [{"message": "boom"}]})
    );
}
