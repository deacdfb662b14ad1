//! GraphQL envelope and payload models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound GraphQL request envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphQLRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub variables: Option<Value>,
    #[serde(rename = "operationName", default)]
    pub operation_name: Option<String>,
}

impl GraphQLRequest {
    /// `variables.input`, or null when absent
    pub fn input(&self) -> Value {
        self.variables
            .as_ref()
            .and_then(|v| v.get("input"))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Outbound GraphQL response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQLError {
    pub message: String,
}

impl GraphQLResponse {
    pub fn data(data: Value) -> Self {
        Self { data: Some(data), errors: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: Some(vec![GraphQLError { message: message.into() }]),
        }
    }
}

/// `createSession` payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub session_id: String,
    pub success: bool,
}

/// Message payload shared by `sendMessage` and `getAIResponse`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: String,
    pub success: bool,
    pub error: Option<String>,
}

/// `generateImage` payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImagePayload {
    pub id: String,
    pub prompt: String,
    pub images: Vec<Value>,
    pub model: String,
    pub size: String,
    pub quality: String,
    pub style: String,
    pub timestamp: String,
    pub success: bool,
    pub error: Option<String>,
}
