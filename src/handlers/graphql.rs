//! GraphQL endpoint handler
//!
//! POST /graphql

use crate::handlers::AppState;
use crate::models::graphql::{GraphQLRequest, GraphQLResponse};
use crate::utils::error::AppError;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// Handle GraphQL requests
///
/// Every failure, including an unreadable body, is reported as
/// `{"errors": [{"message": ...}]}`.
pub async fn handle_graphql(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request: GraphQLRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return AppError::Serialization(e).into_graphql_response(),
    };

    let api_key = state.resolve_api_key(&headers);

    match state.dispatcher.dispatch(&request, api_key.as_deref()).await {
        Ok(data) => {
            debug!("GraphQL request completed");
            (StatusCode::OK, Json(GraphQLResponse::data(data))).into_response()
        }
        Err(e) => e.into_graphql_response(),
    }
}
