//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod graphql;
pub mod proxy;

use crate::config::Settings;
use crate::middleware::{cors_layer, request_logging_middleware};
use crate::services::{Forwarder, GraphQLDispatcher, OpenAIClient};
use crate::utils::error::{AppError, AppResult};
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderMap,
    middleware,
    routing::post,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub forwarder: Forwarder,
    pub dispatcher: GraphQLDispatcher,
}

impl AppState {
    /// Build state from settings
    pub fn new(settings: Settings) -> Result<Self> {
        let client = OpenAIClient::new(&settings)?;
        let forwarder = Forwarder::new(client);
        let dispatcher = GraphQLDispatcher::new(forwarder.clone());

        Ok(Self {
            settings,
            forwarder,
            dispatcher,
        })
    }

    /// Resolve the upstream API key for one request
    ///
    /// A non-empty override header wins over the configured secret.
    pub fn resolve_api_key(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(self.settings.security.api_key_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| self.settings.openai.api_key.clone())
    }

    /// Like [`AppState::resolve_api_key`], failing when no key is available
    pub fn require_api_key(&self, headers: &HeaderMap) -> AppResult<String> {
        self.resolve_api_key(headers).ok_or(AppError::MissingApiKey)
    }
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let cors = cors_layer(&settings.security)?;
    let max_request_size = settings.request.max_request_size;

    // Create application state
    let app_state = Arc::new(AppState::new(settings)?);

    // Create middleware stack; CORS sits outside routing so preflight
    // requests never reach a handler
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_request_size));

    // Create routes
    let router = Router::new()
        .route(
            "/graphql",
            post(graphql::handle_graphql).fallback(proxy::method_not_allowed),
        )
        .route(
            "/images/generations",
            post(proxy::handle_image_generation).fallback(proxy::method_not_allowed),
        )
        .route(
            "/generate-image",
            post(proxy::handle_image_generation).fallback(proxy::method_not_allowed),
        )
        .fallback(proxy::handle_proxy)
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}
