//! CORS middleware
//!
//! Every `OPTIONS` request is answered here with 200 and an empty body,
//! whatever the path. All other responses get `Access-Control-Allow-Origin: *`.

use crate::config::settings::SecurityConfig;
use anyhow::{Context, Result};
use axum::http::{header, HeaderName, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Preflight cache lifetime
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86400);

/// Build the CORS layer
pub fn cors_layer(security: &SecurityConfig) -> Result<CorsLayer> {
    let key_header = HeaderName::from_bytes(security.api_key_header.as_bytes())
        .with_context(|| format!("Invalid API key header name: {}", security.api_key_header))?;

    Ok(CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, key_header])
        .max_age(PREFLIGHT_MAX_AGE))
}
