//! AI Edge Relay Server
//!
//! HTTP relay that forwards chat and image requests to the OpenAI API

use airelay::{create_router, utils::logging::init_logging, version_info, Settings};
use anyhow::{Context, Result};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment (.env supported)
    let settings = Settings::new().context("Failed to load server settings")?;

    // Initialize logging
    init_logging(&settings.logging)?;
    info!("{}", version_info());

    if !settings.has_api_key() {
        warn!(
            "OPENAI_API_KEY is not set; upstream calls need the {} header",
            settings.security.api_key_header
        );
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Create router
    let app = create_router(settings).await?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 AI edge relay started!");
    info!("🔄 Chat endpoint: http://{}/", addr);
    info!("🖼️ Image endpoint: http://{}/images/generations", addr);
    info!("🧩 GraphQL endpoint: http://{}/graphql", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
