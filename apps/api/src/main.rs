mod applications;
mod archive;
mod assistant;
mod config;
mod db;
mod documents;
mod errors;
mod llm_client;
mod models;
mod profile;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::archive::ResumeArchive;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{LlmClient, LlmSettings, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobwise API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let client = LlmClient::new(LlmSettings {
        api_key: config.anthropic_api_key.clone(),
        model: config.llm_model.clone(),
        api_url: config.llm_api_url.clone(),
        max_retries: config.llm_max_retries,
        timeout: Duration::from_secs(config.llm_timeout_secs),
    })?;
    info!("LLM client initialized (model: {})", client.model());
    let llm: Arc<dyn TextGenerator> = Arc::new(client);

    // Initialize resume archive (optional)
    let archive = match &config.s3 {
        Some(s3) => {
            let archive = ResumeArchive::connect(s3).await;
            info!("Resume archive enabled (bucket: {})", s3.bucket);
            Some(archive)
        }
        None => {
            info!("S3_BUCKET not set; uploaded resumes will not be archived");
            None
        }
    };

    let state = AppState {
        db,
        llm,
        archive,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
