use std::sync::Arc;

use sqlx::PgPool;

use crate::archive::ResumeArchive;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Text generator behind every prompt. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    /// Present only when object storage is configured.
    pub archive: Option<ResumeArchive>,
    pub config: Config,
}
