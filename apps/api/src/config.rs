use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub llm_model: String,
    pub llm_api_url: String,
    pub llm_max_retries: u32,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    /// Resume archive storage. Uploads are not archived when unset.
    pub s3: Option<S3Config>,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3 = optional_env("S3_BUCKET").map(|bucket| S3Config {
            bucket,
            endpoint: optional_env("S3_ENDPOINT"),
            access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
        });

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_api_url: optional_env("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            llm_max_retries: parse_env("LLM_MAX_RETRIES", 0)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            s3,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
