use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: Option<String>,
    pub created_at: DateTime<Utc>,
}
