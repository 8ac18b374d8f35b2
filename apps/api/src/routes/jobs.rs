use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_posting::JobPostingRow;
use crate::state::AppState;
use crate::store::jobs::{get_job_posting, list_recent_job_postings};

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

impl RecentQuery {
    pub fn clamped(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<JobPostingRow>>, AppError> {
    let rows = list_recent_job_postings(&state.db, query.clamped(DEFAULT_LIMIT)).await?;
    Ok(Json(rows))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobPostingRow>, AppError> {
    let row = get_job_posting(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job posting not found.".to_string()))?;
    Ok(Json(row))
}
