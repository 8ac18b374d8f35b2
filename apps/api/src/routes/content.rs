use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::content::GeneratedContentRow;
use crate::routes::jobs::RecentQuery;
use crate::state::AppState;
use crate::store::content::{get_generated_content, list_recent_generated_content};

const DEFAULT_LIMIT: i64 = 20;

/// GET /api/v1/content
pub async fn handle_list_content(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<GeneratedContentRow>>, AppError> {
    let rows = list_recent_generated_content(&state.db, query.clamped(DEFAULT_LIMIT)).await?;
    Ok(Json(rows))
}

/// GET /api/v1/content/:id
pub async fn handle_get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GeneratedContentRow>, AppError> {
    Ok(Json(load(&state, id).await?))
}

/// GET /api/v1/content/:id/download
///
/// Serves the stored text as a plain-text attachment.
pub async fn handle_download_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = load(&state, id).await?;
    let disposition = format!("attachment; filename=\"{}\"", row.download_file_name());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        row.content,
    ))
}

async fn load(state: &AppState, id: Uuid) -> Result<GeneratedContentRow, AppError> {
    get_generated_content(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Content not found.".to_string()))
}
