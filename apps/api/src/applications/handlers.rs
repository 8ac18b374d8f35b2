use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationFilter, ApplicationInput, JobApplicationRow};
use crate::state::AppState;
use crate::store::applications::{
    delete_application, get_application, insert_application, list_applications,
    update_application,
};
use crate::store::jobs::get_job_posting;
use crate::store::profile::get_profile;

/// GET /api/v1/applications?status=&from=&to=
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(filter): Query<ApplicationFilter>,
) -> Result<Json<Vec<JobApplicationRow>>, AppError> {
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(AppError::Validation(
                "'from' must not be after 'to'".to_string(),
            ));
        }
    }
    let rows = list_applications(&state.db, &filter).await?;
    Ok(Json(rows))
}

/// POST /api/v1/applications
///
/// Links the stored profile when one exists.
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(input): Json<ApplicationInput>,
) -> Result<(StatusCode, Json<JobApplicationRow>), AppError> {
    validate_input(&input)?;
    ensure_posting_exists(&state, input.job_posting_id).await?;

    let profile_id = get_profile(&state.db).await?.map(|p| p.id);
    let row = insert_application(&state.db, profile_id, &input).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobApplicationRow>, AppError> {
    let row = get_application(&state.db, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(row))
}

/// PUT /api/v1/applications/:id
pub async fn handle_update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<JobApplicationRow>, AppError> {
    validate_input(&input)?;
    ensure_posting_exists(&state, input.job_posting_id).await?;

    let row = update_application(&state.db, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(row))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !delete_application(&state.db, id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Application {id} not found"))
}

fn validate_input(input: &ApplicationInput) -> Result<(), AppError> {
    for (field, value, max) in input.bounded_fields() {
        if value.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

async fn ensure_posting_exists(state: &AppState, job_posting_id: Option<Uuid>) -> Result<(), AppError> {
    if let Some(id) = job_posting_id {
        if get_job_posting(&state.db, id).await?.is_none() {
            return Err(AppError::Validation(format!("Job posting {id} does not exist")));
        }
    }
    Ok(())
}
