use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::assistant::service::parse_resume;
use crate::documents::{extract_text, DocumentFormat, ExtractError};
use crate::errors::AppError;
use crate::models::profile::{
    ProfileFields, UserProfileRow, EMAIL_MAX_CHARS, NAME_MAX_CHARS, PHONE_MAX_CHARS,
};
use crate::profile::merge::merge_parsed_resume;
use crate::state::AppState;
use crate::store::profile::{get_profile, save_resume_data, upsert_profile};

/// Multipart field names accepted for the resume document.
const RESUME_FIELDS: [&str; 2] = ["resume", "file"];

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub profile: UserProfileRow,
    /// True when the reply could not be read as JSON and only the summary was filled.
    pub used_fallback: bool,
    pub archive_key: Option<String>,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<UserProfileRow>, AppError> {
    let profile = get_profile(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No profile has been created yet.".to_string()))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(fields): Json<ProfileFields>,
) -> Result<Json<UserProfileRow>, AppError> {
    validate_profile(&fields)?;
    let profile = upsert_profile(&state.db, &fields).await?;
    Ok(Json(profile))
}

/// POST /api/v1/profile/resume
///
/// Extracts the uploaded document, parses it into profile fields and merges them
/// over the stored profile. Parsed blanks never erase stored values. A parse with no
/// usable field writes nothing.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let (file_name, bytes) = read_resume_field(multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    let format = DocumentFormat::from_file_name(&file_name).ok_or_else(|| {
        AppError::UnprocessableEntity(ExtractError::UnsupportedFormat(file_name.clone()).to_string())
    })?;

    let archive_key = match &state.archive {
        Some(archive) => match archive.store(format, bytes.clone()).await {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("Could not archive resume '{file_name}': {e}");
                None
            }
        },
        None => None,
    };

    let raw_text = extract_off_runtime(file_name.clone(), bytes).await?;
    info!(
        "Extracted {} chars from '{}'",
        raw_text.chars().count(),
        file_name
    );

    let parse = parse_resume(state.llm.as_ref(), &raw_text)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    if parse.fields.is_blank() {
        return Err(AppError::UnprocessableEntity(
            "No profile details could be read from the resume".to_string(),
        ));
    }

    let existing = get_profile(&state.db)
        .await?
        .map(|p| p.fields)
        .unwrap_or_default();
    let merged = merge_parsed_resume(&existing, &parse.fields);

    let profile = save_resume_data(&state.db, &merged, parse.structured.as_ref()).await?;

    Ok(Json(ResumeUploadResponse {
        profile,
        used_fallback: parse.used_fallback,
        archive_key,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_profile(fields: &ProfileFields) -> Result<(), AppError> {
    let limits = [
        ("name", fields.name.as_str(), NAME_MAX_CHARS),
        ("email", fields.email.as_str(), EMAIL_MAX_CHARS),
        ("phone", fields.phone.as_str(), PHONE_MAX_CHARS),
    ];
    for (field, value, max) in limits {
        if value.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{field} must be at most {max} characters"
            )));
        }
    }
    Ok(())
}

/// Returns the first file part under an accepted field name, skipping everything else.
async fn read_resume_field(mut multipart: Multipart) -> Result<Option<(String, Bytes)>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let accepted = field.name().is_some_and(|name| RESUME_FIELDS.contains(&name));
        let file_name = match field.file_name() {
            Some(name) if accepted && !name.trim().is_empty() => name.to_string(),
            _ => continue,
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
        return Ok(Some((file_name, bytes)));
    }
    Ok(None)
}

/// Document parsers are blocking and may panic on hostile input; both stay off the runtime.
async fn extract_off_runtime(file_name: String, bytes: Bytes) -> Result<String, AppError> {
    let result = tokio::task::spawn_blocking(move || extract_text(&file_name, &bytes))
        .await
        .map_err(|e| {
            if e.is_panic() {
                warn!("Document extraction panicked");
                AppError::UnprocessableEntity(ExtractError::NoText.to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}"))
            }
        })?;

    result.map_err(|e| AppError::UnprocessableEntity(e.to_string()))
}
