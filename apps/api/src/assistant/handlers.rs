//! Axum route handlers for the generation endpoints.
//!
//! Each handler reads its prerequisites from the store, calls the service, and saves
//! the result. Generation failures come back as HTTP 200 with an error outcome in the body.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::outcome::GenerationOutcome;
use crate::assistant::service::{
    analyze_job_posting, customize_resume, generate_cover_letter, generate_interview_questions,
};
use crate::errors::AppError;
use crate::models::content::ContentType;
use crate::models::job_posting::JobPostingRow;
use crate::models::profile::UserProfileRow;
use crate::state::AppState;
use crate::store::content::{insert_generated_content, NewGeneratedContent};
use crate::store::jobs::{get_job_posting, insert_job_posting, NewJobPosting};
use crate::store::profile::get_profile;

const TITLE_MAX_CHARS: usize = 200;
const COMPANY_MAX_CHARS: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub content_type: ContentType,
    pub label: &'static str,
    pub job_posting_id: Uuid,
    /// Set when the outcome was `ok` and the content was saved.
    pub content_id: Option<Uuid>,
    pub outcome: GenerationOutcome,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/analyze
///
/// Saves the posting, then analyzes it.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    validate_analyze_request(&request)?;

    let posting = insert_job_posting(
        &state.db,
        NewJobPosting {
            title: request.title.trim(),
            company: request.company.trim(),
            description: &request.description,
            requirements: request.requirements.as_deref().filter(|r| !r.trim().is_empty()),
        },
    )
    .await?;

    let outcome = analyze_job_posting(state.llm.as_ref(), &posting.description).await;

    respond(&state, ContentType::JobAnalysis, &posting, None, outcome).await
}

/// POST /api/v1/jobs/:id/resume-customization
pub async fn handle_customize_resume(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<GenerationResponse>, AppError> {
    let (posting, profile) = load_prerequisites(&state, job_id).await?;

    let outcome =
        customize_resume(state.llm.as_ref(), &posting.description, &profile.fields).await;

    respond(
        &state,
        ContentType::ResumeCustomization,
        &posting,
        Some(&profile),
        outcome,
    )
    .await
}

/// POST /api/v1/jobs/:id/cover-letter
///
/// Company name and position title come from the stored posting.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<GenerationResponse>, AppError> {
    let (posting, profile) = load_prerequisites(&state, job_id).await?;

    let outcome = generate_cover_letter(
        state.llm.as_ref(),
        &posting.description,
        &profile.fields,
        &posting.company,
        &posting.title,
    )
    .await;

    respond(&state, ContentType::CoverLetter, &posting, Some(&profile), outcome).await
}

/// POST /api/v1/jobs/:id/interview-questions
///
/// Needs only the posting. The stored profile is used when there is one.
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<GenerationResponse>, AppError> {
    let posting = load_posting(&state, job_id).await?;
    let profile = get_profile(&state.db).await?;
    let fields = profile.as_ref().map(|p| p.fields.clone()).unwrap_or_default();

    let outcome = generate_interview_questions(
        state.llm.as_ref(),
        &posting.description,
        &fields,
        &posting.title,
    )
    .await;

    respond(
        &state,
        ContentType::InterviewQuestions,
        &posting,
        profile.as_ref(),
        outcome,
    )
    .await
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_analyze_request(request: &AnalyzeJobRequest) -> Result<(), AppError> {
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide a job description.".to_string(),
        ));
    }
    if request.title.trim().chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    if request.company.trim().chars().count() > COMPANY_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "company must be at most {COMPANY_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

async fn load_prerequisites(
    state: &AppState,
    job_id: Uuid,
) -> Result<(JobPostingRow, UserProfileRow), AppError> {
    let posting = load_posting(state, job_id).await?;

    let profile = get_profile(&state.db)
        .await?
        .filter(|p| !p.fields.is_blank())
        .ok_or_else(|| AppError::Validation("Please create your profile first.".to_string()))?;

    Ok((posting, profile))
}

async fn load_posting(state: &AppState, job_id: Uuid) -> Result<JobPostingRow, AppError> {
    get_job_posting(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job posting not found.".to_string()))
}

/// Saves successful content and wraps the outcome for the client.
async fn respond(
    state: &AppState,
    content_type: ContentType,
    posting: &JobPostingRow,
    profile: Option<&UserProfileRow>,
    outcome: GenerationOutcome,
) -> Result<Json<GenerationResponse>, AppError> {
    let content_id = match outcome.content() {
        Some(content) => {
            let row = insert_generated_content(
                &state.db,
                NewGeneratedContent {
                    content_type,
                    content,
                    job_posting_id: Some(posting.id),
                    user_profile_id: profile.map(|p| p.id),
                },
            )
            .await?;
            Some(row.id)
        }
        None => None,
    };

    Ok(Json(GenerationResponse {
        content_type,
        label: content_type.label(),
        job_posting_id: posting.id,
        content_id,
        outcome,
    }))
}
