pub mod content;
pub mod health;
pub mod jobs;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::assistant::handlers as assistant;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .route(
            "/api/v1/profile/resume",
            post(profile::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Job postings and generation
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/analyze", post(assistant::handle_analyze_job))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route(
            "/api/v1/jobs/:id/resume-customization",
            post(assistant::handle_customize_resume),
        )
        .route(
            "/api/v1/jobs/:id/cover-letter",
            post(assistant::handle_cover_letter),
        )
        .route(
            "/api/v1/jobs/:id/interview-questions",
            post(assistant::handle_interview_questions),
        )
        // Generated content
        .route("/api/v1/content", get(content::handle_list_content))
        .route("/api/v1/content/:id", get(content::handle_get_content))
        .route(
            "/api/v1/content/:id/download",
            get(content::handle_download_content),
        )
        // Application tracking
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications)
                .post(applications::handle_create_application),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application)
                .put(applications::handle_update_application)
                .delete(applications::handle_delete_application),
        )
        .with_state(state)
}
