use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of AI-produced artifact. Stored as its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    JobAnalysis,
    ResumeCustomization,
    CoverLetter,
    InterviewQuestions,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::JobAnalysis => "job_analysis",
            ContentType::ResumeCustomization => "resume_customization",
            ContentType::CoverLetter => "cover_letter",
            ContentType::InterviewQuestions => "interview_questions",
        }
    }

    /// Human-readable heading.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::JobAnalysis => "Job Analysis",
            ContentType::ResumeCustomization => "Resume Customization Suggestions",
            ContentType::CoverLetter => "Cover Letter",
            ContentType::InterviewQuestions => "Interview Questions",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedContentRow {
    pub id: Uuid,
    pub content_type: String,
    pub content: String,
    pub job_posting_id: Option<Uuid>,
    pub user_profile_id: Option<i16>,
    pub created_at: DateTime<Utc>,
}

impl GeneratedContentRow {
    /// File name offered when the content is downloaded.
    pub fn download_file_name(&self) -> String {
        format!("{}_{}.txt", self.content_type, self.id)
    }
}
