use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Saved,
    #[default]
    Applied,
    Screening,
    Interviewing,
    Offer,
    Accepted,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Saved => "saved",
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Screening => "screening",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offer => "offer",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub job_posting_id: Option<Uuid>,
    pub user_profile_id: Option<i16>,
    pub status: String,
    pub application_date: Option<NaiveDate>,
    pub job_url: String,
    pub salary_range: String,
    pub location: String,
    pub job_type: String,
    pub notes: String,
    pub follow_up_date: Option<NaiveDate>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of an application, used for both create and full update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationInput {
    pub job_posting_id: Option<Uuid>,
    pub status: ApplicationStatus,
    pub application_date: Option<NaiveDate>,
    pub job_url: String,
    pub salary_range: String,
    pub location: String,
    pub job_type: String,
    pub notes: String,
    pub follow_up_date: Option<NaiveDate>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl ApplicationInput {
    /// Column limits of the bounded text fields, as (field, value, max chars).
    pub fn bounded_fields(&self) -> [(&'static str, &str, usize); 6] {
        [
            ("salary_range", self.salary_range.as_str(), 100),
            ("location", self.location.as_str(), 200),
            ("job_type", self.job_type.as_str(), 50),
            ("contact_name", self.contact_name.as_str(), 100),
            ("contact_email", self.contact_email.as_str(), 120),
            ("contact_phone", self.contact_phone.as_str(), 40),
        ]
    }
}

/// Listing filter. Date bounds are inclusive and apply to `application_date`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
