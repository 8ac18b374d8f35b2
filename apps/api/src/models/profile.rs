use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// The profile table holds a single row under this key.
pub const PROFILE_KEY: i16 = 1;

pub const NAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 120;
pub const PHONE_MAX_CHARS: usize = 40;

/// Free-text profile fields. Also the shape of a parsed resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct ProfileFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub certifications: String,
}

impl ProfileFields {
    /// Field names paired with their values, in display order.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("summary", self.summary.as_str()),
            ("experience", self.experience.as_str()),
            ("education", self.education.as_str()),
            ("skills", self.skills.as_str()),
            ("projects", self.projects.as_str()),
            ("certifications", self.certifications.as_str()),
        ]
    }

    pub fn is_blank(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfileRow {
    pub id: i16,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub fields: ProfileFields,
    /// Last structured resume parse, kept next to the flattened text fields.
    pub resume_data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
