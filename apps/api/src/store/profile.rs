use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use crate::models::profile::{ProfileFields, UserProfileRow, PROFILE_KEY};

pub async fn get_profile(pool: &PgPool) -> Result<Option<UserProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, UserProfileRow>("SELECT * FROM user_profile WHERE id = $1")
        .bind(PROFILE_KEY)
        .fetch_optional(pool)
        .await
}

/// Writes the single profile row, creating it on first use. The stored resume parse is kept.
pub async fn upsert_profile(
    pool: &PgPool,
    fields: &ProfileFields,
) -> Result<UserProfileRow, sqlx::Error> {
    let row = sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profile
            (id, name, email, phone, summary, experience, education,
             skills, projects, certifications)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email,
            phone = EXCLUDED.phone,
            summary = EXCLUDED.summary,
            experience = EXCLUDED.experience,
            education = EXCLUDED.education,
            skills = EXCLUDED.skills,
            projects = EXCLUDED.projects,
            certifications = EXCLUDED.certifications,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(PROFILE_KEY)
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(&fields.summary)
    .bind(&fields.experience)
    .bind(&fields.education)
    .bind(&fields.skills)
    .bind(&fields.projects)
    .bind(&fields.certifications)
    .fetch_one(pool)
    .await?;

    info!("Saved profile for '{}'", row.fields.name);
    Ok(row)
}

/// Writes profile fields merged from an uploaded resume together with the structured
/// parse in one statement. `None` clears any parse left by an earlier upload.
pub async fn save_resume_data(
    pool: &PgPool,
    fields: &ProfileFields,
    resume_data: Option<&Value>,
) -> Result<UserProfileRow, sqlx::Error> {
    let row = sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profile
            (id, name, email, phone, summary, experience, education,
             skills, projects, certifications, resume_data)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            email = EXCLUDED.email,
            phone = EXCLUDED.phone,
            summary = EXCLUDED.summary,
            experience = EXCLUDED.experience,
            education = EXCLUDED.education,
            skills = EXCLUDED.skills,
            projects = EXCLUDED.projects,
            certifications = EXCLUDED.certifications,
            resume_data = EXCLUDED.resume_data,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(PROFILE_KEY)
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(&fields.summary)
    .bind(&fields.experience)
    .bind(&fields.education)
    .bind(&fields.skills)
    .bind(&fields.projects)
    .bind(&fields.certifications)
    .bind(resume_data)
    .fetch_one(pool)
    .await?;

    info!(
        "Saved resume-derived profile for '{}' (structured: {})",
        row.fields.name,
        row.resume_data.is_some()
    );
    Ok(row)
}
