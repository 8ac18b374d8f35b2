use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::application::{ApplicationFilter, ApplicationInput, JobApplicationRow};

pub async fn insert_application(
    pool: &PgPool,
    user_profile_id: Option<i16>,
    input: &ApplicationInput,
) -> Result<JobApplicationRow, sqlx::Error> {
    let row = sqlx::query_as::<_, JobApplicationRow>(
        r#"
        INSERT INTO job_applications
            (id, job_posting_id, user_profile_id, status, application_date, job_url,
             salary_range, location, job_type, notes, follow_up_date,
             contact_name, contact_email, contact_phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.job_posting_id)
    .bind(user_profile_id)
    .bind(input.status.as_str())
    .bind(input.application_date)
    .bind(&input.job_url)
    .bind(&input.salary_range)
    .bind(&input.location)
    .bind(&input.job_type)
    .bind(&input.notes)
    .bind(input.follow_up_date)
    .bind(&input.contact_name)
    .bind(&input.contact_email)
    .bind(&input.contact_phone)
    .fetch_one(pool)
    .await?;

    info!("Created application {} (status {})", row.id, row.status);
    Ok(row)
}

pub async fn get_application(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<JobApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, JobApplicationRow>("SELECT * FROM job_applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Replaces every writable field. Returns `None` when the application does not exist.
pub async fn update_application(
    pool: &PgPool,
    id: Uuid,
    input: &ApplicationInput,
) -> Result<Option<JobApplicationRow>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobApplicationRow>(
        r#"
        UPDATE job_applications SET
            job_posting_id = $2,
            status = $3,
            application_date = $4,
            job_url = $5,
            salary_range = $6,
            location = $7,
            job_type = $8,
            notes = $9,
            follow_up_date = $10,
            contact_name = $11,
            contact_email = $12,
            contact_phone = $13,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(input.job_posting_id)
    .bind(input.status.as_str())
    .bind(input.application_date)
    .bind(&input.job_url)
    .bind(&input.salary_range)
    .bind(&input.location)
    .bind(&input.job_type)
    .bind(&input.notes)
    .bind(input.follow_up_date)
    .bind(&input.contact_name)
    .bind(&input.contact_email)
    .bind(&input.contact_phone)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = &row {
        info!("Updated application {} (status {})", row.id, row.status);
    }
    Ok(row)
}

/// Returns whether a row was deleted.
pub async fn delete_application(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!("Deleted application {id}");
    }
    Ok(deleted)
}

/// Most recent application dates first; undated applications last.
pub async fn list_applications(
    pool: &PgPool,
    filter: &ApplicationFilter,
) -> Result<Vec<JobApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, JobApplicationRow>(
        r#"
        SELECT * FROM job_applications
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::date IS NULL OR application_date >= $2)
          AND ($3::date IS NULL OR application_date <= $3)
        ORDER BY application_date DESC NULLS LAST, created_at DESC
        "#,
    )
    .bind(filter.status.map(|s| s.as_str()))
    .bind(filter.from)
    .bind(filter.to)
    .fetch_all(pool)
    .await
}
