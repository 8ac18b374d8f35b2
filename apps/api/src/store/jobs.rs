use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job_posting::JobPostingRow;

pub struct NewJobPosting<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub description: &'a str,
    pub requirements: Option<&'a str>,
}

pub async fn insert_job_posting(
    pool: &PgPool,
    posting: NewJobPosting<'_>,
) -> Result<JobPostingRow, sqlx::Error> {
    let row = sqlx::query_as::<_, JobPostingRow>(
        r#"
        INSERT INTO job_postings (id, title, company, description, requirements)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(posting.title)
    .bind(posting.company)
    .bind(posting.description)
    .bind(posting.requirements)
    .fetch_one(pool)
    .await?;

    info!("Saved job posting {} ({} at {})", row.id, row.title, row.company);
    Ok(row)
}

pub async fn get_job_posting(pool: &PgPool, id: Uuid) -> Result<Option<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Newest postings first.
pub async fn list_recent_job_postings(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<JobPostingRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostingRow>(
        "SELECT * FROM job_postings ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
