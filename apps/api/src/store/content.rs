use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::content::{ContentType, GeneratedContentRow};

pub struct NewGeneratedContent<'a> {
    pub content_type: ContentType,
    pub content: &'a str,
    pub job_posting_id: Option<Uuid>,
    pub user_profile_id: Option<i16>,
}

pub async fn insert_generated_content(
    pool: &PgPool,
    new: NewGeneratedContent<'_>,
) -> Result<GeneratedContentRow, sqlx::Error> {
    let row = sqlx::query_as::<_, GeneratedContentRow>(
        r#"
        INSERT INTO generated_content (id, content_type, content, job_posting_id, user_profile_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.content_type.as_str())
    .bind(new.content)
    .bind(new.job_posting_id)
    .bind(new.user_profile_id)
    .fetch_one(pool)
    .await?;

    info!(
        "Saved {} content {} ({} chars)",
        row.content_type,
        row.id,
        row.content.chars().count()
    );
    Ok(row)
}

pub async fn get_generated_content(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<GeneratedContentRow>, sqlx::Error> {
    sqlx::query_as::<_, GeneratedContentRow>("SELECT * FROM generated_content WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Newest content first.
pub async fn list_recent_generated_content(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<GeneratedContentRow>, sqlx::Error> {
    sqlx::query_as::<_, GeneratedContentRow>(
        "SELECT * FROM generated_content ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::jobs::{insert_job_posting, NewJobPosting};

    #[sqlx::test(migrations = "./migrations")]
    async fn test_content_round_trips_with_posting_link(pool: PgPool) {
        let posting = insert_job_posting(
            &pool,
            NewJobPosting {
                title: "Staff Engineer",
                company: "Globex",
                description: "Distributed systems",
                requirements: None,
            },
        )
        .await
        .unwrap();

        let saved = insert_generated_content(
            &pool,
            NewGeneratedContent {
                content_type: ContentType::CoverLetter,
                content: "Dear Hiring Manager,",
                job_posting_id: Some(posting.id),
                user_profile_id: None,
            },
        )
        .await
        .unwrap();

        let fetched = get_generated_content(&pool, saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.content_type, "cover_letter");
        assert_eq!(fetched.job_posting_id, Some(posting.id));
        assert_eq!(list_recent_generated_content(&pool, 20).await.unwrap().len(), 1);
        assert!(get_generated_content(&pool, Uuid::new_v4()).await.unwrap().is_none());
    }
}
