use crate::core::AppError;
use crate::models::announcements::{Announcement, CreateAnnouncementRequest};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_announcement(
    pool: &PgPool,
    request: &CreateAnnouncementRequest,
) -> Result<Announcement, AppError> {
    let announcement = sqlx::query_as::<_, Announcement>(
        r#"
        INSERT INTO announcements (id, title, description, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.title)
    .bind(&request.description)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(announcement)
}

pub async fn fetch_announcements(pool: &PgPool) -> Result<Vec<Announcement>, AppError> {
    let announcements =
        sqlx::query_as::<_, Announcement>("SELECT * FROM announcements ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(AppError::db_error)?;

    Ok(announcements)
}
