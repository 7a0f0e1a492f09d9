use crate::core::AppError;
use crate::models::reviews::{PostReviewRequest, PostTutorReviewRequest, Review};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_session_review(
    pool: &PgPool,
    request: &PostReviewRequest,
) -> Result<Review, AppError> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (id, session_id, tutor_id, student_email, comment, rating, reviewed_at)
        VALUES ($1, $2, NULL, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.session_id)
    .bind(&request.student_email)
    .bind(&request.comment)
    .bind(request.rating)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(review)
}

pub async fn insert_tutor_review(
    pool: &PgPool,
    request: &PostTutorReviewRequest,
) -> Result<Review, AppError> {
    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (id, session_id, tutor_id, student_email, comment, rating, reviewed_at)
        VALUES ($1, NULL, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.tutor_id)
    .bind(&request.student_email)
    .bind(&request.comment)
    .bind(request.rating)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(review)
}

pub async fn fetch_reviews_by_session(
    pool: &PgPool,
    session_id: Uuid,
) -> Result<Vec<Review>, AppError> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE session_id = $1 ORDER BY reviewed_at DESC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(reviews)
}

pub async fn fetch_reviews_by_tutor(
    pool: &PgPool,
    tutor_id: Uuid,
) -> Result<Vec<Review>, AppError> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE tutor_id = $1 ORDER BY reviewed_at DESC",
    )
    .bind(tutor_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(reviews)
}
