use crate::core::AppError;
use crate::models::pagination::PaginationQuery;
use crate::models::sessions::{CreateSessionRequest, SessionStatus, StudySession};
use bigdecimal::BigDecimal;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Insert study session", skip(pool, request))]
pub async fn insert_session(
    pool: &PgPool,
    request: &CreateSessionRequest,
) -> Result<StudySession, AppError> {
    let now = Utc::now().naive_utc();

    let session = sqlx::query_as::<_, StudySession>(
        r#"
        INSERT INTO study_sessions (
            id, tutor_name, tutor_email, session_title, session_description,
            registration_start_date, registration_end_date, class_start_date,
            class_end_date, session_duration, status, is_paid, registration_fee,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.tutor_name)
    .bind(&request.tutor_email)
    .bind(&request.session_title)
    .bind(&request.session_description)
    .bind(request.registration_start_date)
    .bind(request.registration_end_date)
    .bind(request.class_start_date)
    .bind(request.class_end_date)
    .bind(&request.session_duration)
    .bind(SessionStatus::Pending.as_str())
    .bind(false)
    .bind(BigDecimal::from(0))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(session)
}

pub async fn find_session_by_id(
    pool: &PgPool,
    session_id: Uuid,
) -> Result<Option<StudySession>, AppError> {
    let session = sqlx::query_as::<_, StudySession>("SELECT * FROM study_sessions WHERE id = $1")
        .bind(session_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(session)
}

pub async fn fetch_approved_sessions(
    pool: &PgPool,
    limit: Option<i64>,
) -> Result<Vec<StudySession>, AppError> {
    let result = match limit {
        Some(limit) => {
            sqlx::query_as::<_, StudySession>(
                r#"
                SELECT * FROM study_sessions
                WHERE status = $1
                ORDER BY registration_end_date DESC
                LIMIT $2
                "#,
            )
            .bind(SessionStatus::Approved.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, StudySession>(
                r#"
                SELECT * FROM study_sessions
                WHERE status = $1
                ORDER BY registration_end_date DESC
                "#,
            )
            .bind(SessionStatus::Approved.as_str())
            .fetch_all(pool)
            .await
        }
    };

    result.map_err(AppError::db_error)
}

pub async fn fetch_sessions_by_tutor(
    pool: &PgPool,
    tutor_email: &str,
) -> Result<Vec<StudySession>, AppError> {
    let sessions = sqlx::query_as::<_, StudySession>(
        "SELECT * FROM study_sessions WHERE tutor_email = $1 ORDER BY created_at DESC",
    )
    .bind(tutor_email)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(sessions)
}

pub async fn fetch_sessions_by_tutor_and_status(
    pool: &PgPool,
    tutor_email: &str,
    status: SessionStatus,
) -> Result<Vec<StudySession>, AppError> {
    let sessions = sqlx::query_as::<_, StudySession>(
        r#"
        SELECT * FROM study_sessions
        WHERE tutor_email = $1 AND status = $2
        ORDER BY created_at DESC
        "#,
    )
    .bind(tutor_email)
    .bind(status.as_str())
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(sessions)
}

pub async fn fetch_all_sessions(pool: &PgPool) -> Result<Vec<StudySession>, AppError> {
    let sessions = sqlx::query_as::<_, StudySession>(
        "SELECT * FROM study_sessions ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(sessions)
}

pub async fn fetch_sessions_page(
    pool: &PgPool,
    pagination: &PaginationQuery,
) -> Result<(Vec<StudySession>, i64), AppError> {
    let sessions = sqlx::query_as::<_, StudySession>(
        r#"
        SELECT * FROM study_sessions
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(pagination.limit)
    .bind(pagination.offset())
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    let total_sessions = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM study_sessions")
        .fetch_one(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok((sessions, total_sessions))
}

#[tracing::instrument(name = "Set study session status", skip(pool))]
pub async fn set_session_status(
    pool: &PgPool,
    session_id: Uuid,
    status: SessionStatus,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE study_sessions SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(status.as_str())
        .bind(Utc::now().naive_utc())
        .bind(session_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}

#[tracing::instrument(name = "Approve study session", skip(pool))]
pub async fn approve_session(
    pool: &PgPool,
    session_id: Uuid,
    is_paid: bool,
    registration_fee: &BigDecimal,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE study_sessions
        SET status = $1, is_paid = $2, registration_fee = $3, updated_at = $4
        WHERE id = $5
        "#,
    )
    .bind(SessionStatus::Approved.as_str())
    .bind(is_paid)
    .bind(registration_fee)
    .bind(Utc::now().naive_utc())
    .bind(session_id)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}

/// Writes the full merged record back; callers merge the patch over the
/// stored session and re-validate the fee fields before getting here.
#[tracing::instrument(name = "Update study session", skip(pool, session))]
pub async fn update_session(pool: &PgPool, session: &StudySession) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE study_sessions
        SET session_title = $1, session_description = $2,
            registration_start_date = $3, registration_end_date = $4,
            class_start_date = $5, class_end_date = $6, session_duration = $7,
            is_paid = $8, registration_fee = $9, updated_at = $10
        WHERE id = $11
        "#,
    )
    .bind(&session.session_title)
    .bind(&session.session_description)
    .bind(session.registration_start_date)
    .bind(session.registration_end_date)
    .bind(session.class_start_date)
    .bind(session.class_end_date)
    .bind(&session.session_duration)
    .bind(session.is_paid)
    .bind(&session.registration_fee)
    .bind(Utc::now().naive_utc())
    .bind(session.id)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}

#[tracing::instrument(name = "Delete study session", skip(pool))]
pub async fn delete_session(pool: &PgPool, session_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM study_sessions WHERE id = $1")
        .bind(session_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}
