use crate::core::AppError;
use crate::models::bookings::{BookedSession, NewBookedSession};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_booking(
    pool: &PgPool,
    session_id: Uuid,
    student_email: &str,
) -> Result<Option<BookedSession>, AppError> {
    let booking = sqlx::query_as::<_, BookedSession>(
        "SELECT * FROM booked_sessions WHERE session_id = $1 AND student_email = $2",
    )
    .bind(session_id)
    .bind(student_email)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(booking)
}

#[tracing::instrument(name = "Insert booked session", skip(pool, new_booking))]
pub async fn insert_booking(
    pool: &PgPool,
    new_booking: &NewBookedSession,
) -> Result<BookedSession, AppError> {
    let result = sqlx::query_as::<_, BookedSession>(
        r#"
        INSERT INTO booked_sessions (
            id, session_id, session_title, registration_fee,
            student_email, tutor_email, payment_intent_id, booked_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_booking.session_id)
    .bind(&new_booking.session_title)
    .bind(&new_booking.registration_fee)
    .bind(&new_booking.student_email)
    .bind(&new_booking.tutor_email)
    .bind(&new_booking.payment_intent_id)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await;

    match result {
        Ok(booking) => Ok(booking),
        // The unique index on (session_id, student_email) is the canonical
        // duplicate-booking signal; concurrent requests both reach the insert
        // and exactly one wins.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(AppError::conflict("You have already booked this session."))
        }
        Err(e) => {
            tracing::error!("Failed to insert booked session: {:?}", e);
            Err(AppError::db_error(e))
        }
    }
}

pub async fn fetch_bookings_by_student(
    pool: &PgPool,
    student_email: &str,
) -> Result<Vec<BookedSession>, AppError> {
    let bookings = sqlx::query_as::<_, BookedSession>(
        "SELECT * FROM booked_sessions WHERE student_email = $1 ORDER BY booked_at DESC",
    )
    .bind(student_email)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(bookings)
}
