use crate::core::AppError;
use crate::models::notes::{CreateNoteRequest, NoteRow, UpdateNoteRequest};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_note(pool: &PgPool, request: &CreateNoteRequest) -> Result<NoteRow, AppError> {
    let now = Utc::now().naive_utc();

    let note = sqlx::query_as::<_, NoteRow>(
        r#"
        INSERT INTO notes (id, title, description, student_email, student_name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.title)
    .bind(&request.description)
    .bind(&request.student.student_email)
    .bind(&request.student.student_name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(note)
}

pub async fn fetch_notes_by_student(
    pool: &PgPool,
    student_email: &str,
) -> Result<Vec<NoteRow>, AppError> {
    let notes = sqlx::query_as::<_, NoteRow>(
        "SELECT * FROM notes WHERE student_email = $1 ORDER BY created_at DESC",
    )
    .bind(student_email)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(notes)
}

pub async fn update_note(
    pool: &PgPool,
    note_id: Uuid,
    request: &UpdateNoteRequest,
) -> Result<Option<NoteRow>, AppError> {
    let note = sqlx::query_as::<_, NoteRow>(
        r#"
        UPDATE notes
        SET title = $1, description = $2, updated_at = $3
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&request.title)
    .bind(&request.description)
    .bind(Utc::now().naive_utc())
    .bind(note_id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(note)
}

pub async fn delete_note(pool: &PgPool, note_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(note_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}
