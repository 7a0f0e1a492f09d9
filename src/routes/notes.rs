use crate::core::AppError;
use crate::core::AppSuccessResponse;
use crate::db::notes;
use crate::models::common::MessageResponse;
use crate::models::notes::{CreateNoteRequest, Note, NotesQuery, UpdateNoteRequest};
use crate::routes::parse_id;
use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use validator::Validate;

#[tracing::instrument(name = "Create Note", skip(pool, request))]
#[post("/create-note")]
pub async fn create_note(
    pool: web::Data<PgPool>,
    request: web::Json<CreateNoteRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let note = notes::insert_note(&pool, &request).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: Note::from(note),
        message: "Note created successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Notes", skip(pool))]
#[get("/get-notes")]
pub async fn get_notes(
    pool: web::Data<PgPool>,
    query: web::Query<NotesQuery>,
) -> Result<HttpResponse, AppError> {
    let student_email = query
        .student_email
        .as_deref()
        .ok_or_else(|| AppError::bad_request("studentEmail is required."))?;

    let notes = notes::fetch_notes_by_student(&pool, student_email).await?;
    let notes: Vec<Note> = notes.into_iter().map(Note::from).collect();

    Ok(HttpResponse::Ok().json(notes))
}

#[tracing::instrument(name = "Update Note", skip(pool, request))]
#[put("/update-note/{id}")]
pub async fn update_note(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    request: web::Json<UpdateNoteRequest>,
) -> Result<HttpResponse, AppError> {
    let note_id = parse_id(&path.into_inner(), "Invalid note ID.")?;

    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let updated = notes::update_note(&pool, note_id, &request)
        .await?
        .ok_or_else(|| AppError::not_found("Note not found."))?;

    Ok(HttpResponse::Ok().json(Note::from(updated)))
}

#[tracing::instrument(name = "Delete Note", skip(pool))]
#[delete("/delete-note/{id}")]
pub async fn delete_note(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let note_id = parse_id(&path.into_inner(), "Invalid note ID.")?;

    let deleted = notes::delete_note(&pool, note_id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("Note not found."));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Note deleted successfully.".to_string(),
        },
        message: "Note deleted successfully.".to_string(),
        pagination: None,
    }))
}
