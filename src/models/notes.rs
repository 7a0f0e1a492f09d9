use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteStudent {
    #[validate(email)]
    pub student_email: String,
    pub student_name: String,
}

/// Wire shape of a note; the owning student stays nested as the clients
/// expect it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub student: NoteStudent,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub student_email: String,
    pub student_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            title: row.title,
            description: row.description,
            student: NoteStudent {
                student_email: row.student_email,
                student_name: row.student_name,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    #[validate]
    pub student: NoteStudent,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesQuery {
    pub student_email: Option<String>,
}
