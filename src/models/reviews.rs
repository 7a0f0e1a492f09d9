use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One table serves both review kinds; exactly one of `session_id` /
/// `tutor_id` is set per row.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor_id: Option<Uuid>,
    pub student_email: String,
    pub comment: String,
    pub rating: i32,
    pub reviewed_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostReviewRequest {
    pub session_id: Uuid,
    #[validate(email)]
    pub student_email: String,
    #[validate(length(min = 1))]
    pub comment: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostTutorReviewRequest {
    pub tutor_id: Uuid,
    #[validate(email)]
    pub student_email: String,
    #[validate(length(min = 1))]
    pub comment: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReviewsQuery {
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorReviewsQuery {
    pub tutor_id: Option<Uuid>,
}
