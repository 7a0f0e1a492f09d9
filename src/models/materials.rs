use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    pub session_id: Uuid,
    pub tutor_email: String,
    pub title: String,
    pub drive_link: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadMaterialRequest {
    pub session_id: Uuid,
    #[validate(email)]
    pub tutor_email: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(url)]
    pub drive_link: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub drive_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsQuery {
    pub session_id: Option<Uuid>,
    pub tutor_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionMaterialsQuery {
    pub id: Option<Uuid>,
}
