use crate::core::jwt_auth::JwtClaims;
use crate::core::AppError;
use crate::core::{AppErrorResponse, AppSuccessResponse};
use crate::db::announcements;
use crate::models::announcements::CreateAnnouncementRequest;
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use validator::Validate;

#[tracing::instrument(name = "Create Announcement", skip(pool, claims, request))]
#[post("/create-announcement")]
pub async fn create_announcement(
    pool: web::Data<PgPool>,
    claims: JwtClaims,
    request: web::Json<CreateAnnouncementRequest>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden().json(AppErrorResponse {
            success: false,
            message: "Access denied. Admin role required.".to_string(),
        }));
    }

    request
        .validate()
        .map_err(|_| AppError::bad_request("Title and Description are required"))?;

    let announcement = announcements::insert_announcement(&pool, &request).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: announcement,
        message: "Announcement created successfully".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Public Announcements", skip(pool))]
#[get("/public-announcements")]
pub async fn public_announcements(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let announcements = announcements::fetch_announcements(&pool).await?;

    Ok(HttpResponse::Ok().json(announcements))
}
