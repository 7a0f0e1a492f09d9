use crate::core::AppError;
use crate::core::AppSuccessResponse;
use crate::db::reviews as reviews_db;
use crate::models::common::MessageResponse;
use crate::models::reviews::{
    PostReviewRequest, PostTutorReviewRequest, SessionReviewsQuery, TutorReviewsQuery,
};
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use validator::Validate;

#[tracing::instrument(name = "Post Session Review", skip(pool, request))]
#[post("/post-review")]
pub async fn post_review(
    pool: web::Data<PgPool>,
    request: web::Json<PostReviewRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    reviews_db::insert_session_review(&pool, &request).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Review posted successfully.".to_string(),
        },
        message: "Review posted successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Session Reviews", skip(pool))]
#[get("/get-reviews")]
pub async fn get_reviews(
    pool: web::Data<PgPool>,
    query: web::Query<SessionReviewsQuery>,
) -> Result<HttpResponse, AppError> {
    let session_id = query
        .session_id
        .ok_or_else(|| AppError::bad_request("Session ID is required."))?;

    let reviews = reviews_db::fetch_reviews_by_session(&pool, session_id).await?;

    Ok(HttpResponse::Ok().json(reviews))
}

// Same lookup under the path the session-details page calls.
#[tracing::instrument(name = "Get Reviews for Session Page", skip(pool))]
#[get("/reviews")]
pub async fn session_reviews(
    pool: web::Data<PgPool>,
    query: web::Query<SessionReviewsQuery>,
) -> Result<HttpResponse, AppError> {
    let session_id = query
        .session_id
        .ok_or_else(|| AppError::bad_request("Session ID is required."))?;

    let reviews = reviews_db::fetch_reviews_by_session(&pool, session_id).await?;

    Ok(HttpResponse::Ok().json(reviews))
}

#[tracing::instrument(name = "Post Tutor Review", skip(pool, request))]
#[post("/post-tutor-review")]
pub async fn post_tutor_review(
    pool: web::Data<PgPool>,
    request: web::Json<PostTutorReviewRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    reviews_db::insert_tutor_review(&pool, &request).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Review posted successfully.".to_string(),
        },
        message: "Review posted successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Tutor Reviews", skip(pool))]
#[get("/get-tutor-reviews")]
pub async fn get_tutor_reviews(
    pool: web::Data<PgPool>,
    query: web::Query<TutorReviewsQuery>,
) -> Result<HttpResponse, AppError> {
    let tutor_id = query
        .tutor_id
        .ok_or_else(|| AppError::bad_request("Tutor ID is required."))?;

    let reviews = reviews_db::fetch_reviews_by_tutor(&pool, tutor_id).await?;

    Ok(HttpResponse::Ok().json(reviews))
}
