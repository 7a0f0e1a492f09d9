use crate::core::jwt_auth::{generate_jwt_token, verify_jwt_token, JwtClaims};
use crate::core::{AppConfig, AppError};
use crate::core::{AppErrorResponse, AppSuccessResponse};
use crate::db::users;
use crate::models::common::MessageResponse;
use crate::models::users::{
    AuthResponse, Role, UpdateUserRoleRequest, UpsertUserRequest, VerifyTokenResponse,
};
use crate::routes::parse_id;
use actix_web::{get, patch, post, web, HttpResponse, Result};
use sqlx::PgPool;
use std::str::FromStr;
use validator::Validate;

#[tracing::instrument(name = "Verify Token", skip(config, path))]
#[get("/verify-token/{token}")]
pub async fn verify_token(
    config: web::Data<AppConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let token = path.into_inner();

    let response = match verify_jwt_token(&token, &config.jwt_auth_config) {
        Ok(claims) => VerifyTokenResponse {
            is_valid: true,
            user: Some(claims.user),
        },
        Err(_) => VerifyTokenResponse {
            is_valid: false,
            user: None,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

#[tracing::instrument(name = "Upsert User", skip(pool, config, request))]
#[post("/users")]
pub async fn upsert_user(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    request: web::Json<UpsertUserRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    // First sign-in creates the record; repeat calls never touch the stored
    // profile fields.
    let user = match users::find_user_by_email(&pool, &request.email).await? {
        Some(existing) => existing,
        None => users::insert_user(&pool, &request).await?,
    };

    let token = generate_jwt_token(&user, &config.jwt_auth_config)?;

    Ok(HttpResponse::Ok().json(AuthResponse { token, user }))
}

#[tracing::instrument(name = "Get All Users", skip(pool, claims))]
#[get("/all-users/{email}")]
pub async fn all_users(
    pool: web::Data<PgPool>,
    claims: JwtClaims,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden().json(AppErrorResponse {
            success: false,
            message: "Access denied. Admin role required.".to_string(),
        }));
    }

    let email = path.into_inner();
    let users = users::fetch_all_users_except(&pool, &email).await?;

    Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(name = "Update User Role", skip(pool, claims, request))]
#[patch("/update-user-role/{id}")]
pub async fn update_user_role(
    pool: web::Data<PgPool>,
    claims: JwtClaims,
    path: web::Path<String>,
    request: web::Json<UpdateUserRoleRequest>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden().json(AppErrorResponse {
            success: false,
            message: "Access denied. Admin role required.".to_string(),
        }));
    }

    let user_id = parse_id(&path.into_inner(), "Invalid user ID.")?;
    let role = Role::from_str(&request.role).map_err(AppError::bad_request)?;

    let updated = users::update_user_role(&pool, user_id, role).await?;
    if updated == 0 {
        return Err(AppError::not_found("User not found."));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "User role updated successfully.".to_string(),
        },
        message: "User role updated successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Tutors", skip(pool))]
#[get("/get-tutors")]
pub async fn get_tutors(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let tutors = users::fetch_users_by_role(&pool, Role::Tutor).await?;

    if tutors.is_empty() {
        return Err(AppError::not_found("No tutors found."));
    }

    Ok(HttpResponse::Ok().json(tutors))
}

#[tracing::instrument(name = "Get Tutor Details", skip(pool))]
#[get("/tutor-details/{id}")]
pub async fn tutor_details(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tutor_id = parse_id(&path.into_inner(), "Invalid tutor ID.")?;

    let tutor = match users::find_user_by_id(&pool, tutor_id).await? {
        Some(user) if user.role == Role::Tutor.to_string() => user,
        _ => return Err(AppError::not_found("Tutor not found.")),
    };

    Ok(HttpResponse::Ok().json(tutor))
}
