use crate::core::AppError;
use crate::models::users::{Role, UpsertUserRequest, User};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(user)
}

pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(user)
}

#[tracing::instrument(name = "Insert new user", skip(pool, request))]
pub async fn insert_user(pool: &PgPool, request: &UpsertUserRequest) -> Result<User, AppError> {
    let now = Utc::now().naive_utc();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, photo_url, role, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&request.name)
    .bind(&request.email)
    .bind(&request.photo_url)
    .bind(Role::Student.to_string())
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(user)
}

pub async fn fetch_all_users_except(pool: &PgPool, email: &str) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE email <> $1 ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(users)
}

pub async fn fetch_users_by_role(pool: &PgPool, role: Role) -> Result<Vec<User>, AppError> {
    let users =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = $1 ORDER BY created_at DESC")
            .bind(role.to_string())
            .fetch_all(pool)
            .await
            .map_err(AppError::db_error)?;

    Ok(users)
}

#[tracing::instrument(name = "Update user role", skip(pool))]
pub async fn update_user_role(pool: &PgPool, user_id: Uuid, role: Role) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE users SET role = $1 WHERE id = $2")
        .bind(role.to_string())
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}
