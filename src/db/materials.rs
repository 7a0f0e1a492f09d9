use crate::core::AppError;
use crate::models::materials::{Material, UploadMaterialRequest};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_material(
    pool: &PgPool,
    request: &UploadMaterialRequest,
) -> Result<Material, AppError> {
    let now = Utc::now().naive_utc();

    let material = sqlx::query_as::<_, Material>(
        r#"
        INSERT INTO materials (id, session_id, tutor_email, title, drive_link, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.session_id)
    .bind(&request.tutor_email)
    .bind(&request.title)
    .bind(&request.drive_link)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(material)
}

pub async fn find_material_by_id(
    pool: &PgPool,
    material_id: Uuid,
) -> Result<Option<Material>, AppError> {
    let material = sqlx::query_as::<_, Material>("SELECT * FROM materials WHERE id = $1")
        .bind(material_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(material)
}

pub async fn fetch_materials_by_session(
    pool: &PgPool,
    session_id: Uuid,
) -> Result<Vec<Material>, AppError> {
    let materials = sqlx::query_as::<_, Material>(
        "SELECT * FROM materials WHERE session_id = $1 ORDER BY created_at DESC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(materials)
}

pub async fn fetch_materials_by_tutor(
    pool: &PgPool,
    tutor_email: &str,
) -> Result<Vec<Material>, AppError> {
    let materials = sqlx::query_as::<_, Material>(
        "SELECT * FROM materials WHERE tutor_email = $1 ORDER BY created_at DESC",
    )
    .bind(tutor_email)
    .fetch_all(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(materials)
}

pub async fn fetch_all_materials(pool: &PgPool) -> Result<Vec<Material>, AppError> {
    let materials =
        sqlx::query_as::<_, Material>("SELECT * FROM materials ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(AppError::db_error)?;

    Ok(materials)
}

pub async fn update_material(
    pool: &PgPool,
    material_id: Uuid,
    title: &str,
    drive_link: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE materials
        SET title = $1, drive_link = $2, updated_at = $3
        WHERE id = $4
        "#,
    )
    .bind(title)
    .bind(drive_link)
    .bind(Utc::now().naive_utc())
    .bind(material_id)
    .execute(pool)
    .await
    .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}

pub async fn delete_material(pool: &PgPool, material_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM materials WHERE id = $1")
        .bind(material_id)
        .execute(pool)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}
