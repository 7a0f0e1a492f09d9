use crate::core::jwt_auth::JwtClaims;
use crate::core::AppError;
use crate::core::{AppErrorResponse, AppSuccessResponse};
use crate::db::materials;
use crate::models::common::MessageResponse;
use crate::models::materials::{
    MaterialsQuery, SessionMaterialsQuery, UpdateMaterialRequest, UploadMaterialRequest,
};
use crate::routes::parse_id;
use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use validator::Validate;

#[tracing::instrument(name = "Upload Material", skip(pool, request))]
#[post("/upload-material")]
pub async fn upload_material(
    pool: web::Data<PgPool>,
    request: web::Json<UploadMaterialRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let material = materials::insert_material(&pool, &request).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: material,
        message: "Material uploaded successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Materials", skip(pool))]
#[get("/materials")]
pub async fn get_materials(
    pool: web::Data<PgPool>,
    query: web::Query<MaterialsQuery>,
) -> Result<HttpResponse, AppError> {
    let materials = if let Some(session_id) = query.session_id {
        materials::fetch_materials_by_session(&pool, session_id).await?
    } else if let Some(tutor_email) = query.tutor_email.as_deref() {
        materials::fetch_materials_by_tutor(&pool, tutor_email).await?
    } else {
        return Err(AppError::bad_request(
            "Session ID or tutor email is required.",
        ));
    };

    Ok(HttpResponse::Ok().json(materials))
}

#[tracing::instrument(name = "Get Materials by Session", skip(pool))]
#[get("/sessionId-material")]
pub async fn session_materials(
    pool: web::Data<PgPool>,
    query: web::Query<SessionMaterialsQuery>,
) -> Result<HttpResponse, AppError> {
    let session_id = query
        .id
        .ok_or_else(|| AppError::bad_request("Study session ID is required"))?;

    let materials = materials::fetch_materials_by_session(&pool, session_id).await?;

    Ok(HttpResponse::Ok().json(materials))
}

#[tracing::instrument(name = "Get Single Material", skip(pool))]
#[get("/single-material/{id}")]
pub async fn single_material(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let material_id = parse_id(&path.into_inner(), "Invalid Material ID.")?;

    let material = materials::find_material_by_id(&pool, material_id)
        .await?
        .ok_or_else(|| AppError::not_found("Material not found."))?;

    Ok(HttpResponse::Ok().json(material))
}

#[tracing::instrument(name = "Update Material", skip(pool, request))]
#[put("/update-material/{id}")]
pub async fn update_material(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    request: web::Json<UpdateMaterialRequest>,
) -> Result<HttpResponse, AppError> {
    let material_id = parse_id(&path.into_inner(), "Invalid Material ID.")?;

    let current = materials::find_material_by_id(&pool, material_id)
        .await?
        .ok_or_else(|| AppError::not_found("Material not found."))?;

    let title = request.title.as_deref().unwrap_or(&current.title);
    let drive_link = request.drive_link.as_deref().unwrap_or(&current.drive_link);

    materials::update_material(&pool, material_id, title, drive_link).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Material updated successfully.".to_string(),
        },
        message: "Material updated successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Delete Material", skip(pool))]
#[delete("/delete-material/{id}")]
pub async fn delete_material(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let material_id = parse_id(&path.into_inner(), "Invalid Material ID.")?;

    let deleted = materials::delete_material(&pool, material_id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("Material not found."));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Material deleted successfully.".to_string(),
        },
        message: "Material deleted successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get All Materials", skip(pool, claims))]
#[get("/all-materials")]
pub async fn all_materials(
    pool: web::Data<PgPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden().json(AppErrorResponse {
            success: false,
            message: "Access denied. Admin role required.".to_string(),
        }));
    }

    let materials = materials::fetch_all_materials(&pool).await?;

    Ok(HttpResponse::Ok().json(materials))
}
