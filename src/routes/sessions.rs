use crate::core::jwt_auth::JwtClaims;
use crate::core::AppError;
use crate::core::{AppErrorResponse, AppSuccessResponse};
use crate::db::sessions;
use crate::models::common::MessageResponse;
use crate::models::pagination::PaginationQuery;
use crate::models::sessions::{
    ApproveSessionRequest, CreateSessionRequest, SelectSessionsQuery, SessionStatus,
    StudySessionsPage, TutorSessionsQuery, UpdateStudySessionRequest,
};
use crate::routes::parse_id;
use actix_web::{delete, get, patch, post, web, HttpResponse, Result};
use bigdecimal::BigDecimal;
use sqlx::PgPool;
use std::str::FromStr;
use validator::Validate;

/// A paid session must carry a positive fee and a free one exactly zero;
/// this rule gates approval and any later patch that touches the fee fields.
fn validate_registration_fee(is_paid: bool, registration_fee: &BigDecimal) -> Result<(), AppError> {
    let zero = BigDecimal::from(0);

    if is_paid && *registration_fee <= zero {
        return Err(AppError::bad_request("Invalid amount for paid session."));
    }

    if !is_paid && *registration_fee != zero {
        return Err(AppError::bad_request("Amount must be 0 for free sessions."));
    }

    Ok(())
}

#[tracing::instrument(name = "Create Study Session", skip(pool, request))]
#[post("/create-session")]
pub async fn create_session(
    pool: web::Data<PgPool>,
    request: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let session = sessions::insert_session(&pool, &request).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: session,
        message: "Study session created successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Approved Sessions", skip(pool))]
#[get("/get-sessions")]
pub async fn get_sessions(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let sessions = sessions::fetch_approved_sessions(&pool, Some(6)).await?;

    Ok(HttpResponse::Ok().json(sessions))
}

#[tracing::instrument(name = "Get All Approved Sessions", skip(pool))]
#[get("/get-all-sessions")]
pub async fn get_all_sessions(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let sessions = sessions::fetch_approved_sessions(&pool, None).await?;

    Ok(HttpResponse::Ok().json(sessions))
}

#[tracing::instrument(name = "Get Session Details", skip(pool))]
#[get("/session-details/{id}")]
pub async fn session_details(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = parse_id(&path.into_inner(), "Invalid session ID.")?;

    let session = sessions::find_session_by_id(&pool, session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found."))?;

    Ok(HttpResponse::Ok().json(session))
}

#[tracing::instrument(name = "Get Tutor Sessions", skip(pool))]
#[get("/get-tutor-sessions")]
pub async fn get_tutor_sessions(
    pool: web::Data<PgPool>,
    query: web::Query<TutorSessionsQuery>,
) -> Result<HttpResponse, AppError> {
    let tutor_email = query
        .tutor_email
        .as_deref()
        .ok_or_else(|| AppError::bad_request("Tutor email is required."))?;

    let sessions = sessions::fetch_sessions_by_tutor(&pool, tutor_email).await?;

    Ok(HttpResponse::Ok().json(sessions))
}

#[tracing::instrument(name = "Select Tutor Sessions by Status", skip(pool))]
#[get("/select-study-sessions")]
pub async fn select_study_sessions(
    pool: web::Data<PgPool>,
    query: web::Query<SelectSessionsQuery>,
) -> Result<HttpResponse, AppError> {
    let (tutor_email, status) = match (query.tutor_email.as_deref(), query.status.as_deref()) {
        (Some(tutor_email), Some(status)) => (tutor_email, status),
        _ => return Err(AppError::bad_request("Tutor email and status are required.")),
    };

    let status = SessionStatus::from_str(status).map_err(AppError::bad_request)?;
    let sessions = sessions::fetch_sessions_by_tutor_and_status(&pool, tutor_email, status).await?;

    Ok(HttpResponse::Ok().json(sessions))
}

#[tracing::instrument(name = "Get Study Sessions Page", skip(pool))]
#[get("/study-sessions")]
pub async fn study_sessions(
    pool: web::Data<PgPool>,
    pagination: web::Query<PaginationQuery>,
) -> Result<HttpResponse, AppError> {
    let mut pagination = pagination.into_inner();
    pagination.validate();

    let (sessions, total_sessions) = sessions::fetch_sessions_page(&pool, &pagination).await?;

    Ok(HttpResponse::Ok().json(StudySessionsPage {
        sessions,
        total_sessions,
    }))
}

#[tracing::instrument(name = "Manage Sessions", skip(pool, claims))]
#[get("/manage-sessions")]
pub async fn manage_sessions(
    pool: web::Data<PgPool>,
    claims: JwtClaims,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden().json(AppErrorResponse {
            success: false,
            message: "Access denied. Admin role required.".to_string(),
        }));
    }

    let sessions = sessions::fetch_all_sessions(&pool).await?;

    Ok(HttpResponse::Ok().json(sessions))
}

#[tracing::instrument(name = "Get Session for Admin", skip(pool, claims))]
#[get("/sessions/{sessionId}")]
pub async fn get_session(
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

    let session_id = parse_id(&path.into_inner(), "Invalid session ID.")?;

    let session = sessions::find_session_by_id(&pool, session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found."))?;

    Ok(HttpResponse::Ok().json(session))
}

#[tracing::instrument(name = "Re-request Session Approval", skip(pool))]
#[patch("/re-request-approval/{sessionId}")]
pub async fn re_request_approval(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session_id = parse_id(&path.into_inner(), "Invalid session ID.")?;

    // Unconditional; re-requesting a pending session leaves it pending.
    let updated = sessions::set_session_status(&pool, session_id, SessionStatus::Pending).await?;
    if updated == 0 {
        return Err(AppError::not_found("Session not found."));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Approval request sent successfully.".to_string(),
        },
        message: "Approval request sent successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Approve Session", skip(pool, claims, request))]
#[patch("/session-approve/{sessionId}")]
pub async fn approve_session(
    pool: web::Data<PgPool>,
    claims: JwtClaims,
    path: web::Path<String>,
    request: web::Json<ApproveSessionRequest>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden().json(AppErrorResponse {
            success: false,
            message: "Access denied. Admin role required.".to_string(),
        }));
    }

    let session_id = parse_id(&path.into_inner(), "Invalid session ID.")?;
    validate_registration_fee(request.is_paid, &request.amount)?;

    let updated =
        sessions::approve_session(&pool, session_id, request.is_paid, &request.amount).await?;
    if updated == 0 {
        return Err(AppError::not_found("Session not found."));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Session approved successfully.".to_string(),
        },
        message: "Session approved successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Reject Session", skip(pool, claims))]
#[patch("/reject-session/{sessionId}")]
pub async fn reject_session(
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

    let session_id = parse_id(&path.into_inner(), "Invalid session ID.")?;

    let updated = sessions::set_session_status(&pool, session_id, SessionStatus::Rejected).await?;
    if updated == 0 {
        return Err(AppError::not_found("Session not found."));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Session rejected successfully.".to_string(),
        },
        message: "Session rejected successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Update Study Session", skip(pool, claims, request))]
#[patch("/update-study-session/{sessionId}")]
pub async fn update_study_session(
    pool: web::Data<PgPool>,
    claims: JwtClaims,
    path: web::Path<String>,
    request: web::Json<UpdateStudySessionRequest>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Ok(HttpResponse::Forbidden().json(AppErrorResponse {
            success: false,
            message: "Access denied. Admin role required.".to_string(),
        }));
    }

    let session_id = parse_id(&path.into_inner(), "Invalid session ID.")?;

    let mut session = sessions::find_session_by_id(&pool, session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found."))?;

    if let Some(session_title) = &request.session_title {
        session.session_title = session_title.clone();
    }
    if let Some(session_description) = &request.session_description {
        session.session_description = session_description.clone();
    }
    if let Some(registration_start_date) = request.registration_start_date {
        session.registration_start_date = registration_start_date;
    }
    if let Some(registration_end_date) = request.registration_end_date {
        session.registration_end_date = registration_end_date;
    }
    if let Some(class_start_date) = request.class_start_date {
        session.class_start_date = class_start_date;
    }
    if let Some(class_end_date) = request.class_end_date {
        session.class_end_date = class_end_date;
    }
    if let Some(session_duration) = &request.session_duration {
        session.session_duration = session_duration.clone();
    }
    if let Some(is_paid) = request.is_paid {
        session.is_paid = is_paid;
    }
    if let Some(registration_fee) = &request.registration_fee {
        session.registration_fee = registration_fee.clone();
    }

    // The generic patch cannot sidestep the approval rule: a merge that
    // touches the fee fields has to land in a consistent state.
    if request.touches_fee_fields() {
        validate_registration_fee(session.is_paid, &session.registration_fee)?;
    }

    sessions::update_session(&pool, &session).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Session updated successfully.".to_string(),
        },
        message: "Session updated successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Delete Session", skip(pool, claims))]
#[delete("/delete-session/{sessionId}")]
pub async fn delete_session(
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

    let session_id = parse_id(&path.into_inner(), "Invalid session ID.")?;

    // Bookings, materials and reviews referencing the session survive as
    // historical records.
    let deleted = sessions::delete_session(&pool, session_id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("Session not found."));
    }

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Session deleted successfully.".to_string(),
        },
        message: "Session deleted successfully.".to_string(),
        pagination: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};
    use quickcheck_macros::quickcheck;
    use std::str::FromStr;

    #[test]
    fn approving_a_paid_session_requires_a_positive_fee() {
        assert_ok!(validate_registration_fee(true, &BigDecimal::from(50)));
        assert_err!(validate_registration_fee(true, &BigDecimal::from(0)));
        assert_err!(validate_registration_fee(true, &BigDecimal::from(-10)));
    }

    #[test]
    fn approving_a_free_session_requires_a_zero_fee() {
        assert_ok!(validate_registration_fee(false, &BigDecimal::from(0)));
        assert_err!(validate_registration_fee(false, &BigDecimal::from(25)));
        assert_err!(validate_registration_fee(false, &BigDecimal::from(-1)));
    }

    #[test]
    fn a_zero_fee_with_differing_scale_still_counts_as_free() {
        let zero_with_cents = BigDecimal::from_str("0.00").unwrap();
        assert_ok!(validate_registration_fee(false, &zero_with_cents));
    }

    #[quickcheck]
    fn paid_validation_accepts_exactly_the_positive_fees(fee: i64) -> bool {
        validate_registration_fee(true, &BigDecimal::from(fee)).is_ok() == (fee > 0)
    }

    #[quickcheck]
    fn free_validation_accepts_exactly_the_zero_fee(fee: i64) -> bool {
        validate_registration_fee(false, &BigDecimal::from(fee)).is_ok() == (fee == 0)
    }
}
