use crate::core::payments::PAYMENT_INTENT_SUCCEEDED;
use crate::core::AppError;
use crate::core::{AppSuccessResponse, StripeClient};
use crate::db::{bookings, sessions};
use crate::models::bookings::{
    BookSessionRequest, BookedSessionsQuery, ConfirmPaymentRequest, CreatePaymentIntentRequest,
    CreatePaymentIntentResponse, NewBookedSession,
};
use crate::models::common::MessageResponse;
use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use validator::Validate;

#[tracing::instrument(name = "Book Session", skip(pool, request))]
#[post("/book-session")]
pub async fn book_session(
    pool: web::Data<PgPool>,
    request: web::Json<BookSessionRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    // Friendly early exit; the unique index still decides under concurrency.
    if bookings::find_booking(&pool, request.session_id, &request.student_email)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("You have already booked this session."));
    }

    let new_booking = NewBookedSession {
        session_id: request.session_id,
        session_title: request.session_title.clone(),
        registration_fee: request.registration_fee.clone(),
        student_email: request.student_email.clone(),
        tutor_email: request.tutor_email.clone(),
        payment_intent_id: None,
    };

    bookings::insert_booking(&pool, &new_booking).await?;

    Ok(HttpResponse::Created().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Session booked successfully.".to_string(),
        },
        message: "Session booked successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Create Payment Intent", skip(pool, stripe_client, request))]
#[post("/create-payment-intent")]
pub async fn create_payment_intent(
    pool: web::Data<PgPool>,
    stripe_client: web::Data<StripeClient>,
    request: web::Json<CreatePaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    if sessions::find_session_by_id(&pool, request.session_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Session not found."));
    }

    let intent = stripe_client
        .create_payment_intent(&request.amount, request.session_id)
        .await?;

    let client_secret = intent.client_secret.ok_or_else(|| {
        AppError::internal_error("Payment authority returned an intent without a client secret")
    })?;

    Ok(HttpResponse::Ok().json(CreatePaymentIntentResponse { client_secret }))
}

#[tracing::instrument(name = "Confirm Payment", skip(pool, stripe_client, request))]
#[post("/confirm-payment")]
pub async fn confirm_payment(
    pool: web::Data<PgPool>,
    stripe_client: web::Data<StripeClient>,
    request: web::Json<ConfirmPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    if bookings::find_booking(&pool, request.session_id, &request.student_email)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("You have already booked this session."));
    }

    // Title and tutor come from the stored session, never from the caller.
    let session = sessions::find_session_by_id(&pool, request.session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session not found."))?;

    // The caller's word is not enough: the intent must have settled on the
    // payment authority's side before a booking materializes.
    let intent = stripe_client
        .retrieve_payment_intent(&request.payment_intent_id)
        .await?;
    if intent.status != PAYMENT_INTENT_SUCCEEDED {
        return Err(AppError::bad_request(
            "Payment has not been completed for this session.",
        ));
    }

    let new_booking = NewBookedSession {
        session_id: request.session_id,
        session_title: session.session_title,
        registration_fee: request.registration_fee.clone(),
        student_email: request.student_email.clone(),
        tutor_email: session.tutor_email,
        payment_intent_id: Some(request.payment_intent_id.clone()),
    };

    bookings::insert_booking(&pool, &new_booking).await?;

    Ok(HttpResponse::Ok().json(AppSuccessResponse {
        success: true,
        data: MessageResponse {
            message: "Session booked successfully.".to_string(),
        },
        message: "Session booked successfully.".to_string(),
        pagination: None,
    }))
}

#[tracing::instrument(name = "Get Booked Sessions", skip(pool))]
#[get("/get-booked-sessions")]
pub async fn get_booked_sessions(
    pool: web::Data<PgPool>,
    query: web::Query<BookedSessionsQuery>,
) -> Result<HttpResponse, AppError> {
    let student_email = query
        .student_email
        .as_deref()
        .ok_or_else(|| AppError::bad_request("Student email is required."))?;

    let bookings = bookings::fetch_bookings_by_student(&pool, student_email).await?;

    Ok(HttpResponse::Ok().json(bookings))
}
