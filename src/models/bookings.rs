use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookedSession {
    pub id: Uuid,
    pub session_id: Uuid,
    pub session_title: String,
    pub registration_fee: BigDecimal,
    pub student_email: String,
    pub tutor_email: String,
    pub payment_intent_id: Option<String>,
    pub booked_at: NaiveDateTime,
}

/// Booking row about to be inserted; both booking entry points build one of
/// these and go through the same conditional insert.
#[derive(Debug)]
pub struct NewBookedSession {
    pub session_id: Uuid,
    pub session_title: String,
    pub registration_fee: BigDecimal,
    pub student_email: String,
    pub tutor_email: String,
    pub payment_intent_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookSessionRequest {
    pub session_id: Uuid,
    #[validate(length(min = 1))]
    pub session_title: String,
    pub registration_fee: BigDecimal,
    #[validate(email)]
    pub student_email: String,
    #[validate(email)]
    pub tutor_email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    pub amount: BigDecimal,
    pub session_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub session_id: Uuid,
    #[validate(email)]
    pub student_email: String,
    pub registration_fee: BigDecimal,
    #[validate(length(min = 1))]
    pub payment_intent_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedSessionsQuery {
    pub student_email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}
