use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Invalid session status: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub tutor_name: String,
    pub tutor_email: String,
    pub session_title: String,
    pub session_description: String,
    pub registration_start_date: NaiveDate,
    pub registration_end_date: NaiveDate,
    pub class_start_date: NaiveDate,
    pub class_end_date: NaiveDate,
    pub session_duration: String,
    pub status: String,
    pub is_paid: bool,
    pub registration_fee: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[validate(length(min = 1))]
    pub tutor_name: String,
    #[validate(email)]
    pub tutor_email: String,
    #[validate(length(min = 1))]
    pub session_title: String,
    pub session_description: String,
    pub registration_start_date: NaiveDate,
    pub registration_end_date: NaiveDate,
    pub class_start_date: NaiveDate,
    pub class_end_date: NaiveDate,
    pub session_duration: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveSessionRequest {
    pub is_paid: bool,
    pub amount: BigDecimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudySessionRequest {
    pub session_title: Option<String>,
    pub session_description: Option<String>,
    pub registration_start_date: Option<NaiveDate>,
    pub registration_end_date: Option<NaiveDate>,
    pub class_start_date: Option<NaiveDate>,
    pub class_end_date: Option<NaiveDate>,
    pub session_duration: Option<String>,
    pub is_paid: Option<bool>,
    pub registration_fee: Option<BigDecimal>,
}

impl UpdateStudySessionRequest {
    pub fn touches_fee_fields(&self) -> bool {
        self.is_paid.is_some() || self.registration_fee.is_some()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorSessionsQuery {
    pub tutor_email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSessionsQuery {
    pub tutor_email: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySessionsPage {
    pub sessions: Vec<StudySession>,
    pub total_sessions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};
    use std::str::FromStr;

    #[test]
    fn statuses_round_trip_through_their_string_form() {
        for status in [
            SessionStatus::Pending,
            SessionStatus::Approved,
            SessionStatus::Rejected,
        ] {
            let parsed = SessionStatus::from_str(status.as_str());
            assert_ok!(&parsed);
            assert_eq!(parsed.unwrap(), status);
        }
    }

    #[test]
    fn unknown_statuses_are_rejected() {
        assert_err!(SessionStatus::from_str("Approved"));
        assert_err!(SessionStatus::from_str("archived"));
    }

    #[test]
    fn patches_without_fee_fields_do_not_trigger_revalidation() {
        let patch = UpdateStudySessionRequest {
            session_title: Some("Intro to Ordinary Differential Equations".to_string()),
            session_description: None,
            registration_start_date: None,
            registration_end_date: None,
            class_start_date: None,
            class_end_date: None,
            session_duration: None,
            is_paid: None,
            registration_fee: None,
        };

        assert!(!patch.touches_fee_fields());
    }

    #[test]
    fn patches_touching_either_fee_field_trigger_revalidation() {
        let base = UpdateStudySessionRequest {
            session_title: None,
            session_description: None,
            registration_start_date: None,
            registration_end_date: None,
            class_start_date: None,
            class_end_date: None,
            session_duration: None,
            is_paid: None,
            registration_fee: None,
        };

        let paid_only = UpdateStudySessionRequest {
            is_paid: Some(true),
            ..base
        };
        assert!(paid_only.touches_fee_fields());

        let fee_only = UpdateStudySessionRequest {
            registration_fee: Some(BigDecimal::from(50)),
            session_title: None,
            session_description: None,
            registration_start_date: None,
            registration_end_date: None,
            class_start_date: None,
            class_end_date: None,
            session_duration: None,
            is_paid: None,
        };
        assert!(fee_only.touches_fee_fields());
    }
}
