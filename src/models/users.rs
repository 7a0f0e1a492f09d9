use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Tutor,
    Admin,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Role::Student),
            "Tutor" => Ok(Role::Tutor),
            "Admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl std::string::ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::Student => "Student".to_string(),
            Role::Tutor => "Tutor".to_string(),
            Role::Admin => "Admin".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub role: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub role: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};
    use std::str::FromStr;

    #[test]
    fn roles_round_trip_through_their_string_form() {
        for role in [Role::Student, Role::Tutor, Role::Admin] {
            let parsed = Role::from_str(&role.to_string());
            assert_ok!(&parsed);
            assert_eq!(parsed.unwrap(), role);
        }
    }

    #[test]
    fn unknown_and_lowercase_roles_are_rejected() {
        assert_err!(Role::from_str("Moderator"));
        assert_err!(Role::from_str("student"));
        assert_err!(Role::from_str(""));
    }
}
