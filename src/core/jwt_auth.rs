use actix_web::{dev::Payload, web, Error as ActixWebError};
use actix_web::{error::ErrorUnauthorized, http, FromRequest, HttpRequest};
use core::fmt;
use jsonwebtoken::{decode, DecodingKey, Validation};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::core::config::JwtAuthConfig;
use crate::core::{AppConfig, AppError};
use crate::models::users::User;

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::to_string(&self).unwrap())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

/// The signed token carries the full public user record, so token
/// verification can answer without a store lookup.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub user: User,
    pub exp: usize,
}

impl JwtClaims {
    pub fn is_admin(&self) -> bool {
        self.user.role == "Admin"
    }
}

pub fn generate_jwt_token(user: &User, config: &JwtAuthConfig) -> Result<String, AppError> {
    let expires_at = chrono::Utc::now() + chrono::Duration::hours(config.token_expiration_time);
    let claims = JwtClaims {
        user: user.clone(),
        exp: expires_at.timestamp() as usize,
    };

    let header = Header::default();
    let encoding_key = EncodingKey::from_secret(config.secret.expose_secret().as_ref());

    encode(&header, &claims, &encoding_key)
        .map_err(|_| AppError::internal_error("Failed to generate JWT token"))
}

pub fn verify_jwt_token(token: &str, config: &JwtAuthConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.expose_secret().as_ref());

    let token_data = decode::<JwtClaims>(token, &decoding_key, &Validation::default())?;

    Ok(token_data.claims)
}

impl FromRequest for JwtClaims {
    type Error = ActixWebError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let config = match req.app_data::<web::Data<AppConfig>>() {
            Some(config) => config,
            None => {
                let error = ErrorResponse {
                    message: "Authentication is not configured".to_string(),
                    success: false,
                };
                return ready(Err(ErrorUnauthorized(error)));
            }
        };

        let token = req
            .headers()
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|auth_header| {
                if auth_header.starts_with("Bearer ") {
                    Some(auth_header[7..].to_string())
                } else {
                    None
                }
            });

        let token = match token {
            Some(token) => token,
            None => {
                let error = ErrorResponse {
                    message: "Invalid login credentials".to_string(),
                    success: false,
                };
                return ready(Err(ErrorUnauthorized(error)));
            }
        };

        match verify_jwt_token(&token, &config.jwt_auth_config) {
            Ok(claims) => ready(Ok(claims)),
            Err(_) => {
                let error = ErrorResponse {
                    message: "Invalid token".to_string(),
                    success: false,
                };
                ready(Err(ErrorUnauthorized(error)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use secrecy::Secret;
    use uuid::Uuid;

    fn test_config(secret: &str) -> JwtAuthConfig {
        JwtAuthConfig {
            secret: Secret::new(secret.to_string()),
            token_expiration_time: 24,
        }
    }

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Amina Yusuf".to_string(),
            email: SafeEmail().fake(),
            photo_url: None,
            role: "Student".to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn minted_token_round_trips_the_embedded_user() {
        let config = test_config("a-long-enough-signing-secret");
        let user = sample_user();

        let token = generate_jwt_token(&user, &config).unwrap();
        let verified = verify_jwt_token(&token, &config);

        assert_ok!(&verified);
        let claims = verified.unwrap();
        assert_eq!(claims.user.id, user.id);
        assert_eq!(claims.user.email, user.email);
        assert_eq!(claims.user.role, "Student");
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let user = sample_user();
        let token = generate_jwt_token(&user, &test_config("first-secret")).unwrap();

        assert_err!(verify_jwt_token(&token, &test_config("second-secret")));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config("a-long-enough-signing-secret");
        let user = sample_user();

        let mut token = generate_jwt_token(&user, &config).unwrap();
        token.push('x');

        assert_err!(verify_jwt_token(&token, &config));
    }

    #[test]
    fn admin_claims_are_recognized() {
        let mut user = sample_user();
        user.role = "Admin".to_string();
        let claims = JwtClaims {
            user,
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };

        assert!(claims.is_admin());
    }
}
