use bigdecimal::{BigDecimal, ToPrimitive};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::config::StripeConfig;
use crate::core::AppError;

pub const PAYMENT_INTENT_SUCCEEDED: &str = "succeeded";

pub struct StripeClient {
    http_client: Client,
    config: StripeConfig,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub status: String,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build the payment authority HTTP client");

        Self {
            http_client,
            config,
        }
    }

    #[tracing::instrument(name = "Request Payment Intent", skip(self))]
    pub async fn create_payment_intent(
        &self,
        amount: &BigDecimal,
        session_id: Uuid,
    ) -> Result<PaymentIntent, AppError> {
        let amount_minor = to_minor_units(amount)
            .ok_or_else(|| AppError::bad_request("Invalid amount for payment intent."))?;

        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", self.config.currency.clone()),
            ("metadata[sessionId]", session_id.to_string()),
        ];

        let response = self
            .http_client
            .post(format!("{}/v1/payment_intents", self.config.base_url))
            .bearer_auth(self.config.secret_key.expose_secret())
            .form(&params)
            .send()
            .await?;

        parse_intent_response(response).await
    }

    #[tracing::instrument(name = "Fetch Payment Intent", skip(self))]
    pub async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, AppError> {
        let response = self
            .http_client
            .get(format!(
                "{}/v1/payment_intents/{}",
                self.config.base_url, payment_intent_id
            ))
            .bearer_auth(self.config.secret_key.expose_secret())
            .send()
            .await?;

        parse_intent_response(response).await
    }
}

async fn parse_intent_response(response: reqwest::Response) -> Result<PaymentIntent, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Payment authority returned {}: {}", status, body);
        return Err(AppError::network_error(format!(
            "Payment authority returned {}",
            status
        )));
    }

    let intent = response.json::<PaymentIntent>().await?;
    Ok(intent)
}

/// The payment authority takes integral minor units of the currency.
pub fn to_minor_units(amount: &BigDecimal) -> Option<i64> {
    (amount * BigDecimal::from(100)).with_scale(0).to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};
    use secrecy::Secret;
    use std::str::FromStr;

    fn test_client(base_url: String) -> StripeClient {
        StripeClient::new(StripeConfig {
            secret_key: Secret::new("sk_test_123".to_string()),
            base_url,
            currency: "usd".to_string(),
        })
    }

    #[test]
    fn whole_amounts_convert_to_minor_units() {
        assert_eq!(to_minor_units(&BigDecimal::from(40)), Some(4000));
        assert_eq!(to_minor_units(&BigDecimal::from(0)), Some(0));
    }

    #[test]
    fn fractional_amounts_convert_to_exact_cents() {
        let amount = BigDecimal::from_str("12.50").unwrap();
        assert_eq!(to_minor_units(&amount), Some(1250));
    }

    #[tokio::test]
    async fn create_payment_intent_returns_the_client_secret() {
        let _mock = mockito::mock("POST", "/v1/payment_intents")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"pi_123","client_secret":"pi_123_secret_456","status":"requires_payment_method"}"#,
            )
            .create();

        let client = test_client(mockito::server_url());
        let intent = client
            .create_payment_intent(&BigDecimal::from(40), uuid::Uuid::new_v4())
            .await;

        assert_ok!(&intent);
        let intent = intent.unwrap();
        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.client_secret.as_deref(), Some("pi_123_secret_456"));
    }

    #[tokio::test]
    async fn retrieve_payment_intent_reports_the_intent_status() {
        let _mock = mockito::mock("GET", "/v1/payment_intents/pi_settled")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"pi_settled","client_secret":null,"status":"succeeded"}"#)
            .create();

        let client = test_client(mockito::server_url());
        let intent = client.retrieve_payment_intent("pi_settled").await.unwrap();

        assert_eq!(intent.status, PAYMENT_INTENT_SUCCEEDED);
    }

    #[tokio::test]
    async fn payment_authority_failures_surface_as_errors() {
        let _mock = mockito::mock("GET", "/v1/payment_intents/pi_unknown")
            .with_status(404)
            .with_body(r#"{"error":{"message":"No such payment_intent"}}"#)
            .create();

        let client = test_client(mockito::server_url());

        assert_err!(client.retrieve_payment_intent("pi_unknown").await);
    }
}
