use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Failure modes of a Stripe call, before they are mapped onto `AppError`.
#[derive(Error, Debug)]
pub enum StripeError {
    #[error("Stripe request timed out")]
    Timeout,

    #[error("Stripe request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Card declined: {0}")]
    CardDeclined(String),

    #[error("Stripe API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Stripe response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StripeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StripeError::Timeout
        } else {
            StripeError::Transport(e)
        }
    }
}

pub struct PaymentIntentParams<'a> {
    pub amount_cents: i64,
    pub currency: &'a str,
    pub payment_method: &'a str,
    pub receipt_email: &'a str,
    pub description: &'a str,
    pub metadata: &'a [(&'a str, String)],
    pub idempotency_key: &'a str,
}

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: SecretString,
    api_base: Url,
}

impl StripeClient {
    pub fn new(client: Client, secret_key: SecretString, api_base: Url) -> Self {
        Self {
            client,
            secret_key,
            api_base,
        }
    }

    fn auth_header(&self) -> String {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:", self.secret_key.expose_secret()));
        format!("Basic {}", encoded)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.as_str().trim_end_matches('/'), path)
    }

    /// Creates and confirms a PaymentIntent in one call.
    pub async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams<'_>,
    ) -> Result<StripePaymentIntent, StripeError> {
        let mut form: Vec<(String, String)> = vec![
            ("amount".into(), params.amount_cents.to_string()),
            ("currency".into(), params.currency.to_string()),
            ("payment_method".into(), params.payment_method.to_string()),
            ("confirm".into(), "true".into()),
            ("automatic_payment_methods[enabled]".into(), "true".into()),
            (
                "automatic_payment_methods[allow_redirects]".into(),
                "never".into(),
            ),
            ("receipt_email".into(), params.receipt_email.to_string()),
            ("description".into(), params.description.to_string()),
        ];
        for (key, value) in params.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let response = self
            .client
            .post(self.endpoint("payment_intents"))
            .header("Authorization", self.auth_header())
            .header("Idempotency-Key", params.idempotency_key)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(status = %status, "Stripe API error");

            if let Ok(error) = serde_json::from_str::<StripeErrorResponse>(&body) {
                let message = error
                    .error
                    .message
                    .unwrap_or_else(|| error.error.error_type.clone());
                if error.error.error_type == "card_error" {
                    return Err(StripeError::CardDeclined(message));
                }
                return Err(StripeError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Err(StripeError::Api {
                status: status.as_u16(),
                message: "unrecognised error body".into(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Stripe response");
            StripeError::Decode(e.to_string())
        })
    }
}

// ============================================================================
// Stripe Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub last_payment_error: Option<StripeErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: Option<String>,
    pub code: Option<String>,
    pub decline_code: Option<String>,
}
