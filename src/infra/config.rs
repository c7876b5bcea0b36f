use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use time::Duration;
use url::Url;

use super::error::InfraError;
use crate::domain::entities::payment_mode::PaymentMode;
use crate::infra::password::{DEFAULT_ITERATIONS, DEFAULT_MEMORY_KIB};

pub struct AppConfig {
    /// Master secret the token keys are derived from.
    pub token_secret: SecretString,
    pub token_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub stripe: StripeConfig,
    pub provider_timeout: std::time::Duration,
    /// Decimal `(P, G)` overriding the built-in group. Both or neither.
    pub dh_parameters: Option<(String, String)>,
    pub password_hash_memory_kib: u32,
    pub password_hash_iterations: u32,
    pub log_file: String,
}

#[derive(Clone)]
pub struct StripeConfig {
    /// Unset disables the stripe payment method.
    pub secret_key: Option<SecretString>,
    pub api_base: Url,
    pub currency: String,
    pub payment_method: String,
    pub mode: PaymentMode,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let token_secret = std::env::var("TOKEN_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::new(s.into()))
            .ok_or(InfraError::ConfigMissing {
                var: "TOKEN_SECRET",
            })?;

        let token_ttl_secs: i64 = get_env_default("TOKEN_TTL_SECS", 3600);
        if token_ttl_secs <= 0 {
            return Err(InfraError::ConfigInvalid {
                var: "TOKEN_TTL_SECS",
                reason: "must be positive".into(),
            });
        }

        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3001)),
        );
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|_| InfraError::ConfigInvalid {
                    var: "CORS_ORIGIN",
                    reason: "not a valid header value".into(),
                })?;

        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let mode = stripe_secret_key
            .as_deref()
            .map(PaymentMode::of_stripe_key)
            .unwrap_or_default();
        let api_base: Url = std::env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com/v1".to_string())
            .parse()
            .map_err(|e: url::ParseError| InfraError::ConfigInvalid {
                var: "STRIPE_API_BASE",
                reason: e.to_string(),
            })?;
        let stripe = StripeConfig {
            secret_key: stripe_secret_key.map(|k| SecretString::new(k.into())),
            api_base,
            currency: get_env_default("STRIPE_CURRENCY", "usd".to_string()).to_lowercase(),
            payment_method: get_env_default("STRIPE_PAYMENT_METHOD", "pm_card_visa".to_string()),
            mode,
        };

        let provider_timeout_secs: u64 = get_env_default("PROVIDER_TIMEOUT_SECS", 10);

        let dh_parameters = match (std::env::var("DH_PRIME").ok(), std::env::var("DH_GENERATOR").ok()) {
            (Some(p), Some(g)) => Some((p, g)),
            (None, None) => None,
            _ => {
                return Err(InfraError::ConfigInvalid {
                    var: "DH_PRIME",
                    reason: "DH_PRIME and DH_GENERATOR must be set together".into(),
                });
            }
        };

        Ok(Self {
            token_secret,
            token_ttl: Duration::seconds(token_ttl_secs),
            bind_addr,
            cors_origin,
            stripe,
            provider_timeout: std::time::Duration::from_secs(provider_timeout_secs),
            dh_parameters,
            password_hash_memory_kib: get_env_default(
                "PASSWORD_HASH_MEMORY_KIB",
                DEFAULT_MEMORY_KIB,
            ),
            password_hash_iterations: get_env_default(
                "PASSWORD_HASH_ITERATIONS",
                DEFAULT_ITERATIONS,
            ),
            log_file: get_env_default("LOG_FILE", "app.log".to_string()),
        })
    }
}
