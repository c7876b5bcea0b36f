use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    app_error::AppResult,
    domain::entities::{payment_method::PaymentMethod, payment_mode::PaymentMode, tier::Tier},
};

/// Provider-side identifier of a completed charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A one-off charge for a tier upgrade.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub account_id: Uuid,
    pub email: String,
    pub tier: Tier,
    pub amount_cents: i64,
    /// Sent to the provider so retries of one upgrade never charge twice.
    pub idempotency_key: String,
}

impl ChargeRequest {
    pub fn for_tier(account_id: Uuid, email: &str, tier: Tier) -> Self {
        Self {
            account_id,
            email: email.to_string(),
            tier,
            amount_cents: tier.price_cents(),
            idempotency_key: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    Succeeded { transaction_id: TransactionId },
    Declined { reason: String },
}

/// A backend able to take payment for an upgrade.
///
/// Transport failures and timeouts surface as `AppError::Provider`; a charge
/// the provider refused is `ChargeOutcome::Declined`, not an error.
#[async_trait]
pub trait PaymentProviderPort: Send + Sync {
    fn provider(&self) -> PaymentMethod;

    fn mode(&self) -> PaymentMode;

    /// Whether the provider has the credentials it needs to charge.
    fn is_configured(&self) -> bool;

    async fn charge(&self, request: &ChargeRequest) -> AppResult<ChargeOutcome>;
}
