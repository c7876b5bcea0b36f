use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    app_error::AppResult,
    application::ports::payment_provider::{
        ChargeOutcome, ChargeRequest, PaymentProviderPort, TransactionId,
    },
    domain::entities::{payment_method::PaymentMethod, payment_mode::PaymentMode},
};

/// Demo payment client.
///
/// Approves every charge locally without making any external call.
#[derive(Clone, Default)]
pub struct DemoPaymentClient;

impl DemoPaymentClient {
    pub fn new() -> Self {
        Self
    }

    fn generate_transaction_id(&self) -> TransactionId {
        TransactionId::new(format!("demo_txn_{}", Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl PaymentProviderPort for DemoPaymentClient {
    fn provider(&self) -> PaymentMethod {
        PaymentMethod::Demo
    }

    fn mode(&self) -> PaymentMode {
        PaymentMode::Test
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn charge(&self, request: &ChargeRequest) -> AppResult<ChargeOutcome> {
        tracing::info!(
            account_id = %request.account_id,
            tier = %request.tier,
            amount_cents = request.amount_cents,
            "Demo charge approved"
        );
        Ok(ChargeOutcome::Succeeded {
            transaction_id: self.generate_transaction_id(),
        })
    }
}
