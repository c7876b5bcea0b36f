use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    app_error::AppResult,
    application::ports::payment_provider::{
        ChargeOutcome, ChargeRequest, PaymentProviderPort, TransactionId,
    },
    domain::entities::{payment_method::PaymentMethod, payment_mode::PaymentMode},
};

#[derive(Clone, Copy)]
enum Behaviour {
    Succeed,
    Decline,
    Slow(Duration),
}

/// Scripted payment provider that records every charge it receives.
pub struct MockPaymentProvider {
    method: PaymentMethod,
    behaviour: Behaviour,
    charges: Mutex<Vec<ChargeRequest>>,
}

impl MockPaymentProvider {
    fn with(method: PaymentMethod, behaviour: Behaviour) -> Self {
        Self {
            method,
            behaviour,
            charges: Mutex::new(Vec::new()),
        }
    }

    /// Approves every charge with transaction id `pi_mock`.
    pub fn succeeding(method: PaymentMethod) -> Self {
        Self::with(method, Behaviour::Succeed)
    }

    pub fn declining(method: PaymentMethod) -> Self {
        Self::with(method, Behaviour::Decline)
    }

    /// Sleeps for `delay` before approving.
    pub fn slow(method: PaymentMethod, delay: Duration) -> Self {
        Self::with(method, Behaviour::Slow(delay))
    }

    pub fn charges(&self) -> Vec<ChargeRequest> {
        self.charges.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProviderPort for MockPaymentProvider {
    fn provider(&self) -> PaymentMethod {
        self.method
    }

    fn mode(&self) -> PaymentMode {
        PaymentMode::Test
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn charge(&self, request: &ChargeRequest) -> AppResult<ChargeOutcome> {
        self.charges.lock().unwrap().push(request.clone());
        match self.behaviour {
            Behaviour::Succeed => {}
            Behaviour::Decline => {
                return Ok(ChargeOutcome::Declined {
                    reason: "Your card was declined.".into(),
                });
            }
            Behaviour::Slow(delay) => tokio::time::sleep(delay).await,
        }
        Ok(ChargeOutcome::Succeeded {
            transaction_id: TransactionId::new("pi_mock"),
        })
    }
}
