use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::{
        ChargeOutcome, ChargeRequest, PaymentProviderPort, TransactionId,
    },
    domain::entities::{payment_method::PaymentMethod, payment_mode::PaymentMode},
    infra::stripe_client::{PaymentIntentParams, StripeClient, StripeError},
};

/// Adapter that wraps StripeClient to implement PaymentProviderPort.
///
/// Without a secret key the adapter stays registered but reports itself as
/// unconfigured, so callers get a clear "not configured" error.
#[derive(Clone)]
pub struct StripePaymentAdapter {
    client: Option<StripeClient>,
    mode: PaymentMode,
    currency: String,
    payment_method: String,
}

impl StripePaymentAdapter {
    pub fn new(
        client: Option<StripeClient>,
        mode: PaymentMode,
        currency: String,
        payment_method: String,
    ) -> Self {
        Self {
            client,
            mode,
            currency,
            payment_method,
        }
    }

    pub fn unconfigured() -> Self {
        Self::new(None, PaymentMode::Test, "usd".into(), "pm_card_visa".into())
    }

    /// Map a PaymentIntent status onto a charge outcome.
    fn map_intent_status(status: &str, id: String, error: Option<String>) -> ChargeOutcome {
        match status {
            "succeeded" => ChargeOutcome::Succeeded {
                transaction_id: TransactionId::new(id),
            },
            "requires_action" => ChargeOutcome::Declined {
                reason: "Payment requires additional authentication".into(),
            },
            "processing" => ChargeOutcome::Declined {
                reason: "Payment is still processing".into(),
            },
            _ => ChargeOutcome::Declined {
                reason: error.unwrap_or_else(|| "Payment was not completed".into()),
            },
        }
    }
}

#[async_trait]
impl PaymentProviderPort for StripePaymentAdapter {
    fn provider(&self) -> PaymentMethod {
        PaymentMethod::Stripe
    }

    fn mode(&self) -> PaymentMode {
        self.mode
    }

    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn charge(&self, request: &ChargeRequest) -> AppResult<ChargeOutcome> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::ProviderNotConfigured(PaymentMethod::Stripe.display_name().into()))?;

        let metadata = [
            ("account_id", request.account_id.to_string()),
            ("tier", request.tier.to_string()),
        ];
        let description = format!("Upgrade to {}", request.tier.display_name());
        let params = PaymentIntentParams {
            amount_cents: request.amount_cents,
            currency: &self.currency,
            payment_method: &self.payment_method,
            receipt_email: &request.email,
            description: &description,
            metadata: &metadata,
            idempotency_key: &request.idempotency_key,
        };

        match client.create_payment_intent(&params).await {
            Ok(intent) => Ok(Self::map_intent_status(
                &intent.status,
                intent.id,
                intent.last_payment_error.and_then(|e| e.message),
            )),
            Err(StripeError::CardDeclined(reason)) => Ok(ChargeOutcome::Declined { reason }),
            Err(StripeError::Timeout) => {
                Err(AppError::Provider("Payment provider timed out".into()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Stripe charge failed");
                Err(AppError::Provider("Payment provider request failed".into()))
            }
        }
    }
}
