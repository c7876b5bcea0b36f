use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::payment_provider::{ChargeOutcome, ChargeRequest},
        token::{TokenError, TokenService},
        validators::is_blank,
    },
    domain::entities::{payment_method::PaymentMethod, tier::Tier},
};

use super::{
    payment_provider_factory::PaymentProviderFactory,
    session::{AccountRepo, SessionUseCases},
};

/// What a successful upgrade hands back to the caller.
#[derive(Debug, Clone)]
pub struct UpgradeReceipt {
    pub message: String,
    pub tier: Tier,
    /// Fresh token carrying the new tier.
    pub token: String,
    pub transaction_id: String,
}

#[derive(Clone)]
pub struct PaymentUseCases {
    repo: Arc<dyn AccountRepo>,
    sessions: Arc<SessionUseCases>,
    tokens: Arc<TokenService>,
    providers: Arc<PaymentProviderFactory>,
    provider_timeout: Duration,
}

impl PaymentUseCases {
    pub fn new(
        repo: Arc<dyn AccountRepo>,
        sessions: Arc<SessionUseCases>,
        tokens: Arc<TokenService>,
        providers: Arc<PaymentProviderFactory>,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            sessions,
            tokens,
            providers,
            provider_timeout,
        }
    }

    /// Charges for `tier` and moves the token holder's account onto it.
    ///
    /// The replacement token is minted before the store is touched; if the
    /// store update fails the token is dropped, so the caller never holds a
    /// token for a tier the store does not have.
    #[instrument(skip(self, token))]
    pub async fn pay(
        &self,
        token: Option<&str>,
        tier: Option<&str>,
        payment_method: Option<&str>,
    ) -> AppResult<UpgradeReceipt> {
        let (Some(token), Some(tier)) = (token, tier) else {
            return Err(AppError::InvalidInput("Token and tier required".into()));
        };
        if is_blank(Some(token)) || is_blank(Some(tier)) {
            return Err(AppError::InvalidInput("Token and tier required".into()));
        }

        let claims = self.sessions.authorize(token)?;

        let method: PaymentMethod = payment_method
            .and_then(|m| m.trim().parse().ok())
            .ok_or_else(|| AppError::InvalidInput("Invalid payment method".into()))?;
        // Before the tier is looked at, so every tier fails the same way.
        let provider = self.providers.get(method)?;

        let tier: Tier = tier
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("Invalid tier: {}", tier.trim())))?;

        let account = self
            .repo
            .find_by_id(claims.account_id)
            .await?
            .ok_or(AppError::InvalidToken(TokenError::UnknownAccount))?;

        if method.is_provider_backed() && tier.price_cents() == 0 {
            return Err(AppError::InvalidInput(format!(
                "{} has no price to charge",
                tier.display_name()
            )));
        }

        let request = ChargeRequest::for_tier(account.id, &account.email, tier);
        let outcome = tokio::time::timeout(self.provider_timeout, provider.charge(&request))
            .await
            .map_err(|_| {
                tracing::warn!(provider = %method, "Payment provider timed out");
                AppError::Provider("Payment provider timed out".into())
            })??;

        let transaction_id = match outcome {
            ChargeOutcome::Succeeded { transaction_id } => transaction_id,
            ChargeOutcome::Declined { reason } => {
                tracing::info!(account_id = %account.id, %reason, "Payment declined");
                return Err(AppError::PaymentDeclined(reason));
            }
        };

        let (_, new_token) = self.tokens.issue_with_tier(&account, tier)?;
        self.repo.update_tier(account.id, tier).await.map_err(|e| {
            tracing::error!(
                account_id = %account.id,
                transaction_id = transaction_id.as_str(),
                error = ?e,
                "Charged but tier update failed"
            );
            e
        })?;

        tracing::info!(
            account_id = %account.id,
            %tier,
            provider = %method,
            "Account upgraded"
        );

        let message = match method {
            PaymentMethod::Demo => "Demo payment successful".to_string(),
            other => format!("Payment processed via {}", other.display_name()),
        };
        Ok(UpgradeReceipt {
            message,
            tier,
            token: new_token,
            transaction_id: transaction_id.into_inner(),
        })
    }
}
