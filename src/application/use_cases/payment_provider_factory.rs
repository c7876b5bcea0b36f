use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::PaymentProviderPort,
    domain::entities::payment_method::PaymentMethod,
    infra::demo_payment_client::DemoPaymentClient,
};

/// Registry of payment providers keyed by the method callers ask for.
///
/// The demo provider is always present. Provider-backed methods are added
/// with [`PaymentProviderFactory::with_provider`] at startup.
pub struct PaymentProviderFactory {
    providers: HashMap<PaymentMethod, Arc<dyn PaymentProviderPort>>,
}

impl Default for PaymentProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentProviderFactory {
    pub fn new() -> Self {
        let mut providers: HashMap<PaymentMethod, Arc<dyn PaymentProviderPort>> = HashMap::new();
        providers.insert(PaymentMethod::Demo, Arc::new(DemoPaymentClient::new()));
        Self { providers }
    }

    /// Registers `provider` under its own method, replacing any previous one.
    pub fn with_provider(mut self, provider: Arc<dyn PaymentProviderPort>) -> Self {
        self.providers.insert(provider.provider(), provider);
        self
    }

    /// Get a ready-to-charge provider for `method`.
    ///
    /// # Errors
    /// - `ProviderNotConfigured` if nothing is registered for the method or
    ///   the registered provider lacks credentials
    pub fn get(&self, method: PaymentMethod) -> AppResult<Arc<dyn PaymentProviderPort>> {
        match self.providers.get(&method) {
            Some(provider) if provider.is_configured() => Ok(provider.clone()),
            _ => Err(AppError::ProviderNotConfigured(
                method.display_name().to_string(),
            )),
        }
    }

    pub fn is_configured(&self, method: PaymentMethod) -> bool {
        self.providers
            .get(&method)
            .is_some_and(|p| p.is_configured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stripe_payment_adapter::StripePaymentAdapter;
    use crate::test_utils::MockPaymentProvider;

    #[test]
    fn test_demo_is_always_available() {
        let factory = PaymentProviderFactory::new();
        assert!(factory.is_configured(PaymentMethod::Demo));
        assert_eq!(
            factory.get(PaymentMethod::Demo).unwrap().provider(),
            PaymentMethod::Demo
        );
    }

    #[test]
    fn test_missing_stripe_is_not_configured() {
        let factory = PaymentProviderFactory::new();
        let err = factory.get(PaymentMethod::Stripe).err().unwrap();
        assert!(matches!(err, AppError::ProviderNotConfigured(ref p) if p == "Stripe"));
        assert_eq!(
            err.to_string(),
            "Stripe not configured. Please use demo payment."
        );
    }

    #[test]
    fn test_unconfigured_stripe_adapter_is_rejected() {
        let factory = PaymentProviderFactory::new()
            .with_provider(Arc::new(StripePaymentAdapter::unconfigured()));
        assert!(!factory.is_configured(PaymentMethod::Stripe));
        assert!(factory.get(PaymentMethod::Stripe).is_err());
    }

    #[test]
    fn test_with_provider_registers_by_method() {
        let factory = PaymentProviderFactory::new()
            .with_provider(Arc::new(MockPaymentProvider::succeeding(PaymentMethod::Stripe)));
        assert!(factory.is_configured(PaymentMethod::Stripe));
        assert!(factory.get(PaymentMethod::Stripe).is_ok());
    }
}
