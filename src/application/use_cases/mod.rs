pub mod key_exchange;
pub mod payment;
pub mod payment_provider_factory;
pub mod session;
