pub mod app;
pub mod config;
pub mod crypto;
pub mod demo_payment_client;
pub mod error;
pub mod http_client;
pub mod key_derivation;
pub mod password;
pub mod setup;
pub mod stripe_client;
pub mod stripe_payment_adapter;
