//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory and scripted fakes for the account store and payment providers
//! - A local HTTP server standing in for the Stripe API
//! - Builders for use cases and `AppState` wired with test dependencies

mod app_state_builder;
mod factories;
mod payment_mocks;
mod repo_mocks;
mod stripe_server;

pub use app_state_builder::*;
pub use factories::*;
pub use payment_mocks::*;
pub use repo_mocks::*;
pub use stripe_server::*;
