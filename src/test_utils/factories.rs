//! Test data factories.
//!
//! Each factory returns a complete, valid object. Use the closure parameter
//! to override specific fields.

use chrono::{TimeZone, Utc};
use secrecy::SecretString;
use time::Duration;
use uuid::Uuid;

use crate::{
    application::token::TokenService,
    domain::entities::{account::Account, tier::Tier},
    infra::password::Argon2Hasher,
};

pub const TEST_TOKEN_SECRET: &str = "test-token-secret";

/// Create a test account with sensible defaults.
pub fn create_test_account(overrides: impl FnOnce(&mut Account)) -> Account {
    let mut account = Account {
        id: Uuid::new_v4(),
        email: "user@example.com".to_string(),
        password_hash: "$argon2id$v=19$m=64,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        name: "Test User".to_string(),
        tier: Tier::Free,
        created_at: test_datetime(),
    };
    overrides(&mut account);
    account
}

/// A fixed timestamp for deterministic fixtures.
pub fn test_datetime() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Token service keyed with [`TEST_TOKEN_SECRET`], one hour lifetime.
pub fn test_token_service() -> TokenService {
    TokenService::new(
        &SecretString::new(TEST_TOKEN_SECRET.into()),
        Duration::hours(1),
    )
}

/// Argon2id with the smallest legal cost so tests stay fast.
pub fn test_hasher() -> Argon2Hasher {
    Argon2Hasher::new(64, 1).unwrap()
}
