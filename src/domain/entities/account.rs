use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::tier::Tier;

/// Account record as held by the account store.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string, never leaves the service.
    pub password_hash: String,
    pub name: String,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            tier: self.tier,
            created_at: self.created_at,
        }
    }
}

/// Public shape of an account returned to callers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub tier: Tier,
    pub created_at: DateTime<Utc>,
}
