use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::InMemoryAccountRepo,
    app_error::{AppError, AppResult},
    domain::entities::{account::Account, tier::Tier},
    use_cases::session::AccountRepo,
};

/// Account store whose tier updates always fail. Everything else works.
#[derive(Default)]
pub struct FailingTierUpdateRepo {
    inner: InMemoryAccountRepo,
}

#[async_trait]
impl AccountRepo for FailingTierUpdateRepo {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, account: Account) -> AppResult<Account> {
        self.inner.insert(account).await
    }

    async fn update_tier(&self, _id: Uuid, _tier: Tier) -> AppResult<Account> {
        Err(AppError::Internal("store unavailable".into()))
    }
}
