use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{account::Account, tier::Tier},
    use_cases::session::AccountRepo,
};

#[derive(Default)]
struct Accounts {
    by_id: HashMap<Uuid, Account>,
    id_by_email: HashMap<String, Uuid>,
}

/// Process-local account store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryAccountRepo {
    inner: RwLock<Accounts>,
}

impl InMemoryAccountRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Inserts without the uniqueness check, for fixtures.
    #[cfg(test)]
    pub async fn seed(&self, account: Account) {
        let mut guard = self.inner.write().await;
        guard.id_by_email.insert(account.email.clone(), account.id);
        guard.by_id.insert(account.id, account);
    }
}

#[async_trait]
impl AccountRepo for InMemoryAccountRepo {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let guard = self.inner.read().await;
        Ok(guard
            .id_by_email
            .get(email)
            .and_then(|id| guard.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.inner.read().await.by_id.get(&id).cloned())
    }

    async fn insert(&self, account: Account) -> AppResult<Account> {
        let mut guard = self.inner.write().await;
        if guard.id_by_email.contains_key(&account.email) {
            return Err(AppError::DuplicateAccount);
        }
        if guard.by_id.contains_key(&account.id) {
            return Err(AppError::Internal("account id collision".into()));
        }
        guard.id_by_email.insert(account.email.clone(), account.id);
        guard.by_id.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_tier(&self, id: Uuid, tier: Tier) -> AppResult<Account> {
        let mut guard = self.inner.write().await;
        let account = guard.by_id.get_mut(&id).ok_or(AppError::NotFound)?;
        account.tier = tier;
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_account;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryAccountRepo::new();
        let account = create_test_account(|a| a.email = "find@example.com".into());
        repo.insert(account.clone()).await.unwrap();

        let by_email = repo.find_by_email("find@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, account.id);
        let by_id = repo.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "find@example.com");
        assert!(repo.find_by_email("FIND@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryAccountRepo::new();
        repo.insert(create_test_account(|a| a.email = "dup@example.com".into()))
            .await
            .unwrap();
        let err = repo
            .insert(create_test_account(|a| a.email = "dup@example.com".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateAccount));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let repo = Arc::new(InMemoryAccountRepo::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(create_test_account(|a| a.email = "race@example.com".into()))
                    .await
                    .is_ok()
            }));
        }
        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_update_tier() {
        let repo = InMemoryAccountRepo::new();
        let account = repo.insert(create_test_account(|_| {})).await.unwrap();
        let updated = repo.update_tier(account.id, Tier::Basic).await.unwrap();
        assert_eq!(updated.tier, Tier::Basic);
        assert_eq!(
            repo.find_by_id(account.id).await.unwrap().unwrap().tier,
            Tier::Basic
        );
        assert!(matches!(
            repo.update_tier(Uuid::new_v4(), Tier::Basic).await,
            Err(AppError::NotFound)
        ));
    }
}
