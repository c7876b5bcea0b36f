use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        claims::Claims,
        token::{TokenError, TokenService},
        validators::{is_blank, is_valid_email, missing_fields},
    },
    domain::entities::{
        account::{Account, AccountView},
        tier::Tier,
    },
    infra::password::Argon2Hasher,
};

#[async_trait]
pub trait AccountRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;
    /// Stores a new account. Fails with `DuplicateAccount` when the email is
    /// already taken; the check and the write happen atomically.
    async fn insert(&self, account: Account) -> AppResult<Account>;
    /// Fails with `NotFound` for an unknown id.
    async fn update_tier(&self, id: Uuid, tier: Tier) -> AppResult<Account>;
}

/// An authenticated account and the token that proves it.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: AccountView,
    pub token: String,
}

/// Result of checking a token that the caller presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Valid(Claims),
    Invalid(TokenError),
}

#[derive(Clone)]
pub struct SessionUseCases {
    repo: Arc<dyn AccountRepo>,
    hasher: Arc<Argon2Hasher>,
    tokens: Arc<TokenService>,
}

impl SessionUseCases {
    pub fn new(
        repo: Arc<dyn AccountRepo>,
        hasher: Arc<Argon2Hasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        name: Option<&str>,
    ) -> AppResult<Session> {
        let missing = missing_fields(&[("email", email), ("password", password), ("name", name)]);
        if !missing.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        let (Some(email), Some(password), Some(name)) = (email, password, name) else {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        };

        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AppError::InvalidInput("Invalid email address".into()));
        }

        // Cheap early exit; the insert below is what actually decides.
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AppError::DuplicateAccount);
        }

        let password_hash = self.hasher.hash(password).await?;
        let account = self
            .repo
            .insert(Account {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash,
                name: name.trim().to_string(),
                tier: Tier::Free,
                created_at: Utc::now(),
            })
            .await?;

        let (_, token) = self.tokens.issue_for(&account)?;
        tracing::info!(account_id = %account.id, "Account registered");
        Ok(Session {
            account: account.view(),
            token,
        })
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: Option<&str>, password: Option<&str>) -> AppResult<Session> {
        let missing = missing_fields(&[("email", email), ("password", password)]);
        if !missing.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        };

        let Some(account) = self.repo.find_by_email(email.trim()).await? else {
            self.hasher.verify_absent(password).await?;
            return Err(AppError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &account.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        let (_, token) = self.tokens.issue_for(&account)?;
        Ok(Session {
            account: account.view(),
            token,
        })
    }

    /// Checks a presented token. Invalid tokens are an outcome, not an error.
    #[instrument(skip_all)]
    pub fn verify(&self, token: Option<&str>) -> AppResult<VerifyOutcome> {
        let token = match token {
            Some(t) if !is_blank(Some(t)) => t,
            _ => return Err(AppError::InvalidInput("token is required".into())),
        };
        Ok(match self.tokens.verify(token) {
            Ok(claims) => VerifyOutcome::Valid(claims),
            Err(e) => {
                tracing::debug!(code = e.code(), "Token rejected");
                VerifyOutcome::Invalid(e)
            }
        })
    }

    /// Gate for operations that need a valid session.
    pub fn authorize(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token).map_err(AppError::InvalidToken)
    }
}
