use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::application::token::TokenError;
use crate::domain::entities::{account::Account, tier::Tier};

/// Session claims carried inside a token.
///
/// Field order is fixed by the struct definition, so serialising the same
/// value always yields the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Claims {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub tier: Tier,
    /// Unix timestamp (seconds)
    pub issued_at: i64,
    /// Unix timestamp (seconds)
    pub expires_at: i64,
}

impl Claims {
    /// Fresh claims for `account` valid for `ttl` starting now.
    pub fn for_account(account: &Account, ttl: Duration) -> Self {
        Self::for_account_with_tier(account, account.tier, ttl)
    }

    /// Same as [`Claims::for_account`] but carrying `tier` instead of the
    /// stored one, used when minting ahead of a tier change.
    pub fn for_account_with_tier(account: &Account, tier: Tier, ttl: Duration) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            account_id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            tier,
            issued_at: now,
            expires_at: now + ttl.whole_seconds(),
        }
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Canonical byte encoding of claims.
pub fn encode(claims: &Claims) -> Result<Vec<u8>, TokenError> {
    serde_json::to_vec(claims).map_err(|_| TokenError::MalformedPayload)
}

/// Parses claims and checks that both timestamps are representable and ordered.
pub fn decode(bytes: &[u8]) -> Result<Claims, TokenError> {
    let claims: Claims =
        serde_json::from_slice(bytes).map_err(|_| TokenError::MalformedPayload)?;

    for ts in [claims.issued_at, claims.expires_at] {
        if ts < 0 || OffsetDateTime::from_unix_timestamp(ts).is_err() {
            return Err(TokenError::MalformedPayload);
        }
    }
    if claims.issued_at > claims.expires_at {
        return Err(TokenError::MalformedPayload);
    }

    Ok(claims)
}
