//! Custom session token format.
//!
//! A token is `<header>.<payload>.<tag>` where every segment is base64url
//! without padding:
//! - header: canonical JSON format marker,
//! - payload: `nonce || AES-256-GCM(claims)`,
//! - tag: HMAC-SHA256 over `<header>.<payload>`.
//!
//! Verification checks structure, then the tag in constant time, and only
//! then decrypts. Expiry is checked last.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::app_error::{AppError, AppResult};
use crate::application::claims::{self, Claims};
use crate::domain::entities::{account::Account, tier::Tier};
use crate::infra::crypto::TokenCipher;

pub const TOKEN_ALG: &str = "A256GCM+HS256";
pub const TOKEN_TYP: &str = "TPT";
pub const TOKEN_VERSION: u8 = 1;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token format")]
    MalformedToken,

    #[error("Invalid signature")]
    TamperedToken,

    #[error("Token payload could not be decoded")]
    MalformedPayload,

    #[error("Token expired")]
    ExpiredToken,

    /// Verified, but the account it names is gone.
    #[error("Token account no longer exists")]
    UnknownAccount,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::MalformedToken => "MALFORMED_TOKEN",
            TokenError::TamperedToken => "TAMPERED_TOKEN",
            TokenError::MalformedPayload => "MALFORMED_PAYLOAD",
            TokenError::ExpiredToken => "EXPIRED_TOKEN",
            TokenError::UnknownAccount => "UNKNOWN_ACCOUNT",
        }
    }
}

/// Format marker stored in the first segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
    pub ver: u8,
}

impl TokenHeader {
    pub fn current() -> Self {
        Self {
            alg: TOKEN_ALG.to_string(),
            typ: TOKEN_TYP.to_string(),
            ver: TOKEN_VERSION,
        }
    }

    fn is_supported(&self) -> bool {
        *self == Self::current()
    }
}

struct Segments<'a> {
    header: &'a str,
    payload: &'a str,
    header_value: TokenHeader,
    payload_bytes: Vec<u8>,
    tag_bytes: Vec<u8>,
}

fn split(token: &str) -> Result<Segments<'_>, TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(tag), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::MalformedToken);
    };
    if header.is_empty() || payload.is_empty() || tag.is_empty() {
        return Err(TokenError::MalformedToken);
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::MalformedToken)?;
    let header_value: TokenHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| TokenError::MalformedToken)?;
    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::MalformedToken)?;
    let tag_bytes = URL_SAFE_NO_PAD
        .decode(tag)
        .map_err(|_| TokenError::MalformedToken)?;

    Ok(Segments {
        header,
        payload,
        header_value,
        payload_bytes,
        tag_bytes,
    })
}

/// Reads the header segment without checking anything else.
pub fn decode_header(token: &str) -> Result<TokenHeader, TokenError> {
    split(token).map(|s| s.header_value)
}

/// Seals `claims` into a token string.
pub fn mint(claims: &Claims, cipher: &TokenCipher) -> AppResult<String> {
    let header_json = serde_json::to_vec(&TokenHeader::current())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let header = URL_SAFE_NO_PAD.encode(header_json);

    let encoded = claims::encode(claims)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let payload = URL_SAFE_NO_PAD.encode(cipher.encrypt(&encoded)?);

    let signing_input = format!("{header}.{payload}");
    let tag = URL_SAFE_NO_PAD.encode(cipher.tag(signing_input.as_bytes()));

    Ok(format!("{signing_input}.{tag}"))
}

/// Verifies `token` against the current clock.
pub fn verify(token: &str, cipher: &TokenCipher) -> Result<Claims, TokenError> {
    verify_at(token, cipher, OffsetDateTime::now_utc().unix_timestamp())
}

/// Verifies `token` as of unix time `now`.
pub fn verify_at(token: &str, cipher: &TokenCipher, now: i64) -> Result<Claims, TokenError> {
    let segments = split(token)?;
    if !segments.header_value.is_supported() {
        return Err(TokenError::MalformedToken);
    }

    let signing_input = format!("{}.{}", segments.header, segments.payload);
    if !cipher.verify_tag(signing_input.as_bytes(), &segments.tag_bytes) {
        return Err(TokenError::TamperedToken);
    }

    let plaintext = cipher
        .decrypt(&segments.payload_bytes)
        .ok_or(TokenError::MalformedPayload)?;
    let claims = claims::decode(&plaintext)?;

    if claims.is_expired_at(now) {
        return Err(TokenError::ExpiredToken);
    }
    Ok(claims)
}

/// Mints and verifies tokens with a fixed key set and lifetime.
#[derive(Clone)]
pub struct TokenService {
    cipher: TokenCipher,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        Self {
            cipher: TokenCipher::from_secret(secret),
            ttl,
        }
    }

    /// Claims for `account` at its stored tier, sealed.
    pub fn issue_for(&self, account: &Account) -> AppResult<(Claims, String)> {
        self.issue_with_tier(account, account.tier)
    }

    pub fn issue_with_tier(&self, account: &Account, tier: Tier) -> AppResult<(Claims, String)> {
        let claims = Claims::for_account_with_tier(account, tier, self.ttl);
        let token = mint(&claims, &self.cipher)?;
        Ok((claims, token))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        verify(token, &self.cipher)
    }
}
