//! Argon2id password hashing, run on the blocking pool.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;

use crate::app_error::{AppError, AppResult};

pub const DEFAULT_MEMORY_KIB: u32 = 19_456;
pub const DEFAULT_ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    /// Hash of a random value under the same cost, checked when there is no
    /// stored hash so both login failures do the same work.
    dummy_phc: String,
}

impl Argon2Hasher {
    pub fn new(memory_kib: u32, iterations: u32) -> AppResult<Self> {
        let params = Params::new(memory_kib, iterations, PARALLELISM, None)
            .map_err(|e| AppError::Internal(format!("invalid Argon2 parameters: {e}")))?;
        let filler = SaltString::generate(&mut OsRng);
        let dummy_phc = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
            .hash_password(filler.as_str().as_bytes(), &SaltString::generate(&mut OsRng))
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
            .to_string();
        Ok(Self { params, dummy_phc })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Returns a PHC string with a fresh random salt.
    pub async fn hash(&self, password: &str) -> AppResult<String> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
        })
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
    }

    /// False for a wrong password. A stored hash that does not parse is an
    /// internal error, not a mismatch.
    pub async fn verify(&self, password: &str, phc: &str) -> AppResult<bool> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        let phc = phc.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&phc)
                .map_err(|e| AppError::Internal(format!("stored hash is invalid: {e}")))?;
            Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
    }

    /// Runs a full verification against the dummy hash. Always false.
    pub async fn verify_absent(&self, password: &str) -> AppResult<bool> {
        self.verify(password, &self.dummy_phc).await.map(|_| false)
    }
}
