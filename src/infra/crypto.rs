use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use sha2::Sha256;

use super::key_derivation::derive_token_keys;
use crate::app_error::{AppError, AppResult};

const NONCE_LEN: usize = 12;

type HmacSha256 = Hmac<Sha256>;

/// Symmetric primitives behind the token format: AES-256-GCM for the payload
/// and HMAC-SHA256 for the outer tag.
#[derive(Clone)]
pub struct TokenCipher {
    key: aes_gcm::Key<Aes256Gcm>,
    mac_key: [u8; 32],
}

impl TokenCipher {
    pub fn from_secret(secret: &SecretString) -> Self {
        let keys = derive_token_keys(secret);
        Self {
            key: *aes_gcm::Key::<Aes256Gcm>::from_slice(&keys.enc_key),
            mac_key: keys.mac_key,
        }
    }

    /// Returns `nonce || ciphertext` with a fresh random nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> AppResult<Vec<u8>> {
        let cipher = Aes256Gcm::new(&self.key);
        let nonce_bytes = rand::random::<[u8; NONCE_LEN]>();
        let nonce = Nonce::from_slice(&nonce_bytes);
        let mut buffer = Vec::with_capacity(NONCE_LEN + plaintext.len() + 16);
        buffer.extend_from_slice(nonce);
        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| AppError::Internal(format!("encrypt failed: {e}")))?;
        buffer.extend_from_slice(&ciphertext);
        Ok(buffer)
    }

    /// Opens `nonce || ciphertext`. Returns `None` on any failure.
    pub fn decrypt(&self, data: &[u8]) -> Option<Vec<u8>> {
        if data.len() <= NONCE_LEN {
            return None;
        }
        let (nonce_bytes, cipher_bytes) = data.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        let cipher = Aes256Gcm::new(&self.key);
        cipher.decrypt(nonce, cipher_bytes).ok()
    }

    pub fn tag(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = self.mac();
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }

    /// Constant-time tag check.
    pub fn verify_tag(&self, data: &[u8], tag: &[u8]) -> bool {
        let mut mac = self.mac();
        mac.update(data);
        mac.verify_slice(tag).is_ok()
    }

    fn mac(&self) -> HmacSha256 {
        <HmacSha256 as Mac>::new_from_slice(&self.mac_key).expect("HMAC accepts any key length")
    }
}
