use hkdf::Hkdf;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

const SALT: &[u8] = b"tierpass-token-v1";
const ENC_INFO: &[u8] = b"tierpass-token-enc";
const MAC_INFO: &[u8] = b"tierpass-token-mac";

/// Independent encryption and MAC keys for the token engine.
pub struct DerivedTokenKeys {
    pub enc_key: [u8; 32],
    pub mac_key: [u8; 32],
}

/// Derives the token keys from the configured master secret using HKDF-SHA256.
///
/// The two keys use distinct info labels, so compromising one use never
/// yields the other.
pub fn derive_token_keys(secret: &SecretString) -> DerivedTokenKeys {
    let hk = Hkdf::<Sha256>::new(Some(SALT), secret.expose_secret().as_bytes());
    let mut enc_key = [0u8; 32];
    let mut mac_key = [0u8; 32];
    hk.expand(ENC_INFO, &mut enc_key)
        .expect("32 bytes is valid for SHA256 HKDF expand");
    hk.expand(MAC_INFO, &mut mac_key)
        .expect("32 bytes is valid for SHA256 HKDF expand");
    DerivedTokenKeys { enc_key, mac_key }
}
