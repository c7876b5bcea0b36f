//! Finite-field Diffie-Hellman over caller supplied or deployment parameters.
//!
//! The module is a pure function of its inputs plus fresh entropy: private
//! keys are handed back to the caller and never retained.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app_error::{AppError, AppResult};
use crate::application::modmath::{is_probable_prime, modpow, random_in_range};

const PRIMALITY_ROUNDS: u32 = 24;

/// Largest modulus accepted, from configuration or from a caller.
pub const MAX_PRIME_BITS: u64 = 8192;

/// RFC 3526 group 14: 2048-bit MODP prime.
const RFC3526_GROUP14_PRIME_HEX: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1",
    "29024E088A67CC74020BBEA63B139B22514A08798E3404DD",
    "EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245",
    "E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED",
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D",
    "C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F",
    "83655D23DCA3AD961C62F356208552BB9ED529077096966D",
    "670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B",
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9",
    "DE2BCBF6955817183995497CEA956AE515D2261898FA0510",
    "15728E5A8AACAA68FFFFFFFFFFFFFFFF",
);

static RFC3526_GROUP14: Lazy<DhParameters> = Lazy::new(|| DhParameters {
    p: BigUint::parse_bytes(RFC3526_GROUP14_PRIME_HEX.as_bytes(), 16)
        .expect("RFC 3526 prime is valid hex"),
    g: BigUint::from(2u32),
});

/// Public group parameters `{P, G}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhParameters {
    pub p: BigUint,
    pub g: BigUint,
}

impl DhParameters {
    pub fn new(p: BigUint, g: BigUint) -> AppResult<Self> {
        let params = Self { p, g };
        params.validate()?;
        Ok(params)
    }

    /// The 2048-bit MODP group from RFC 3526 with generator 2.
    pub fn rfc3526_group14() -> Self {
        RFC3526_GROUP14.clone()
    }

    /// Rejects parameters that cannot carry an exchange: `P` must be an odd
    /// probable prime greater than 3 and at most [`MAX_PRIME_BITS`] long,
    /// and `G` must lie in `(1, P-1)`.
    pub fn validate(&self) -> AppResult<()> {
        if self.p.bits() > MAX_PRIME_BITS {
            return Err(AppError::InvalidInput(format!(
                "P must be at most {MAX_PRIME_BITS} bits"
            )));
        }
        let three = BigUint::from(3u32);
        if self.p <= three || !self.p.bit(0) {
            return Err(AppError::InvalidInput(
                "P must be an odd prime greater than 3".into(),
            ));
        }
        let p_minus_one = &self.p - BigUint::one();
        if self.g <= BigUint::one() || self.g >= p_minus_one {
            return Err(AppError::InvalidInput("G must lie between 1 and P-1".into()));
        }
        if !is_probable_prime(&self.p, PRIMALITY_ROUNDS) {
            return Err(AppError::InvalidInput("P is not prime".into()));
        }
        Ok(())
    }

    pub fn to_wire(&self) -> DhParametersWire {
        DhParametersWire {
            p: self.p.to_string(),
            g: self.g.to_string(),
        }
    }
}

/// Decimal string form used on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DhParametersWire {
    #[serde(rename = "P")]
    pub p: String,
    #[serde(rename = "G")]
    pub g: String,
}

#[derive(Debug, Clone)]
pub struct DhKeyPair {
    pub private_key: BigUint,
    pub public_key: BigUint,
}

/// Draws a private key uniformly from `[2, P-2]` and derives the public key.
pub fn generate_key_pair(parameters: &DhParameters) -> AppResult<DhKeyPair> {
    let low = BigUint::from(2u32);
    let high = &parameters.p - BigUint::from(2u32);
    let private_key = random_in_range(&low, &high)?;
    let public_key = modpow(
        &BigInt::from(parameters.g.clone()),
        &BigInt::from(private_key.clone()),
        &BigInt::from(parameters.p.clone()),
    )?;
    Ok(DhKeyPair {
        private_key,
        public_key,
    })
}

/// Computes `other_public_key ^ private_key mod P`.
///
/// The private key must lie in `[1, P-1]`, which keeps the exponentiation
/// bounded by the size of the group.
pub fn compute_shared_secret(
    private_key: &BigInt,
    other_public_key: &BigInt,
    parameters: &DhParameters,
) -> AppResult<BigUint> {
    if private_key <= &BigInt::zero() {
        return Err(AppError::InvalidKey("private key must be positive".into()));
    }
    let p = BigInt::from(parameters.p.clone());
    if private_key >= &p {
        return Err(AppError::InvalidKey("private key must be less than P".into()));
    }
    if other_public_key < &BigInt::one() || other_public_key >= &p {
        return Err(AppError::InvalidKey(
            "public key must lie in [1, P-1]".into(),
        ));
    }
    modpow(other_public_key, private_key, &p)
}
