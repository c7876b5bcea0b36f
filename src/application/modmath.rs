//! Arbitrary precision modular arithmetic used by the key exchange.

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_traits::{One, Zero};

use crate::app_error::{AppError, AppResult};

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// Negative bases are normalised into `[0, modulus)` first. Fails with
/// [`AppError::Domain`] when `modulus <= 1` or `exponent < 0`.
pub fn modpow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> AppResult<BigUint> {
    if *modulus <= BigInt::one() {
        return Err(AppError::Domain("modulus must be greater than 1".into()));
    }
    if exponent.sign() == Sign::Minus {
        return Err(AppError::Domain("exponent must not be negative".into()));
    }

    let m = modulus.magnitude();
    let mut base = normalise(base, modulus);
    let mut exp = exponent.magnitude().clone();
    let mut result = BigUint::one();

    while !exp.is_zero() {
        if exp.bit(0) {
            result = (&result * &base) % m;
        }
        exp >>= 1u32;
        base = (&base * &base) % m;
    }

    Ok(result % m)
}

/// Draws an integer uniformly from the inclusive range `[low, high]` using
/// the operating system CSPRNG.
pub fn random_in_range(low: &BigUint, high: &BigUint) -> AppResult<BigUint> {
    if low > high {
        return Err(AppError::Domain("empty range".into()));
    }
    let upper = high + BigUint::one();
    Ok(rand::rngs::OsRng.gen_biguint_range(low, &upper))
}

/// Miller-Rabin probable prime test with random witnesses.
pub fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if *n < two {
        return false;
    }
    if *n == two || *n == three {
        return true;
    }
    if !n.bit(0) {
        return false;
    }

    for p in SMALL_PRIMES {
        let p = BigUint::from(*p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - BigUint::one();
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    let mut rng = rand::rngs::OsRng;
    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

const SMALL_PRIMES: &[u32] = &[
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

fn normalise(value: &BigInt, modulus: &BigInt) -> BigUint {
    let reduced = ((value % modulus) + modulus) % modulus;
    reduced.magnitude().clone()
}
