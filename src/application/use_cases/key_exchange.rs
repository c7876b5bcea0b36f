use num_bigint::{BigInt, BigUint};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::dh::{self, DhKeyPair, DhParameters, MAX_PRIME_BITS},
};

/// Decimal digits needed for any integer of `bits` bits, plus one for a sign.
fn max_decimal_digits(bits: u64) -> usize {
    (bits as f64 * std::f64::consts::LOG10_2).ceil() as usize + 1
}

/// An integer as callers may send it: a decimal string or a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Text(String),
    Number(serde_json::Number),
}

impl IntegerInput {
    /// Parses the value, refusing text longer than `max_digits` before any
    /// big integer work happens.
    pub fn to_bigint(&self, field: &str, max_digits: usize) -> AppResult<BigInt> {
        let text = match self {
            IntegerInput::Text(s) => s.trim().to_string(),
            IntegerInput::Number(n) => n.to_string(),
        };
        if text.len() > max_digits {
            return Err(AppError::InvalidInput(format!("{field} is too large")));
        }
        text.parse::<BigInt>()
            .map_err(|_| AppError::InvalidInput(format!("{field} must be an integer")))
    }

    fn to_biguint(&self, field: &str, max_digits: usize) -> AppResult<BigUint> {
        self.to_bigint(field, max_digits)?
            .to_biguint()
            .ok_or_else(|| AppError::InvalidInput(format!("{field} must not be negative")))
    }
}

/// Caller-pinned group parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct DhParametersInput {
    #[serde(rename = "P")]
    pub p: IntegerInput,
    #[serde(rename = "G")]
    pub g: IntegerInput,
}

impl DhParametersInput {
    pub fn resolve(&self) -> AppResult<DhParameters> {
        let max_digits = max_decimal_digits(MAX_PRIME_BITS);
        DhParameters::new(
            self.p.to_biguint("P", max_digits)?,
            self.g.to_biguint("G", max_digits)?,
        )
    }
}

/// Binds the deployment's default group to the DH operations.
///
/// Parameter validation and exponentiation run on the blocking pool.
#[derive(Clone)]
pub struct KeyExchangeUseCases {
    default_parameters: DhParameters,
}

impl KeyExchangeUseCases {
    /// `default_parameters` are trusted and not re-validated per request.
    pub fn new(default_parameters: DhParameters) -> Self {
        Self { default_parameters }
    }

    pub fn default_parameters(&self) -> &DhParameters {
        &self.default_parameters
    }

    fn parameters(&self, input: Option<&DhParametersInput>) -> AppResult<DhParameters> {
        match input {
            Some(input) => input.resolve(),
            None => Ok(self.default_parameters.clone()),
        }
    }

    async fn run_blocking<T, F>(&self, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(KeyExchangeUseCases) -> AppResult<T> + Send + 'static,
    {
        let this = self.clone();
        tokio::task::spawn_blocking(move || work(this))
            .await
            .map_err(|e| AppError::Internal(format!("key exchange task failed: {e}")))?
    }

    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        parameters: Option<DhParametersInput>,
    ) -> AppResult<(DhParameters, DhKeyPair)> {
        self.run_blocking(move |this| {
            let parameters = this.parameters(parameters.as_ref())?;
            let pair = dh::generate_key_pair(&parameters)?;
            Ok((parameters, pair))
        })
        .await
    }

    #[instrument(skip_all)]
    pub async fn shared_secret(
        &self,
        private_key: Option<IntegerInput>,
        other_public_key: Option<IntegerInput>,
        parameters: Option<DhParametersInput>,
    ) -> AppResult<BigUint> {
        let (Some(private_key), Some(other_public_key)) = (private_key, other_public_key) else {
            return Err(AppError::InvalidInput(
                "privateKey and otherPublicKey are required".into(),
            ));
        };
        self.run_blocking(move |this| {
            let parameters = this.parameters(parameters.as_ref())?;
            let max_digits = max_decimal_digits(parameters.p.bits());
            dh::compute_shared_secret(
                &private_key.to_bigint("privateKey", max_digits)?,
                &other_public_key.to_bigint("otherPublicKey", max_digits)?,
                &parameters,
            )
        })
        .await
    }
}
