use thiserror::Error;

use crate::app_error::AppError;

/// Errors that stop the service from starting.
///
/// Display messages never include secret values; use `%e` in logs.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Configuration error: environment variable {var} not set")]
    ConfigMissing { var: &'static str },

    #[error("Configuration error: {var} is invalid ({reason})")]
    ConfigInvalid { var: &'static str, reason: String },

    #[error("Password hasher initialization failed")]
    HasherInit(#[source] AppError),

    #[error("HTTP client initialization failed")]
    HttpClient(#[source] reqwest::Error),
}
