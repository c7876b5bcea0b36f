use thiserror::Error;

use crate::application::token::TokenError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(#[source] TokenError),

    #[error("{0} not configured. Please use demo payment.")]
    ProviderNotConfigured(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Payment provider error: {0}")]
    Provider(String),

    #[error("Arithmetic domain error: {0}")]
    Domain(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidInput,
    DuplicateAccount,
    InvalidCredentials,
    InvalidToken,
    ProviderNotConfigured,
    PaymentDeclined,
    ProviderError,
    DomainError,
    InvalidKey,
    NotFound,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::DuplicateAccount => "DUPLICATE_ACCOUNT",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::ProviderNotConfigured => "PROVIDER_NOT_CONFIGURED",
            ErrorCode::PaymentDeclined => "PAYMENT_DECLINED",
            ErrorCode::ProviderError => "PROVIDER_ERROR",
            ErrorCode::DomainError => "DOMAIN_ERROR",
            ErrorCode::InvalidKey => "INVALID_KEY",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::DuplicateAccount => ErrorCode::DuplicateAccount,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::InvalidToken(_) => ErrorCode::InvalidToken,
            AppError::ProviderNotConfigured(_) => ErrorCode::ProviderNotConfigured,
            AppError::PaymentDeclined(_) => ErrorCode::PaymentDeclined,
            AppError::Provider(_) => ErrorCode::ProviderError,
            AppError::Domain(_) => ErrorCode::DomainError,
            AppError::InvalidKey(_) => ErrorCode::InvalidKey,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
