use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        let code = self.code();
        match self {
            AppError::InvalidInput(msg) | AppError::Domain(msg) | AppError::InvalidKey(msg) => {
                error_resp(StatusCode::BAD_REQUEST, code, msg)
            }
            AppError::DuplicateAccount | AppError::ProviderNotConfigured(_) => {
                error_resp(StatusCode::BAD_REQUEST, code, self.to_string())
            }
            AppError::InvalidCredentials => {
                error_resp(StatusCode::UNAUTHORIZED, code, "Invalid credentials")
            }
            AppError::InvalidToken(_) => error_resp(StatusCode::UNAUTHORIZED, code, "Invalid token"),
            AppError::PaymentDeclined(reason) => error_resp(
                StatusCode::PAYMENT_REQUIRED,
                code,
                format!("Payment declined: {reason}"),
            ),
            AppError::Provider(_) => {
                error_resp(StatusCode::BAD_GATEWAY, code, "Payment provider error")
            }
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, code, "Not found"),
            AppError::Internal(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, code, "Internal error")
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into(), "code": code.as_str() });
    (status, Json(body)).into_response()
}
