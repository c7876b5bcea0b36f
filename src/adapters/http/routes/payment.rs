use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;

use crate::{adapters::http::app_state::AppState, app_error::AppResult};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentPayload {
    token: Option<String>,
    tier: Option<String>,
    payment_method: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/payment", post(pay))
}

async fn pay(
    State(app_state): State<AppState>,
    Json(payload): Json<PaymentPayload>,
) -> AppResult<impl IntoResponse> {
    let receipt = app_state
        .payment_use_cases
        .pay(
            payload.token.as_deref(),
            payload.tier.as_deref(),
            payload.payment_method.as_deref(),
        )
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": receipt.message,
        "subscription": receipt.tier,
        "token": receipt.token,
        "transactionId": receipt.transaction_id,
    })))
}
