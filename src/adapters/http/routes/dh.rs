use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    use_cases::key_exchange::{DhParametersInput, IntegerInput},
};

#[derive(Deserialize, Default)]
struct GeneratePayload {
    #[serde(default)]
    parameters: Option<DhParametersInput>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedSecretPayload {
    private_key: Option<IntegerInput>,
    other_public_key: Option<IntegerInput>,
    #[serde(default)]
    parameters: Option<DhParametersInput>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/shared-secret", post(shared_secret))
}

/// The body is optional; without one the deployment group is used.
async fn generate(
    State(app_state): State<AppState>,
    payload: Option<Json<GeneratePayload>>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.unwrap_or_default();
    let (parameters, pair) = app_state
        .key_exchange_use_cases
        .generate(payload.parameters)
        .await?;
    Ok(Json(json!({
        "publicKey": pair.public_key.to_string(),
        "privateKey": pair.private_key.to_string(),
        "parameters": parameters.to_wire(),
    })))
}

async fn shared_secret(
    State(app_state): State<AppState>,
    Json(payload): Json<SharedSecretPayload>,
) -> AppResult<impl IntoResponse> {
    let secret = app_state
        .key_exchange_use_cases
        .shared_secret(
            payload.private_key,
            payload.other_public_key,
            payload.parameters,
        )
        .await?;
    Ok(Json(json!({ "sharedSecret": secret.to_string() })))
}
