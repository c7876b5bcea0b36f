use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::{
        access_control::{features_with_access, tier_comparison},
        validators::is_blank,
    },
};

#[derive(Deserialize)]
struct FeaturesPayload {
    token: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/features", post(features))
        .route("/tiers", get(tiers))
}

/// Feature list for the tier carried by the presented token.
async fn features(
    State(app_state): State<AppState>,
    Json(payload): Json<FeaturesPayload>,
) -> AppResult<impl IntoResponse> {
    let token = payload
        .token
        .filter(|t| !is_blank(Some(t.as_str())))
        .ok_or_else(|| AppError::InvalidInput("token is required".into()))?;
    let claims = app_state.session_use_cases.authorize(&token)?;
    Ok(Json(json!({
        "tier": claims.tier,
        "features": features_with_access(claims.tier),
    })))
}

async fn tiers() -> impl IntoResponse {
    Json(json!({ "tiers": tier_comparison() }))
}
