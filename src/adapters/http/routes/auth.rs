use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    use_cases::session::{Session, VerifyOutcome},
};

#[derive(Deserialize)]
struct RegisterPayload {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
struct LoginPayload {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct VerifyPayload {
    token: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", post(verify))
}

fn session_body(session: Session) -> Json<serde_json::Value> {
    Json(json!({ "user": session.account, "token": session.token }))
}

async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<impl IntoResponse> {
    let session = app_state
        .session_use_cases
        .register(
            payload.email.as_deref(),
            payload.password.as_deref(),
            payload.name.as_deref(),
        )
        .await?;
    Ok(session_body(session))
}

async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let session = app_state
        .session_use_cases
        .login(payload.email.as_deref(), payload.password.as_deref())
        .await?;
    Ok(session_body(session))
}

async fn verify(
    State(app_state): State<AppState>,
    Json(payload): Json<VerifyPayload>,
) -> AppResult<impl IntoResponse> {
    let body = match app_state
        .session_use_cases
        .verify(payload.token.as_deref())?
    {
        VerifyOutcome::Valid(claims) => json!({ "valid": true, "payload": claims }),
        VerifyOutcome::Invalid(e) => json!({
            "valid": false,
            "error": e.to_string(),
            "code": e.code(),
        }),
    };
    Ok(Json(body))
}
