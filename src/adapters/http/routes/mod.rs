pub mod auth;
pub mod dh;
pub mod features;
pub mod payment;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(payment::router())
        .merge(features::router())
        .nest("/dh", dh::router())
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::{TestAppStateBuilder, test_server};

    #[tokio::test]
    async fn test_health() {
        let server = test_server(TestAppStateBuilder::new().build());
        let response = server.get("/api/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let server = test_server(TestAppStateBuilder::new().build());
        server
            .post("/api/nope")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
