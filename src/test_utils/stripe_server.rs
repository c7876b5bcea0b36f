//! Local stand-in for the Stripe PaymentIntents endpoint.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tokio::task::JoinHandle;
use url::Url;

/// How the fake answers every PaymentIntent request.
#[derive(Clone, Copy, Debug)]
pub enum MockStripeReply {
    Succeeded,
    RequiresAction,
    CardDeclined,
    Unauthorized,
    /// Succeeds after sleeping.
    Delay(Duration),
}

#[derive(Clone, Debug)]
pub struct SeenRequest {
    pub authorization: String,
    pub idempotency_key: String,
    pub form: HashMap<String, String>,
}

#[derive(Clone)]
struct ServerState {
    reply: MockStripeReply,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct MockStripeServer {
    addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    handle: JoinHandle<()>,
}

impl MockStripeServer {
    pub async fn start(reply: MockStripeReply) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            reply,
            seen: seen.clone(),
        };
        let app = Router::new()
            .route("/v1/payment_intents", post(create_payment_intent))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });
        Self { addr, seen, handle }
    }

    /// Base URL to configure the client with, ending in `/v1`.
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/v1", self.addr)).unwrap()
    }

    pub async fn last_request(&self) -> Option<SeenRequest> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl Drop for MockStripeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_payment_intent(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    let amount: i64 = form
        .get("amount")
        .and_then(|a| a.parse().ok())
        .unwrap_or_default();
    let currency = form.get("currency").cloned().unwrap_or_default();
    state.seen.lock().unwrap().push(SeenRequest {
        authorization: header("authorization"),
        idempotency_key: header("idempotency-key"),
        form,
    });

    let intent = |status: &str| {
        Json(json!({
            "id": "pi_test_123",
            "object": "payment_intent",
            "status": status,
            "amount": amount,
            "currency": currency,
            "last_payment_error": null,
        }))
    };

    match state.reply {
        MockStripeReply::Succeeded => intent("succeeded").into_response(),
        MockStripeReply::RequiresAction => intent("requires_action").into_response(),
        MockStripeReply::Delay(delay) => {
            tokio::time::sleep(delay).await;
            intent("succeeded").into_response()
        }
        MockStripeReply::CardDeclined => (
            StatusCode::PAYMENT_REQUIRED,
            Json(json!({
                "error": {
                    "type": "card_error",
                    "code": "card_declined",
                    "decline_code": "generic_decline",
                    "message": "Your card was declined."
                }
            })),
        )
            .into_response(),
        MockStripeReply::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Invalid API Key provided"
                }
            })),
        )
            .into_response(),
    }
}
