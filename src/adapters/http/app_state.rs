use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        key_exchange::KeyExchangeUseCases, payment::PaymentUseCases, session::SessionUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session_use_cases: Arc<SessionUseCases>,
    pub payment_use_cases: Arc<PaymentUseCases>,
    pub key_exchange_use_cases: Arc<KeyExchangeUseCases>,
}

impl FromRef<AppState> for Arc<SessionUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.session_use_cases.clone()
    }
}

impl FromRef<AppState> for Arc<PaymentUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.payment_use_cases.clone()
    }
}

impl FromRef<AppState> for Arc<KeyExchangeUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.key_exchange_use_cases.clone()
    }
}
