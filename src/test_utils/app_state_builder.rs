//! Builders that wire use cases and `AppState` with in-memory dependencies.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::HeaderValue};
use axum_test::TestServer;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::{
        self,
        http::app_state::AppState,
        persistence::InMemoryAccountRepo,
    },
    application::{
        dh::DhParameters,
        ports::payment_provider::PaymentProviderPort,
        token::TokenService,
        use_cases::{
            key_exchange::KeyExchangeUseCases,
            payment::PaymentUseCases,
            payment_provider_factory::PaymentProviderFactory,
            session::{AccountRepo, SessionUseCases},
        },
    },
    domain::entities::payment_mode::PaymentMode,
    infra::config::{AppConfig, StripeConfig},
    test_utils::{TEST_TOKEN_SECRET, test_hasher, test_token_service},
};

/// Provider calls longer than this fail in tests.
pub const TEST_PROVIDER_TIMEOUT: Duration = Duration::from_millis(500);

/// Session use cases over a fresh in-memory store.
pub fn test_session_use_cases() -> (SessionUseCases, Arc<InMemoryAccountRepo>) {
    let repo = Arc::new(InMemoryAccountRepo::new());
    let sessions = SessionUseCases::new(
        repo.clone(),
        Arc::new(test_hasher()),
        Arc::new(test_token_service()),
    );
    (sessions, repo)
}

pub struct TestUseCases {
    pub repo: Arc<dyn AccountRepo>,
    pub tokens: Arc<TokenService>,
    pub sessions: Arc<SessionUseCases>,
    pub payments: Arc<PaymentUseCases>,
}

pub fn test_use_cases(providers: PaymentProviderFactory) -> TestUseCases {
    test_use_cases_with_repo(Arc::new(InMemoryAccountRepo::new()), providers)
}

pub fn test_use_cases_with_repo(
    repo: Arc<dyn AccountRepo>,
    providers: PaymentProviderFactory,
) -> TestUseCases {
    let tokens = Arc::new(test_token_service());
    let sessions = Arc::new(SessionUseCases::new(
        repo.clone(),
        Arc::new(test_hasher()),
        tokens.clone(),
    ));
    let payments = Arc::new(PaymentUseCases::new(
        repo.clone(),
        sessions.clone(),
        tokens.clone(),
        Arc::new(providers),
        TEST_PROVIDER_TIMEOUT,
    ));
    TestUseCases {
        repo,
        tokens,
        sessions,
        payments,
    }
}

/// Config with test values; nothing is read from the environment.
pub fn test_config() -> AppConfig {
    AppConfig {
        token_secret: SecretString::new(TEST_TOKEN_SECRET.into()),
        token_ttl: time::Duration::hours(1),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        stripe: StripeConfig {
            secret_key: None,
            api_base: Url::parse("http://127.0.0.1:9/v1").unwrap(),
            currency: "usd".into(),
            payment_method: "pm_card_visa".into(),
            mode: PaymentMode::Test,
        },
        provider_timeout: TEST_PROVIDER_TIMEOUT,
        dh_parameters: None,
        password_hash_memory_kib: 64,
        password_hash_iterations: 1,
        log_file: std::env::temp_dir()
            .join("tierpass-test.log")
            .to_string_lossy()
            .into_owned(),
    }
}

/// Builds an `AppState` for HTTP-level tests.
pub struct TestAppStateBuilder {
    providers: PaymentProviderFactory,
    dh_parameters: DhParameters,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            providers: PaymentProviderFactory::new(),
            dh_parameters: DhParameters::rfc3526_group14(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn PaymentProviderPort>) -> Self {
        self.providers = self.providers.with_provider(provider);
        self
    }

    pub fn with_dh_parameters(mut self, parameters: DhParameters) -> Self {
        self.dh_parameters = parameters;
        self
    }

    pub fn build(self) -> AppState {
        let uc = test_use_cases(self.providers);
        AppState {
            config: Arc::new(test_config()),
            session_use_cases: uc.sessions,
            payment_use_cases: uc.payments,
            key_exchange_use_cases: Arc::new(KeyExchangeUseCases::new(self.dh_parameters)),
        }
    }
}

/// Serves the `/api` routes over `state`.
pub fn test_server(state: AppState) -> TestServer {
    let app = Router::new()
        .nest("/api", adapters::http::routes::router())
        .with_state(state);
    TestServer::new(app).unwrap()
}
