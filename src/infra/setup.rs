use crate::{
    adapters::{http::app_state::AppState, persistence::InMemoryAccountRepo},
    application::{
        dh::DhParameters, ports::payment_provider::PaymentProviderPort, token::TokenService,
    },
    infra::{
        config::{AppConfig, StripeConfig},
        error::InfraError,
        http_client::try_build_client,
        password::Argon2Hasher,
        stripe_client::StripeClient,
        stripe_payment_adapter::StripePaymentAdapter,
    },
    use_cases::{
        key_exchange::KeyExchangeUseCases,
        payment::PaymentUseCases,
        payment_provider_factory::PaymentProviderFactory,
        session::{AccountRepo, SessionUseCases},
    },
};
use num_bigint::BigUint;
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;
    Ok(build_app_state(config)?)
}

/// Wires every use case from `config`. Nothing here touches the network.
pub fn build_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let dh_parameters = match &config.dh_parameters {
        Some((p, g)) => parse_dh_parameters(p, g)?,
        None => DhParameters::rfc3526_group14(),
    };

    let hasher = Arc::new(
        Argon2Hasher::new(
            config.password_hash_memory_kib,
            config.password_hash_iterations,
        )
        .map_err(InfraError::HasherInit)?,
    );
    let tokens = Arc::new(TokenService::new(&config.token_secret, config.token_ttl));
    let repo = Arc::new(InMemoryAccountRepo::new()) as Arc<dyn AccountRepo>;

    let stripe = stripe_adapter(&config.stripe, config.provider_timeout)?;
    if stripe.is_configured() {
        tracing::info!(mode = %stripe.mode(), "Stripe payments enabled");
    }
    let providers = PaymentProviderFactory::new().with_provider(Arc::new(stripe));

    let session_use_cases = Arc::new(SessionUseCases::new(
        repo.clone(),
        hasher,
        tokens.clone(),
    ));
    let payment_use_cases = PaymentUseCases::new(
        repo,
        session_use_cases.clone(),
        tokens,
        Arc::new(providers),
        config.provider_timeout,
    );
    let key_exchange_use_cases = KeyExchangeUseCases::new(dh_parameters);

    Ok(AppState {
        config: Arc::new(config),
        session_use_cases,
        payment_use_cases: Arc::new(payment_use_cases),
        key_exchange_use_cases: Arc::new(key_exchange_use_cases),
    })
}

fn stripe_adapter(
    stripe: &StripeConfig,
    timeout: std::time::Duration,
) -> Result<StripePaymentAdapter, InfraError> {
    let client = match &stripe.secret_key {
        Some(key) => {
            let http = try_build_client(timeout).map_err(InfraError::HttpClient)?;
            Some(StripeClient::new(http, key.clone(), stripe.api_base.clone()))
        }
        None => None,
    };
    Ok(StripePaymentAdapter::new(
        client,
        stripe.mode,
        stripe.currency.clone(),
        stripe.payment_method.clone(),
    ))
}

/// Parses decimal `DH_PRIME` / `DH_GENERATOR` values and validates the group.
pub fn parse_dh_parameters(p: &str, g: &str) -> Result<DhParameters, InfraError> {
    let parse = |var: &'static str, value: &str| {
        value
            .trim()
            .parse::<BigUint>()
            .map_err(|_| InfraError::ConfigInvalid {
                var,
                reason: "must be a non-negative decimal integer".into(),
            })
    };
    DhParameters::new(parse("DH_PRIME", p)?, parse("DH_GENERATOR", g)?).map_err(|e| {
        InfraError::ConfigInvalid {
            var: "DH_PRIME",
            reason: e.to_string(),
        }
    })
}

pub fn init_tracing(log_file: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tierpass=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs); skipped when the file cannot be created
    let json_layer = File::create(log_file).ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
