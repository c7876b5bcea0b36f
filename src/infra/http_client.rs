//! HTTP client factory with consistent timeout configuration.
//!
//! Outbound clients must be built here rather than with `reqwest::Client`
//! directly so every provider call is bounded.

use reqwest::Client;
use std::time::Duration;

/// Connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build a client whose whole request/response exchange is capped at
/// `request_timeout`. The connect timeout never exceeds it.
pub fn try_build_client(request_timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(request_timeout))
        .timeout(request_timeout)
        .build()
}
