//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Builds the HTTP client used for hop fetches.
///
/// Automatic redirect following is disabled so the resolver can vet and
/// record every hop itself. Only the connect timeout is set here; the
/// per-request timeout is enforced by the resolver, where it also covers
/// response-header latency and can cancel the in-flight request.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()
}
