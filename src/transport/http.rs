use super::TransportError;
use crate::Result;
use reqwest::Proxy;
use std::env;
use std::time::Duration;

/// Request timeout override, in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "INFINITY_HTTP_TIMEOUT_SECS";
/// Optional proxy for all requests.
pub const PROXY_URL_ENV: &str = "INFINITY_PROXY_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builds the transport handle used when the caller does not supply one.
///
/// The handle is cheap to clone and safe to share between concurrent calls.
pub fn default_client() -> Result<reqwest::Client> {
    let timeout_secs = env::var(HTTP_TIMEOUT_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("infinity-client/", env!("CARGO_PKG_VERSION")));

    if let Ok(proxy_url) = env::var(PROXY_URL_ENV) {
        match Proxy::all(&proxy_url) {
            Ok(proxy) => builder = builder.proxy(proxy),
            Err(e) => tracing::warn!(proxy = proxy_url.as_str(), error = %e, "ignoring invalid proxy URL"),
        }
    }

    builder
        .build()
        .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))
}
