//! HTTP transport plumbing: the default `reqwest` client and the wire dumps
//! written to the diagnostic sinks.

mod dump;
mod http;

pub use dump::{dump_request, dump_response};
pub use http::{default_client, HTTP_TIMEOUT_ENV, PROXY_URL_ENV};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
