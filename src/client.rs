//! Infinity API client.
//!
//! Construction lives in `builder`, the request/response cycle in
//! `execution`, and the public operations in `operations`.

pub mod builder;
pub mod core;
pub mod execution;
mod operations;

pub use builder::{
    set_error_log, set_http_client, set_key, set_trace_log, set_url, ClientBuilder, ClientConfig,
    ClientOption,
};
pub use self::core::{Client, AUTH_HEADER, DEFAULT_URL, GZIP_CONTENT_TYPE};
pub use execution::{ApiRequest, ResponseSink};
pub use operations::DEFAULT_CLASSIFIERS;
