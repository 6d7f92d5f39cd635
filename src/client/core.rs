use crate::telemetry::LogSink;
use std::fmt;
use std::sync::Arc;

/// Well-known endpoint used when no base URL is configured.
pub const DEFAULT_URL: &str = "https://api.cylance.com/apiv2/";
/// Header carrying the API key.
pub const AUTH_HEADER: &str = "X-IAUTH";
/// Content type of compressed upload bodies.
pub const GZIP_CONTENT_TYPE: &str = "application/xgzip";

/// Client for the Infinity API.
///
/// Immutable once built. Cloning is cheap and clones share the underlying
/// transport, so one client can serve concurrent callers without locking.
#[derive(Clone)]
pub struct Client {
    pub(crate) key: String,
    pub(crate) url: String,
    pub(crate) http: reqwest::Client,
    pub(crate) error_log: Option<Arc<dyn LogSink>>,
    pub(crate) trace_log: Option<Arc<dyn LogSink>>,
}

impl Client {
    /// Base URL, always ending with `/`.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_trace_log(&self) -> bool {
        self.trace_log.is_some()
    }

    pub fn has_error_log(&self) -> bool {
        self.error_log.is_some()
    }

    pub(crate) fn errorf(&self, line: &str) {
        if let Some(sink) = &self.error_log {
            sink.write_line(line);
        }
    }

    pub(crate) fn tracef(&self, line: &str) {
        if let Some(sink) = &self.trace_log {
            sink.write_line(line);
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("error_log", &self.error_log.is_some())
            .field("trace_log", &self.trace_log.is_some())
            .finish()
    }
}
