//! Client construction.
//!
//! A client is built by applying configuration options, in order, to a
//! default [`ClientConfig`]. Each option may reject the whole construction;
//! the first error stops it. Options are plain boxed closures, so callers can
//! write their own alongside the provided `set_*` functions.

use super::core::{Client, DEFAULT_URL};
use crate::error::ApiError;
use crate::telemetry::LogSink;
use crate::Result;
use std::sync::Arc;

/// A single configuration step.
pub type ClientOption = Box<dyn FnOnce(&mut ClientConfig) -> Result<()> + Send>;

/// Mutable configuration the options are applied to.
pub struct ClientConfig {
    key: String,
    url: String,
    http: Option<reqwest::Client>,
    error_log: Option<Arc<dyn LogSink>>,
    trace_log: Option<Arc<dyn LogSink>>,
}

impl ClientConfig {
    fn errorf(&self, line: &str) {
        if let Some(sink) = &self.error_log {
            sink.write_line(line);
        }
    }

    fn tracef(&self, line: &str) {
        if let Some(sink) = &self.trace_log {
            sink.write_line(line);
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            url: DEFAULT_URL.to_string(),
            http: None,
            error_log: None,
            trace_log: None,
        }
    }
}

/// Sets the API key. An empty key fails with `missing_credentials`.
pub fn set_key(key: impl Into<String>) -> ClientOption {
    let key = key.into();
    Box::new(move |c: &mut ClientConfig| {
        if key.is_empty() {
            let err = ApiError::missing_credentials();
            c.errorf(&err.to_string());
            return Err(err.into());
        }
        c.key = key;
        Ok(())
    })
}

/// Sets the base URL. An empty URL selects [`DEFAULT_URL`].
///
/// Fails with the parse error for a malformed URL and with `bad_url` for any
/// scheme other than `http`/`https`. The stored URL always ends with `/`.
pub fn set_url(raw_url: impl Into<String>) -> ClientOption {
    let raw_url = raw_url.into();
    Box::new(move |c: &mut ClientConfig| {
        let raw_url = if raw_url.is_empty() {
            DEFAULT_URL.to_string()
        } else {
            raw_url
        };
        let parsed = match url::Url::parse(&raw_url) {
            Ok(u) => u,
            Err(e) => {
                c.errorf(&format!("Invalid URL [{}] - {}", raw_url, e));
                return Err(e.into());
            }
        };
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            let err = ApiError::bad_url(format!("Invalid schema specified [{}]", raw_url));
            c.errorf(&err.to_string());
            return Err(err.into());
        }
        c.url = normalize_base_url(raw_url);
        Ok(())
    })
}

/// Sets the transport handle. `None` selects the default transport.
pub fn set_http_client(http: Option<reqwest::Client>) -> ClientOption {
    Box::new(move |c: &mut ClientConfig| {
        c.http = http;
        Ok(())
    })
}

/// Sets the sink for error diagnostics. `None` disables it.
pub fn set_error_log(sink: Option<Arc<dyn LogSink>>) -> ClientOption {
    Box::new(move |c: &mut ClientConfig| {
        c.error_log = sink;
        Ok(())
    })
}

/// Sets the sink for request/response traces. `None` disables it.
pub fn set_trace_log(sink: Option<Arc<dyn LogSink>>) -> ClientOption {
    Box::new(move |c: &mut ClientConfig| {
        c.trace_log = sink;
        Ok(())
    })
}

pub(crate) fn normalize_base_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

impl Client {
    /// Builds a client from an ordered list of options.
    ///
    /// ```rust,no_run
    /// use infinity_client::client::{set_key, set_url};
    /// use infinity_client::Client;
    ///
    /// # fn main() -> infinity_client::Result<()> {
    /// let client = Client::new(vec![
    ///     set_key("some key"),
    ///     set_url("https://some.url.com:8443/"),
    /// ])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let mut config = ClientConfig::default();
        for option in options {
            option(&mut config)?;
        }
        config.tracef(&format!("Using URL [{}]", config.url));

        if config.key.is_empty() {
            config.errorf("Missing credentials");
            return Err(ApiError::missing_credentials().into());
        }

        let http = match config.http {
            Some(http) => http,
            None => crate::transport::default_client()?,
        };

        Ok(Client {
            key: config.key,
            url: config.url,
            http,
            error_log: config.error_log,
            trace_log: config.trace_log,
        })
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

/// Fluent front end over the option functions.
///
/// Each call queues one option; `build` applies them in call order.
#[derive(Default)]
pub struct ClientBuilder {
    options: Vec<ClientOption>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(self, key: impl Into<String>) -> Self {
        self.option(set_key(key))
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        self.option(set_url(url))
    }

    pub fn http_client(self, http: reqwest::Client) -> Self {
        self.option(set_http_client(Some(http)))
    }

    pub fn error_log(self, sink: Arc<dyn LogSink>) -> Self {
        self.option(set_error_log(Some(sink)))
    }

    pub fn trace_log(self, sink: Arc<dyn LogSink>) -> Self {
        self.option(set_trace_log(Some(sink)))
    }

    /// Queue an arbitrary option.
    pub fn option(mut self, option: ClientOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn build(self) -> Result<Client> {
        Client::new(self.options)
    }
}
