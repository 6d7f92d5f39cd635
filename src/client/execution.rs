//! 请求执行：单次带认证的请求/响应周期。
//!
//! Request execution: one authenticated request/response cycle.

use crate::compression::CompressedBody;
use crate::error::ApiError;
use crate::transport::{dump_request, dump_response};
use crate::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Instant;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::core::{Client, AUTH_HEADER, GZIP_CONTENT_TYPE};

/// One request against a path relative to the client's base URL.
#[derive(Debug)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) segments: Vec<String>,
    pub(crate) params: BTreeMap<String, String>,
    pub(crate) body: Option<CompressedBody>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            params: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Append a path segment. Reserved characters are percent-encoded.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Attach a compressed body. Its length is sent as `Content-Length`.
    pub fn body(mut self, body: CompressedBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Where a successful response body goes.
///
/// `T` is only used by `Typed`. For raw output prefer
/// [`Client::execute_raw`], which needs no type annotation.
pub enum ResponseSink<'a, T> {
    /// Copy the body verbatim.
    Raw(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Decode the body as JSON into the target.
    Typed(&'a mut T),
}

impl Client {
    /// Absolute URL for a request: base URL, relative path, encoded
    /// segments, then the query string.
    pub(crate) fn request_url(&self, request: &ApiRequest) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!("{}{}", self.url, request.path))?;
        if !request.segments.is_empty() {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::bad_url(format!("URL cannot take a path [{}]", self.url)))?;
            segments.pop_if_empty().extend(request.segments.iter());
        }
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.params.iter());
        }
        Ok(url)
    }

    /// Executes `request` and copies a successful body verbatim to `writer`.
    pub async fn execute_raw(
        &self,
        request: ApiRequest,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<()> {
        self.execute::<serde_json::Value>(request, ResponseSink::Raw(writer))
            .await
    }

    /// Executes `request` and delivers the body to `sink`.
    ///
    /// Statuses outside `200..=299` fail with `http_error`. JSON decode
    /// failures are returned as-is.
    pub async fn execute<T>(&self, request: ApiRequest, sink: ResponseSink<'_, T>) -> Result<()>
    where
        T: DeserializeOwned,
    {
        let url = self.request_url(&request)?;
        let ApiRequest { method, path, body, .. } = request;

        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(AUTH_HEADER, self.key.as_str());
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, GZIP_CONTENT_TYPE)
                .header(CONTENT_LENGTH, body.len().to_string())
                .body(body.into_bytes());
        }
        let http_request = builder.build()?;

        let tracing_enabled = self.trace_log.is_some();
        if tracing_enabled {
            self.tracef(&dump_request(&http_request));
            self.tracef(&format!("Start request {}", path));
        }
        let start = Instant::now();
        let sent = self.http.execute(http_request).await;
        let elapsed = start.elapsed();
        if tracing_enabled {
            self.tracef(&format!("End request {} - took {:?}", path, elapsed));
        }
        debug!(
            path = path.as_str(),
            duration_ms = elapsed.as_millis() as u64,
            ok = sent.is_ok(),
            "infinity request finished"
        );
        let response = sent?;

        // Reading the body consumes the response, so the connection is
        // released on every path below.
        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            // The status alone decides the outcome; the body is only dumped.
            let bytes = response.bytes().await.unwrap_or_default();
            if tracing_enabled || self.error_log.is_some() {
                let dump = dump_response(status, &headers, &bytes);
                self.tracef(&dump);
                self.errorf(&dump);
            }
            let err = ApiError::http_status(status);
            self.errorf(&err.details);
            return Err(err.into());
        }

        let bytes = response.bytes().await?;
        if tracing_enabled {
            self.tracef(&dump_response(status, &headers, &bytes));
        }

        match sink {
            ResponseSink::Raw(writer) => {
                writer.write_all(&bytes).await?;
                writer.flush().await?;
            }
            ResponseSink::Typed(target) => match serde_json::from_slice::<T>(&bytes) {
                Ok(value) => *target = value,
                Err(e) => {
                    if self.error_log.is_some() {
                        self.errorf(&dump_response(status, &headers, &bytes));
                    }
                    return Err(Error::Serialization(e));
                }
            },
        }
        Ok(())
    }
}
