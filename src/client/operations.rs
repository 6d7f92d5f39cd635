//! Query and upload operations.

use crate::compression;
use crate::error::ApiError;
use crate::types::{QueryResults, UploadResults};
use crate::Result;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncWrite};

use super::core::Client;
use super::execution::{ApiRequest, ResponseSink};

/// Classifier selection used when the caller passes an empty one.
pub const DEFAULT_CLASSIFIERS: &str = "all";

const QUERY_PATH: &str = "q";
const UPLOAD_PATH: &str = "u";

fn query_request<S: AsRef<str>>(classifiers: &str, hashes: &[S]) -> Result<ApiRequest> {
    if hashes.is_empty() {
        return Err(ApiError::missing_arg("hash is required").into());
    }
    let classifiers = if classifiers.is_empty() {
        DEFAULT_CLASSIFIERS
    } else {
        classifiers
    };
    let joined = hashes
        .iter()
        .map(|h| h.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    Ok(ApiRequest::get(QUERY_PATH)
        .param("c", classifiers)
        .param("h", joined))
}

fn check_confirm_code(confirm_code: &str) -> Result<()> {
    if confirm_code.is_empty() {
        return Err(ApiError::missing_arg("Confirmation code is required").into());
    }
    Ok(())
}

impl Client {
    /// Looks up the reputation of one or more hashes.
    ///
    /// `classifiers` is one of `none`, `ml`, `industry`, `human` or `all`
    /// (the default when empty); the service validates it. Hashes may be any
    /// mix of MD5, SHA1 and SHA256.
    pub async fn query<S: AsRef<str>>(
        &self,
        classifiers: &str,
        hashes: &[S],
    ) -> Result<QueryResults> {
        let request = query_request(classifiers, hashes)?;
        let mut results = QueryResults::new();
        self.execute(request, ResponseSink::Typed(&mut results))
            .await?;
        Ok(results)
    }

    /// Like [`Client::query`], but copies the response body verbatim to `writer`.
    pub async fn query_raw<S, W>(&self, classifiers: &str, hashes: &[S], writer: &mut W) -> Result<()>
    where
        S: AsRef<str>,
        W: AsyncWrite + Unpin + Send,
    {
        let request = query_request(classifiers, hashes)?;
        self.execute_raw(request, writer).await
    }

    /// Uploads the content of `data` for analysis.
    ///
    /// The confirmation code is sent as one percent-encoded path segment.
    ///
    /// The whole stream is gzip-compressed in memory first, since the service
    /// needs the exact body length up front.
    pub async fn upload<R>(&self, confirm_code: &str, data: R) -> Result<UploadResults>
    where
        R: AsyncRead + Unpin,
    {
        check_confirm_code(confirm_code)?;
        let body = compression::compress(data).await?;
        let request = ApiRequest::put(UPLOAD_PATH).segment(confirm_code).body(body);
        let mut results = UploadResults::new();
        self.execute(request, ResponseSink::Typed(&mut results))
            .await?;
        Ok(results)
    }

    /// Uploads the file at `path`. Open errors are returned unchanged.
    pub async fn upload_file(
        &self,
        confirm_code: &str,
        path: impl AsRef<Path>,
    ) -> Result<UploadResults> {
        check_confirm_code(confirm_code)?;
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ApiError::missing_arg("Data is required").into());
        }
        let file = tokio::fs::File::open(path).await?;
        // The handle is dropped when the upload returns, successful or not.
        self.upload(confirm_code, file).await
    }
}
