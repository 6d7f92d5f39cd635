use crate::error_code::ErrorId;
use crate::transport::TransportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A classified client error: a machine-readable id plus human-readable details.
///
/// Used both for local validation failures and for non-2xx responses from the
/// service. Serializes as `{"id": "...", "details": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{id}: {details}")]
pub struct ApiError {
    pub id: ErrorId,
    pub details: String,
    /// HTTP status code, set only for `http_error`
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(id: ErrorId, details: impl Into<String>) -> Self {
        Self {
            id,
            details: details.into(),
            status: None,
        }
    }

    pub fn missing_credentials() -> Self {
        Self::new(
            ErrorId::MissingCredentials,
            "You must provide the Infinity API key",
        )
    }

    pub fn missing_arg(details: impl Into<String>) -> Self {
        Self::new(ErrorId::MissingArg, details)
    }

    pub fn bad_url(details: impl Into<String>) -> Self {
        Self::new(ErrorId::BadUrl, details)
    }

    /// Builds an `http_error` whose details name the code and its reason phrase.
    pub fn http_status(status: reqwest::StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("");
        Self {
            id: ErrorId::HttpError,
            details: format!("Unexpected status code: {} ({})", status.as_u16(), reason),
            status: Some(status.as_u16()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Unified error type for the Infinity client.
///
/// `Api` carries the errors the client classifies itself. The remaining
/// variants pass underlying failures through unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// The classified error, if this is one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// The error id, if this is a classified error.
    pub fn id(&self) -> Option<ErrorId> {
        self.api().map(|e| e.id)
    }

    /// Details text for display at the boundary.
    pub fn details(&self) -> String {
        match self {
            Error::Api(e) => e.details.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(TransportError::Http(e))
    }
}
