//! 错误标识：客户端报告的机器可读错误 ID。
//!
//! Error identifiers reported by the client.
//!
//! Every failure the client classifies itself carries one of these ids. The
//! string forms are stable and match the ids the Infinity service documents,
//! so they can be logged, serialized, and compared across tools.
//!
//! | Id                    | Raised when                                   |
//! |-----------------------|-----------------------------------------------|
//! | `missing_credentials` | no API key, or an empty one, was configured   |
//! | `bad_url`             | the base URL scheme is not `http` or `https`  |
//! | `missing_arg`         | a required operation argument is empty        |
//! | `http_error`          | the service answered outside `200..=299`      |
//!
//! ## Example
//!
//! ```rust
//! use infinity_client::error_code::ErrorId;
//!
//! let id: ErrorId = "bad_url".parse().unwrap();
//! assert_eq!(id, ErrorId::BadUrl);
//! assert_eq!(id.as_str(), "bad_url");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machine-readable error identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorId {
    /// No API key, or an empty one
    MissingCredentials,
    /// Base URL with a scheme other than http/https
    BadUrl,
    /// Required argument absent or empty
    MissingArg,
    /// Non-2xx status from the service
    HttpError,
}

impl ErrorId {
    /// Returns the wire id (e.g., `"missing_arg"`).
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::BadUrl => "bad_url",
            Self::MissingArg => "missing_arg",
            Self::HttpError => "http_error",
        }
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an id string that is not one of the known ids.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error id: {0}")]
pub struct UnknownErrorId(pub String);

impl FromStr for ErrorId {
    type Err = UnknownErrorId;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "missing_credentials" => Ok(Self::MissingCredentials),
            "bad_url" => Ok(Self::BadUrl),
            "missing_arg" => Ok(Self::MissingArg),
            "http_error" => Ok(Self::HttpError),
            other => Err(UnknownErrorId(other.to_string())),
        }
    }
}
