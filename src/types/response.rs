//! Response bodies returned by the Infinity service.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Envelope present in every decoded response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Common {
    /// Status text reported by the service
    #[serde(default)]
    pub status: String,
    /// Numeric status reported by the service (not the HTTP status)
    #[serde(rename = "statuscode", default)]
    pub status_code: f64,
    /// Error reason, empty on success
    #[serde(default)]
    pub error: String,
}

impl Common {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Reputation for one queried hash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(flatten)]
    pub common: Common,
    #[serde(rename = "generalscore", default)]
    pub general_score: f64,
    /// Present when the service wants the file itself to produce an answer
    #[serde(
        rename = "confirmcode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub confirm_code: Option<String>,
    /// Score per classifier, when classifiers were requested
    #[serde(default)]
    pub classifiers: HashMap<String, f64>,
}

impl QueryResponse {
    /// The confirmation code, treating an empty string as absent.
    pub fn confirm_code(&self) -> Option<&str> {
        self.confirm_code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Result of an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub common: Common,
}

/// Query results keyed by the hash they answer.
pub type QueryResults = BTreeMap<String, QueryResponse>;

/// Upload results keyed by the identifier the service assigns.
pub type UploadResults = BTreeMap<String, UploadResponse>;
