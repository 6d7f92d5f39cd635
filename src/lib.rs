//! # infinity-client
//!
//! Infinity 信誉查询与文件提交 API 的客户端库。
//!
//! Client library for the Infinity reputation lookup and file submission API.
//!
//! Callers query reputation scores for content hashes, and upload files for
//! analysis using a confirmation code issued by the service.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use infinity_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> infinity_client::Result<()> {
//!     let client = Client::builder().key("your-api-key").build()?;
//!
//!     let results = client.query("", &["44d88612fea8a8f36de82e1278abb02f"]).await?;
//!     for (hash, r) in &results {
//!         println!("{hash}: {} ({})", r.general_score, r.common.status);
//!     }
//!
//!     if let Some(code) = results.values().find_map(|r| r.confirm_code()) {
//!         client.upload_file(code, "sample.bin").await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client construction, request execution and operations |
//! | [`compression`] | Gzip buffering for upload bodies |
//! | [`types`] | Response schemas |
//! | [`telemetry`] | Diagnostic log sinks |
//! | [`transport`] | Default HTTP transport and wire dumps |
//! | [`error_code`] | Error identifiers |

pub mod client;
pub mod compression;
pub mod error_code;
pub mod telemetry;
pub mod transport;
pub mod types;

pub use client::{Client, ClientBuilder, ClientOption, DEFAULT_URL};
pub use error_code::ErrorId;
pub use telemetry::{InMemoryLogSink, LogSink, TracingSink};
pub use types::{Common, QueryResponse, QueryResults, UploadResponse, UploadResults};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{ApiError, Error};
