//! Typed response schemas.

pub mod response;

pub use response::{Common, QueryResponse, QueryResults, UploadResponse, UploadResults};
