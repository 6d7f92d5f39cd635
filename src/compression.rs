//! Gzip buffering for upload bodies.
//!
//! The upload endpoint only accepts bodies with a known `Content-Length`, so
//! the whole input is compressed into memory before the request is sent.
//! Uploaded artifacts are expected to be bounded in size.

use crate::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use tokio::io::{AsyncRead, AsyncReadExt};

const READ_CHUNK: usize = 64 * 1024;

/// A finalized gzip payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBody {
    bytes: Vec<u8>,
}

impl CompressedBody {
    /// Exact byte count of the finalized payload.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Compresses everything `reader` yields into a single gzip member.
pub async fn compress<R>(mut reader: R) -> Result<CompressedBody>
where
    R: AsyncRead + Unpin,
{
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        encoder.write_all(&chunk[..n])?;
    }
    // The trailer is only written by finish(); the length is final after it.
    let bytes = encoder.finish()?;
    Ok(CompressedBody { bytes })
}

/// Synchronous variant for in-memory input.
pub fn compress_bytes(data: &[u8]) -> Result<CompressedBody> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let bytes = encoder.finish()?;
    Ok(CompressedBody { bytes })
}
