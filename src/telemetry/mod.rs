//! 诊断日志接收器：错误日志与请求追踪的可注入输出端。
//!
//! Diagnostic log sinks.
//!
//! The client holds two optional sinks: one for error diagnostics and one for
//! request tracing. Both receive pre-formatted lines. A client without a sink
//! simply skips the write; absence is never an error.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`LogSink`] | Trait for line-oriented diagnostic destinations |
//! | [`NoopLogSink`] | Discards everything |
//! | [`TracingSink`] | Forwards lines to `tracing` at a fixed level |
//! | [`InMemoryLogSink`] | Captures lines, mostly for tests |

use std::sync::{Arc, RwLock};

/// Destination for diagnostic lines.
///
/// Implementations must tolerate concurrent writes from multiple requests.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// No-op sink.
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn write_line(&self, _: &str) {}
}

pub fn noop_sink() -> Arc<dyn LogSink> {
    Arc::new(NoopLogSink)
}

/// Level used by [`TracingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkLevel {
    Error,
    Trace,
}

/// Forwards every line to the `tracing` subscriber.
pub struct TracingSink {
    level: SinkLevel,
}

impl TracingSink {
    pub fn new(level: SinkLevel) -> Self {
        Self { level }
    }

    pub fn error() -> Arc<dyn LogSink> {
        Arc::new(Self::new(SinkLevel::Error))
    }

    pub fn trace() -> Arc<dyn LogSink> {
        Arc::new(Self::new(SinkLevel::Trace))
    }
}

impl LogSink for TracingSink {
    fn write_line(&self, line: &str) {
        let line = line.trim_end();
        match self.level {
            SinkLevel::Error => tracing::error!(target: "infinity_client", "{}", line),
            SinkLevel::Trace => tracing::trace!(target: "infinity_client", "{}", line),
        }
    }
}

/// In-memory sink.
#[derive(Default)]
pub struct InMemoryLogSink {
    lines: RwLock<Vec<String>>,
}

impl InMemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.read().map(|l| l.clone()).unwrap_or_default()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .read()
            .map(|l| l.iter().any(|line| line.contains(needle)))
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.write() {
            lines.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for InMemoryLogSink {
    fn write_line(&self, line: &str) {
        if let Ok(mut lines) = self.lines.write() {
            lines.push(line.to_string());
        }
    }
}
