//! Mock HTTP server setup for integration tests

use infinity_client::{Client, InMemoryLogSink, LogSink};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;

pub const TEST_KEY: &str = "test-key";

/// Test fixture that manages a mock server and the sinks of its client
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
    pub error_log: Arc<InMemoryLogSink>,
    pub trace_log: Arc<InMemoryLogSink>,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server,
            base_url,
            error_log: Arc::new(InMemoryLogSink::new()),
            trace_log: Arc::new(InMemoryLogSink::new()),
        }
    }

    /// Client pointed at the mock server, with both sinks attached.
    pub fn client(&self) -> Client {
        let error_log: Arc<dyn LogSink> = self.error_log.clone();
        let trace_log: Arc<dyn LogSink> = self.trace_log.clone();
        Client::builder()
            .http_client(reqwest::Client::new())
            .url(self.base_url.as_str())
            .key(TEST_KEY)
            .error_log(error_log)
            .trace_log(trace_log)
            .build()
            .expect("client")
    }

    /// Client without any sinks.
    pub fn quiet_client(&self) -> Client {
        Client::builder()
            .http_client(reqwest::Client::new())
            .url(self.base_url.as_str())
            .key(TEST_KEY)
            .build()
            .expect("client")
    }

    /// Mock a successful query for the given classifiers and joined hashes.
    pub async fn mock_query(&mut self, classifiers: &str, hashes: &str, body: &str) -> Mock {
        self.server
            .mock("GET", "/q")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("c".into(), classifiers.into()),
                Matcher::UrlEncoded("h".into(), hashes.into()),
            ]))
            .match_header("x-iauth", TEST_KEY)
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock any request with the given status and body.
    pub async fn mock_status(&mut self, method: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock that fails the test if any `method` request reaches the server.
    pub async fn expect_no_requests(&mut self, method: &str) -> Mock {
        self.server
            .mock(method, Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }
}
