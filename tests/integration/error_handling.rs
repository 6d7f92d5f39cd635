//! HTTP error classification

use crate::mock_server::MockServerFixture;
use infinity_client::{Client, ErrorId, InMemoryLogSink};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_non_success_statuses_are_http_errors() {
    for status in [400usize, 401, 403, 404, 500, 503] {
        let mut fixture = MockServerFixture::new().await;
        let _mock = fixture.mock_status("GET", status, r#"{"error":"nope"}"#).await;

        let err = fixture.client().query("", &["abc"]).await.unwrap_err();

        let api = err.api().expect("classified error");
        assert_eq!(api.id, ErrorId::HttpError);
        assert_eq!(api.status(), Some(status as u16));
        assert!(
            api.details.contains(&status.to_string()),
            "details {:?} should mention {}",
            api.details,
            status
        );
    }
}

#[tokio::test]
async fn test_http_error_details_include_reason_phrase() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_status("PUT", 404, "").await;

    let err = fixture
        .client()
        .upload("CODE", &b"x"[..])
        .await
        .unwrap_err();

    assert_eq!(err.details(), "Unexpected status code: 404 (Not Found)");
    assert_eq!(err.to_string(), "http_error: Unexpected status code: 404 (Not Found)");
}

#[tokio::test]
async fn test_http_error_dumps_response_to_error_log() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_status("GET", 500, r#"{"error":"internal"}"#)
        .await;

    let _ = fixture.client().query("", &["abc"]).await.unwrap_err();

    assert!(fixture.error_log.contains("HTTP/1.1 500 Internal Server Error"));
    assert!(fixture.error_log.contains(r#"{"error":"internal"}"#));
    assert!(fixture.error_log.contains("Unexpected status code: 500"));
    // the trace sink sees the response regardless of outcome
    assert!(fixture.trace_log.contains("HTTP/1.1 500 Internal Server Error"));
}

#[tokio::test]
async fn test_quiet_client_still_returns_errors() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_status("GET", 502, "").await;

    let err = fixture.quiet_client().query("", &["abc"]).await.unwrap_err();
    assert_eq!(err.id(), Some(ErrorId::HttpError));
}

#[tokio::test]
async fn test_truncated_error_body_is_still_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = vec![0u8; 4096];
        let _ = socket.read(&mut head).await;
        // promises 100 bytes, sends 5, then closes
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .unwrap();
    });

    let error_log = Arc::new(InMemoryLogSink::new());
    let client = Client::builder()
        .http_client(reqwest::Client::new())
        .url(format!("http://{}", addr))
        .key("k")
        .error_log(error_log.clone())
        .build()
        .unwrap();

    let err = client.query("", &["abc"]).await.unwrap_err();

    let api = err.api().expect("classified error");
    assert_eq!(api.id, ErrorId::HttpError);
    assert_eq!(api.status(), Some(500));
    assert!(error_log.contains("Unexpected status code: 500 (Internal Server Error)"));
    server.await.unwrap();
}
