//! Upload operations against the mock server

use crate::mock_server::{MockServerFixture, TEST_KEY};
use infinity_client::compression::compress_bytes;
use infinity_client::{Error, ErrorId};
use mockito::Matcher;
use flate2::read::GzDecoder;
use std::io::{Read, Write};

fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out).unwrap();
    out
}

#[tokio::test]
async fn test_upload_sends_sized_gzip_body() {
    let mut fixture = MockServerFixture::new().await;
    let expected = compress_bytes(b"hello").unwrap();
    assert_eq!(gunzip(expected.as_bytes()), b"hello");
    let mock = fixture
        .server
        .mock("PUT", "/u/CODE1")
        .match_body(expected.as_bytes().to_vec())
        .match_header("x-iauth", TEST_KEY)
        .match_header("content-type", "application/xgzip")
        .match_header("content-length", expected.len().to_string().as_str())
        .match_header("transfer-encoding", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"CODE1":{"status":"ok","statuscode":1}}"#)
        .create_async()
        .await;

    let results = fixture
        .client()
        .upload("CODE1", &b"hello"[..])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(results["CODE1"].common.status, "ok");

    // the request dump carries headers only
    let trace = &fixture.trace_log;
    assert!(trace.contains("PUT /u/CODE1 HTTP/1.1"));
    assert!(trace.contains("content-type: application/xgzip"));
    let gzip_magic = String::from_utf8_lossy(&expected.as_bytes()[..2]).into_owned();
    for line in trace.lines() {
        assert!(!line.contains(&gzip_magic), "trace leaked the upload body: {line:?}");
        assert!(!line.contains('\u{1f}'));
    }
}

#[tokio::test]
async fn test_upload_escapes_confirmation_code() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("PUT", "/u/A%3FB%23C")
        .with_status(200)
        .with_body(r#"{"k":{"status":"ok"}}"#)
        .create_async()
        .await;

    fixture
        .quiet_client()
        .upload("A?B#C", &b"x"[..])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_file_reads_from_disk() {
    let mut fixture = MockServerFixture::new().await;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"file payload").unwrap();
    let expected = compress_bytes(b"file payload").unwrap();
    let mock = fixture
        .server
        .mock("PUT", "/u/ABC")
        .match_header("content-length", expected.len().to_string().as_str())
        .with_status(200)
        .with_body(r#"{"f":{"status":"ok","statuscode":1,"error":""}}"#)
        .create_async()
        .await;

    let results = fixture
        .quiet_client()
        .upload_file("ABC", file.path())
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(!results["f"].common.has_error());
}

#[tokio::test]
async fn test_upload_without_code_sends_nothing() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.expect_no_requests("PUT").await;

    let err = fixture.client().upload("", &b"data"[..]).await.unwrap_err();
    assert_eq!(err.id(), Some(ErrorId::MissingArg));

    let err = fixture.client().upload_file("", "/tmp/whatever").await.unwrap_err();
    assert_eq!(err.id(), Some(ErrorId::MissingArg));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_file_without_path_sends_nothing() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.expect_no_requests("PUT").await;

    let err = fixture.client().upload_file("CODE", "").await.unwrap_err();
    assert_eq!(err.id(), Some(ErrorId::MissingArg));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_file_open_error_is_propagated() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.expect_no_requests("PUT").await;
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.bin");

    let err = fixture
        .client()
        .upload_file("CODE", &missing)
        .await
        .unwrap_err();

    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected I/O error, got {other:?}"),
    }
    mock.assert_async().await;
}
