//! Text renderings of outgoing requests and incoming responses, in the
//! familiar HTTP/1.1 message layout.

use crate::client::AUTH_HEADER;
use reqwest::header::HeaderMap;
use std::fmt::Write;

const REDACTED: &str = "<redacted>";

/// Renders the request line and headers. The body is never included.
pub fn dump_request(request: &reqwest::Request) -> String {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} {} HTTP/1.1\r", request.method(), target);
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = writeln!(out, "Host: {}:{}\r", host, port);
            }
            None => {
                let _ = writeln!(out, "Host: {}\r", host);
            }
        }
    }
    write_headers(&mut out, request.headers());
    out.push_str("\r\n");
    out
}

/// Renders the status line, headers and body of a response whose body has
/// already been read.
pub fn dump_response(status: reqwest::StatusCode, headers: &HeaderMap, body: &[u8]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "HTTP/1.1 {} {}\r",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );
    write_headers(&mut out, headers);
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let value = if name.as_str().eq_ignore_ascii_case(AUTH_HEADER) {
            REDACTED
        } else {
            value.to_str().unwrap_or("<binary>")
        };
        let _ = writeln!(out, "{}: {}\r", name, value);
    }
}
