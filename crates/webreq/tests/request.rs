//! Request-object representation through `reqwest::blocking`.
#![cfg(feature = "reqwest")]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING};
use webreq::{Error, HttpMethod, Progress, ProgressCallback, RequestSpec};

#[test]
fn test_get_request_object() {
    let mut spec = RequestSpec::get("http://x/y")
        .unwrap()
        .param("a", "1")
        .param("b", "2 2")
        .header("Accept", "text/plain")
        .basic_auth("Aladdin", "open sesame");

    let request = spec.request().unwrap();
    assert_eq!(request.method(), reqwest::Method::GET);
    assert_eq!(request.url().as_str(), "http://x/y?a=1&b=2+2");
    assert_eq!(request.headers()["accept"], "text/plain");
    let auth = &request.headers()[AUTHORIZATION];
    assert!(auth.is_sensitive());
    assert_eq!(auth, "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    assert!(request.body().is_none());
}

#[test]
fn test_post_form_request_object() {
    let mut spec = RequestSpec::post("http://x/login")
        .unwrap()
        .param("user", "alice")
        .param("note", "a&b");

    let request = spec.request().unwrap();
    assert_eq!(request.url().as_str(), "http://x/login");
    assert_eq!(
        request.headers()[CONTENT_TYPE],
        "application/x-www-form-urlencoded"
    );
    let body = request.body().and_then(|b| b.as_bytes()).unwrap();
    assert_eq!(body, b"user=alice&note=a%26b");
}

#[test]
fn test_stream_on_get_is_unsupported() {
    let mut spec = RequestSpec::get("http://x/y").unwrap().body_string("data", None);

    let err = spec.request().unwrap_err();
    assert!(matches!(err, Error::UnsupportedBody { method: HttpMethod::Get }));
    // Rejected before preparation, so the body is still attached.
    assert!(spec.has_body());
}

#[test]
fn test_stream_overrides_params_uniformly() {
    let mut spec = RequestSpec::post("http://x/y")
        .unwrap()
        .param("a", "1")
        .body_string("raw", None);

    let request = spec.request().unwrap();
    assert_eq!(request.url().as_str(), "http://x/y");
    assert!(request.headers().get(CONTENT_TYPE).is_none());
    assert!(request.body().is_some());
    assert!(matches!(spec.request(), Err(Error::BodyConsumed)));
}

#[test]
fn test_user_framing_headers_not_forwarded() {
    let mut spec = RequestSpec::put("http://x/y")
        .unwrap()
        .header("Content-Length", "5")
        .header("Transfer-Encoding", "chunked")
        .body_string("hello world", None);

    let request = spec.request().unwrap();
    assert!(request.headers().get(CONTENT_LENGTH).is_none());
    assert!(request.headers().get(TRANSFER_ENCODING).is_none());
}

#[test]
fn test_invalid_header_rejected() {
    let mut spec = RequestSpec::get("http://x/y").unwrap().header("Bad Name", "v");
    assert!(matches!(spec.request(), Err(Error::Encoding(_))));
}

/// Serves one request, hands its raw bytes back and answers `200 ok`.
fn serve_once() -> (String, mpsc::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = format!("http://{}/upload", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut raw = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            raw.extend_from_slice(line.as_bytes());
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        raw.extend_from_slice(&body);

        let mut stream = stream;
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok")
            .unwrap();
        tx.send(raw).unwrap();
    });

    (address, rx)
}

#[test]
fn test_send_streams_body_with_progress() {
    let (address, rx) = serve_once();
    let reports = Arc::new(AtomicU64::new(0));
    let last = Arc::new(AtomicU64::new(0));
    let (counter, latest) = (Arc::clone(&reports), Arc::clone(&last));
    let callback: ProgressCallback = Arc::new(move |p: &Progress| {
        counter.fetch_add(1, Ordering::SeqCst);
        latest.store(p.bytes_transferred, Ordering::SeqCst);
    });

    let payload = vec![b'q'; 10_000];
    let mut spec = RequestSpec::put(&address)
        .unwrap()
        .header("X-Trace", "t-1")
        .body_bytes(payload.clone(), Some(callback));

    let client = Client::builder().no_proxy().build().unwrap();
    let response = spec.send(&client).unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().unwrap(), "ok");

    let raw = rx.recv().unwrap();
    let text = String::from_utf8_lossy(&raw);
    assert!(text.starts_with("PUT /upload HTTP/1.1\r\n"));
    assert!(text.to_ascii_lowercase().contains("content-length: 10000\r\n"));
    assert!(text.contains("t-1"));
    assert!(raw.ends_with(&payload));

    assert!(reports.load(Ordering::SeqCst) >= 10_000 / 128);
    assert_eq!(last.load(Ordering::SeqCst), 10_000);
}
