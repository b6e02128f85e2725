// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServiceAccountKey;
use crate::errors::{HandlerError, HandlerResult};
use crate::pipeline::request::ExtractionRequest;
use crate::pipeline::types::{ExtractionResult, OutputRecord};
use crate::traits::{DocumentExtractor, ObjectBody, ObjectStore};

/// An extractor that returns fixed text and remembers every request it saw
pub struct StubExtractor {
    pub text: String,
    requests: Mutex<Vec<ExtractionRequest>>,
}

impl StubExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ExtractionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentExtractor for StubExtractor {
    async fn process(
        &self,
        _credentials: &ServiceAccountKey,
        request: &ExtractionRequest,
    ) -> HandlerResult<ExtractionResult> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(ExtractionResult {
            text: self.text.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// An extractor that always fails for testing failure scenarios
pub struct FailingExtractor;

#[async_trait]
impl DocumentExtractor for FailingExtractor {
    async fn process(
        &self,
        _credentials: &ServiceAccountKey,
        _request: &ExtractionRequest,
    ) -> HandlerResult<ExtractionResult> {
        Err(HandlerError::ExtractionService(
            "Simulated extraction failure".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// A store whose object bodies break partway through the stream
pub struct BrokenStreamStore;

#[async_trait]
impl ObjectStore for BrokenStreamStore {
    async fn get_object(&self, _bucket: &str, _key: &str) -> HandlerResult<ObjectBody> {
        let chunks: Vec<std::io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"%PDF-1.7")),
            Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "body truncated",
            )),
        ];
        Ok(stream::iter(chunks).boxed())
    }

    async fn put_object(&self, bucket: &str, record: &OutputRecord) -> HandlerResult<()> {
        Err(HandlerError::StorageWrite {
            bucket: bucket.to_string(),
            key: record.key.clone(),
            reason: "read-only test store".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "broken_stream"
    }
}

/// RSA key that signs token assertions in tests; never used outside them
pub const TEST_PRIVATE_KEY_PEM: &str =
    include_str!("../../tests/fixtures/service_account_test_key.pem");

/// A service-account key whose token exchange goes to `token_uri`
pub fn test_service_account(token_uri: &str) -> ServiceAccountKey {
    ServiceAccountKey::from_json(
        &serde_json::json!({
            "type": "service_account",
            "project_id": "p",
            "private_key_id": "test-kid",
            "private_key": TEST_PRIVATE_KEY_PEM,
            "client_email": "relay@p.iam.gserviceaccount.com",
            "token_uri": token_uri,
        })
        .to_string(),
    )
    .unwrap()
}

/// A reply served by [`CannedHttpServer`]
#[derive(Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Content-Length to announce instead of the real body length
    pub declared_length: Option<usize>,
}

impl CannedResponse {
    pub fn new(status: u16, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
            declared_length: None,
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(status, "application/json", body.to_string())
    }

    /// Announce more body than is sent, so the client sees the connection drop mid-body
    pub fn truncated(mut self, declared_length: usize) -> Self {
        self.declared_length = Some(declared_length);
        self
    }
}

/// A request as seen by [`CannedHttpServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body_contains(&self, needle: &[u8]) -> bool {
        find(&self.body, needle).is_some()
    }
}

type Route = Arc<dyn Fn(&RecordedRequest) -> CannedResponse + Send + Sync>;

/// A loopback HTTP/1.1 server answering every request through `route`.
///
/// One request per connection; every reply closes the connection.
pub struct CannedHttpServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl CannedHttpServer {
    pub async fn start<F>(route: F) -> Self
    where
        F: Fn(&RecordedRequest) -> CannedResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let route: Route = Arc::new(route);

        let recorded = requests.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let route = route.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move { serve_connection(socket, route, recorded).await });
            }
        });

        Self { base_url, requests }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// A base URL nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}")
}

async fn serve_connection(
    mut socket: TcpStream,
    route: Route,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    let response = route(&request);
    recorded.lock().unwrap().push(request);

    let head = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        response.status,
        reason_phrase(response.status),
        response.content_type,
        response.declared_length.unwrap_or(response.body.len()),
    );
    let _ = socket.write_all(head.as_bytes()).await;
    let _ = socket.write_all(&response.body).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let mut request = RecordedRequest {
        method,
        path,
        headers,
        body: buffer[header_end..].to_vec(),
    };

    let content_length = request
        .header("content-length")
        .and_then(|value| value.parse::<usize>().ok());
    let chunked = request
        .header("transfer-encoding")
        .is_some_and(|value| value.contains("chunked"));

    // chunked bodies are kept in wire form; tests only search them
    loop {
        let complete = match content_length {
            Some(len) => request.body.len() >= len,
            None => !chunked || request.body.ends_with(b"0\r\n\r\n"),
        };
        if complete {
            break;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        request.body.extend_from_slice(&chunk[..n]);
    }

    Some(request)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
