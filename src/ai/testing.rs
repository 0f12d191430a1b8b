//! Test doubles for the provider seam.
//!
//! - [`MockServer`]: canned HTTP/1.1 responder on a local port, recording
//!   every request it receives
//! - [`RecordingProvider`]: in-process [`CompletionProvider`] with a scripted
//!   reply

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use super::provider::{ChatRequest, CompletionProvider, FragmentStream};
use crate::types::{AiError, Result};

// =============================================================================
// Mock HTTP server
// =============================================================================

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    content_type: &'static str,
    body: Body,
}

#[derive(Debug, Clone)]
enum Body {
    Full(String),
    /// Sent with chunked transfer encoding, one write per entry
    Chunked(Vec<String>),
}

impl MockResponse {
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: Body::Full(value.to_string()),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: Body::Full(body.to_string()),
        }
    }

    pub fn event_stream(chunks: Vec<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/event-stream",
            body: Body::Chunked(chunks),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serves the queued responses in order, one per connection
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockServer {
    pub async fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::new(Mutex::new(VecDeque::from(responses)));

        let captured = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let captured = Arc::clone(&captured);
                let queue = Arc::clone(&queue);
                tokio::spawn(async move {
                    serve(socket, captured, queue).await;
                });
            }
        });

        Self { addr, requests }
    }

    /// API base pointing at this server
    pub fn url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve(
    mut socket: TcpStream,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    queue: Arc<Mutex<VecDeque<MockResponse>>>,
) {
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    captured.lock().unwrap().push(request);

    let response = queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| MockResponse::text(500, "no response queued"));
    let reason = reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");

    match response.body {
        Body::Full(body) => {
            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                response.status,
                reason,
                response.content_type,
                body.len()
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body.as_bytes()).await;
        }
        Body::Chunked(chunks) => {
            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
                response.status, reason, response.content_type
            );
            let _ = socket.write_all(head.as_bytes()).await;
            for chunk in chunks {
                let frame = format!("{:x}\r\n{}\r\n", chunk.len(), chunk);
                if socket.write_all(frame.as_bytes()).await.is_err() {
                    return;
                }
                let _ = socket.flush().await;
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
            let _ = socket.write_all(b"0\r\n\r\n").await;
        }
    }
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    let body_end = buffer.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buffer[header_end..body_end]).into_owned();

    Some(CapturedRequest {
        method,
        path,
        headers,
        body,
    })
}

// =============================================================================
// Recording provider
// =============================================================================

/// Provider double that records requests and answers from a script
pub struct RecordingProvider {
    reply: std::result::Result<Option<String>, AiError>,
    configured: bool,
    requests: Mutex<Vec<ChatRequest>>,
}

impl RecordingProvider {
    pub fn replying(text: &str) -> Self {
        Self::scripted(Ok(Some(text.to_string())))
    }

    /// Answers without any choice
    pub fn empty() -> Self {
        Self::scripted(Ok(None))
    }

    pub fn failing(error: AiError) -> Self {
        Self::scripted(Err(error))
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::failing(AiError::not_configured("recording"))
        }
    }

    fn scripted(reply: std::result::Result<Option<String>, AiError>) -> Self {
        Self {
            reply,
            configured: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ChatRequest {
        self.requests().pop().unwrap()
    }
}

#[async_trait]
impl CompletionProvider for RecordingProvider {
    async fn complete(&self, request: ChatRequest) -> Result<Option<String>> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map_err(Into::into)
    }

    async fn stream(&self, request: ChatRequest) -> Result<FragmentStream> {
        self.requests.lock().unwrap().push(request);
        let text = self.reply.clone()?.unwrap_or_default();

        // three-character fragments, cut on char boundaries
        let chars: Vec<char> = text.chars().collect();
        let fragments: Vec<Result<String>> = chars
            .chunks(3)
            .map(|chunk| Ok(chunk.iter().collect()))
            .collect();
        Ok(Box::pin(futures::stream::iter(fragments)))
    }

    fn name(&self) -> &str {
        "recording"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
