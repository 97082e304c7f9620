//! In-process HTTP server standing in for the GitHub API in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex as TokioMutex;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub(crate) struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

#[derive(Debug, Clone)]
pub(crate) enum MockOutcome {
    DropConnection,
    Respond { status: u16, body: String },
}

impl MockOutcome {
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Self::Respond {
            status,
            body: body.into(),
        }
    }
}

type Responder = Arc<dyn Fn(&CapturedRequest) -> MockOutcome + Send + Sync>;

pub(crate) struct MockServer {
    pub base_url: String,
    pub captured: Arc<TokioMutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub(crate) fn not_found_body() -> String {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest/repos/contents#get-repository-content"
    })
    .to_string()
}

fn header_end_offset(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

async fn read_http_request(stream: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buffer = Vec::new();
    loop {
        let mut chunk = [0_u8; 2048];
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if header_end_offset(&buffer).is_some() {
            break;
        }
    }

    let header_end = header_end_offset(&buffer)?;
    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?.to_string();
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let content_length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buffer[header_end + 4..].to_vec();
    while body.len() < content_length {
        let mut chunk = [0_u8; 2048];
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }

    Some(CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Error",
    }
}

async fn write_http_response(stream: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text(status),
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await
}

pub(crate) async fn start_mock_server<F>(responder: F) -> MockServer
where
    F: Fn(&CapturedRequest) -> MockOutcome + Send + Sync + 'static,
{
    let responder: Responder = Arc::new(responder);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    let captured = Arc::new(TokioMutex::new(Vec::<CapturedRequest>::new()));
    let captured_clone = Arc::clone(&captured);

    let handle = tokio::spawn(async move {
        loop {
            let (mut stream, _) = match listener.accept().await {
                Ok(value) => value,
                Err(_) => break,
            };
            let captured_inner = Arc::clone(&captured_clone);
            let responder_inner = Arc::clone(&responder);
            tokio::spawn(async move {
                let Some(request) = read_http_request(&mut stream).await else {
                    return;
                };
                let outcome = responder_inner(&request);
                captured_inner.lock().await.push(request);

                match outcome {
                    MockOutcome::DropConnection => {}
                    MockOutcome::Respond { status, body } => {
                        let _ = write_http_response(&mut stream, status, &body).await;
                    }
                }
            });
        }
    });

    MockServer {
        base_url: format!("http://{}", addr),
        captured,
        handle,
    }
}

/// Replays `outcomes` in order, answering 500 once they run out.
pub(crate) async fn start_scripted_server(outcomes: Vec<MockOutcome>) -> MockServer {
    let script = Mutex::new(std::collections::VecDeque::from(outcomes));
    start_mock_server(move |_| {
        script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| MockOutcome::respond(500, r#"{"message":"unexpected request"}"#))
    })
    .await
}

/// A tiny stateful contents API: files live in memory, keyed by request path.
///
/// Writes without the current sha on an existing file get 409, writes with a
/// sha on a missing file get 422, mirroring GitHub's behavior.
pub(crate) async fn start_fake_repo() -> MockServer {
    let files: Mutex<HashMap<String, (String, String)>> = Mutex::new(HashMap::new());
    let revision = Mutex::new(0_u64);

    start_mock_server(move |req| {
        let mut files = files.lock().expect("files lock");
        match req.method.as_str() {
            "GET" => match files.get(&req.path) {
                Some((sha, content)) => MockOutcome::respond(
                    200,
                    json!({ "sha": sha, "path": req.path, "encoding": "base64", "content": content })
                        .to_string(),
                ),
                None => MockOutcome::respond(404, not_found_body()),
            },
            "PUT" => {
                let body = req.json();
                let given_sha = body.get("sha").and_then(|v| v.as_str()).map(str::to_string);
                let existing = files.get(&req.path).map(|(sha, _)| sha.clone());
                let status = match (&existing, &given_sha) {
                    (Some(current), Some(given)) if current == given => 200,
                    (Some(_), _) => {
                        return MockOutcome::respond(409, r#"{"message":"sha mismatch"}"#)
                    }
                    (None, Some(_)) => {
                        return MockOutcome::respond(422, r#"{"message":"sha wasn't supplied"}"#)
                    }
                    (None, None) => 201,
                };

                let mut counter = revision.lock().expect("revision lock");
                *counter += 1;
                let sha = format!("sha-{}", *counter);
                let content = body["content"].as_str().unwrap_or_default().to_string();
                files.insert(req.path.clone(), (sha.clone(), content));
                MockOutcome::respond(
                    status,
                    json!({
                        "content": { "sha": sha, "path": req.path },
                        "commit": { "sha": format!("commit-{}", *counter), "message": body["message"] }
                    })
                    .to_string(),
                )
            }
            _ => MockOutcome::respond(405, r#"{"message":"method not allowed"}"#),
        }
    })
    .await
}
