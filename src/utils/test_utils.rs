use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::api::client::BackendClient;
use crate::core::app::App;
use crate::core::message::Message;
use crate::core::session::{ChatBackend, SessionController, Settled};

pub fn create_test_app() -> App {
    App::new()
}

pub fn create_test_messages() -> Vec<Message> {
    vec![
        Message::assistant("Goedendag, waarmee kan ik u helpen?"),
        Message::user("Ik heb een vraag over mijn uitkering."),
        Message::assistant("Natuurlijk, wat wilt u weten?"),
        Message::user("Wanneer wordt deze uitbetaald?"),
    ]
}

/// A session controller whose HTTP client ignores proxy settings from the
/// environment, so loopback stubs are always reached directly.
pub fn controller_for(base_url: impl Into<String>) -> SessionController {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client should build");
    SessionController::new(BackendClient::new(client, base_url))
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);
    format!("http://{addr}/api")
}

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

enum Script {
    InOrder(VecDeque<StubResponse>),
    ByPath(HashMap<String, StubResponse>),
}

impl Script {
    fn next_for(&mut self, path: &str) -> StubResponse {
        let found = match self {
            Script::InOrder(queue) => queue.pop_front(),
            Script::ByPath(routes) => routes.get(path).cloned(),
        };
        found.unwrap_or_else(|| StubResponse::json(404, r#"{"error":"unscripted"}"#))
    }
}

/// A loopback HTTP server answering with scripted responses.
pub struct StubBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    task: JoinHandle<()>,
}

impl StubBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub async fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().await.clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Answer requests with `responses` in arrival order.
pub async fn spawn_stub_backend(responses: Vec<StubResponse>) -> StubBackend {
    spawn_with_script(Script::InOrder(responses.into())).await
}

/// Answer requests by path, e.g. `"/api/start-conversation"`.
pub async fn spawn_routed_stub_backend(routes: Vec<(&str, StubResponse)>) -> StubBackend {
    let routes = routes
        .into_iter()
        .map(|(path, response)| (path.to_string(), response))
        .collect();
    spawn_with_script(Script::ByPath(routes)).await
}

async fn spawn_with_script(script: Script) -> StubBackend {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    let requests: Arc<Mutex<Vec<CapturedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&requests);
    let script = Arc::new(Mutex::new(script));

    let task = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let captured = Arc::clone(&captured);
            let script = Arc::clone(&script);
            tokio::spawn(async move {
                let _ = serve_connection(stream, captured, script).await;
            });
        }
    });

    StubBackend {
        addr,
        requests,
        task,
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    script: Arc<Mutex<Script>>,
) -> Result<(), String> {
    let request = read_http_request(&mut stream).await?;
    let response = script.lock().await.next_for(&request.path);
    captured.lock().await.push(request);

    let reply = format!(
        "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{}",
        response.status,
        response.body.len(),
        response.body
    );
    stream
        .write_all(reply.as_bytes())
        .await
        .map_err(|err| err.to_string())?;
    stream.shutdown().await.map_err(|err| err.to_string())
}

async fn read_http_request(stream: &mut TcpStream) -> Result<CapturedRequest, String> {
    let mut buffer = Vec::new();
    let header_end = loop {
        if let Some(pos) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break pos + 4;
        }
        let mut chunk = [0_u8; 1024];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0_usize;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().map_err(|_| "bad content-length")?;
            }
        }
    }

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let mut chunk = vec![0_u8; content_length - body.len()];
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP body".to_string());
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(CapturedRequest { method, path, body })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Send(String),
    Start,
    Models,
    Select(String),
    Clear,
}

/// An in-memory [`ChatBackend`] with fixed answers that records every call.
pub struct ScriptedBackend {
    pub reply: Settled<String>,
    pub opening: Settled<String>,
    pub models: Settled<Vec<String>>,
    pub panic_on_send: bool,
    pub panic_on_start: bool,
    pub(crate) calls: std::sync::Mutex<Vec<BackendCall>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            reply: Settled::Delivered("Dit is het antwoord.".into()),
            opening: Settled::Delivered("Welkom bij de chatbot.".into()),
            models: Settled::Delivered(vec!["a".into(), "b".into()]),
            panic_on_send: false,
            panic_on_start: false,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedBackend {
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_message(&self, text: &str) -> Settled<String> {
        self.record(BackendCall::Send(text.to_string()));
        if self.panic_on_send {
            panic!("scripted send failure");
        }
        self.reply.clone()
    }

    async fn start_new_conversation(&self) -> Settled<String> {
        self.record(BackendCall::Start);
        if self.panic_on_start {
            panic!("scripted start failure");
        }
        self.opening.clone()
    }

    async fn get_available_models(&self) -> Settled<Vec<String>> {
        self.record(BackendCall::Models);
        self.models.clone()
    }

    async fn select_model(&self, model: &str) {
        self.record(BackendCall::Select(model.to_string()));
    }

    async fn clear_memory(&self) {
        self.record(BackendCall::Clear);
    }
}
