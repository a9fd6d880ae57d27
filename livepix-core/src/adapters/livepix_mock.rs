//! Mock LivePix API server for testing
//!
//! Serves the same routes as the real platform so the client can be exercised
//! end to end without credentials:
//! - POST /oauth2/token (form encoded client-credentials grant)
//! - GET /v2/account, /v2/wallet, /v2/payments, /v2/messages
//! - POST /v2/payments, /v2/messages
//!
//! Resource responses use the `{ data: ... }` envelope. Payments and messages
//! created through POST are stored and show up in later GETs. Every request is
//! recorded so tests can assert on the exact wire format, or on the absence
//! of any request at all.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use serde_json::{json, Value as JsonValue};

use super::livepix::LivePixClient;

/// Token prefix issued by the mock; resources accept only these
const TOKEN_PREFIX: &str = "mock_";

/// Mock LivePix server for testing
pub struct MockLivePixServer {
    port: u16,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<MockState>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock behaviour and data generation
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
    /// Number of pre-existing payments
    pub num_payments: usize,
    /// Number of pre-existing messages
    pub num_messages: usize,
    /// Reject every request with 401
    pub fail_auth: bool,
    /// Answer every request with this status instead of routing it
    pub force_status: Option<(u16, &'static str)>,
    /// Answer resource requests with a body that is not JSON
    pub malformed_body: bool,
    /// Answer resource requests with JSON lacking the `data` envelope
    pub missing_envelope: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            client_id: "mock_client".to_string(),
            client_secret: "mock_secret".to_string(),
            expires_in: 3600,
            token_type: "bearer".to_string(),
            num_payments: 3,
            num_messages: 2,
            fail_auth: false,
            force_status: None,
            malformed_body: false,
            missing_envelope: false,
        }
    }
}

/// A request as received by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    /// Header names lowercased
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query parameters
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        decode_pairs(self.query.as_deref().unwrap_or(""))
    }

    /// Decoded form body
    pub fn form(&self) -> Vec<(String, String)> {
        decode_pairs(&self.body)
    }

    pub fn form_value(&self, key: &str) -> Option<String> {
        self.form().into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn json(&self) -> JsonValue {
        serde_json::from_str(&self.body).unwrap_or(JsonValue::Null)
    }
}

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<RecordedRequest>,
    payments: Vec<JsonValue>,
    messages: Vec<JsonValue>,
    issued_tokens: usize,
    created: usize,
}

impl MockLivePixServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let state = Arc::new(Mutex::new(MockState {
            payments: generate_payments(config.num_payments),
            messages: generate_messages(config.num_messages),
            ..MockState::default()
        }));

        // Non-blocking accept so the loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let state_clone = state.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = state_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &state);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(StdDuration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            state,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.base_url())
    }

    pub fn api_url(&self) -> String {
        format!("{}/v2", self.base_url())
    }

    /// A client pointed at this server
    pub fn client(&self) -> LivePixClient {
        LivePixClient::with_base_urls(&self.token_url(), &self.api_url())
            .expect("mock URLs are valid")
    }

    /// A token the resource routes accept
    pub fn valid_token(&self) -> String {
        format!("{}preissued", TOKEN_PREFIX)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockLivePixServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, state: &Mutex<MockState>) {
    // Accepted sockets may inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(StdDuration::from_secs(5)));

    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => {
            send_response(&mut stream, 400, "Bad Request", r#"{"error": "invalid request"}"#);
            return;
        }
    };
    state.lock().unwrap().requests.push(request.clone());

    if let Some((status, reason)) = config.force_status {
        send_response(&mut stream, status, reason, r#"{"error": "forced"}"#);
        return;
    }

    if config.fail_auth {
        send_response(&mut stream, 401, "Unauthorized", r#"{"error": "invalid_client"}"#);
        return;
    }

    let (status, reason, body) = route(&request, config, state);
    send_response(&mut stream, status, reason, &body);
}

fn route(
    request: &RecordedRequest,
    config: &MockConfig,
    state: &Mutex<MockState>,
) -> (u16, &'static str, String) {
    if request.method == "POST" && request.path == "/oauth2/token" {
        return issue_token(request, config, state);
    }

    let Some(resource) = request.path.strip_prefix("/v2") else {
        return not_found();
    };

    let authorized = request
        .header("authorization")
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.starts_with(TOKEN_PREFIX))
        .unwrap_or(false);
    if !authorized {
        return (401, "Unauthorized", r#"{"error": "invalid token"}"#.to_string());
    }

    if config.malformed_body {
        return (200, "OK", "<html>maintenance</html>".to_string());
    }

    let data = match (request.method.as_str(), resource) {
        ("GET", "/account") => json!({
            "id": "acc_mock",
            "email": "streamer@example.com",
            "username": "streamer",
            "displayName": "Mock Streamer",
            "avatar": "https://cdn.livepix.gg/avatars/mock.png"
        }),
        ("GET", "/wallet") => json!([
            { "currency": "BRL", "balance": 12500, "balanceHeld": 300, "balancePending": 0 },
            { "currency": "USD", "balance": 0, "balanceHeld": 0, "balancePending": 1000 }
        ]),
        ("GET", "/payments") => {
            let filter = query_value(request, "reference");
            filtered(&state.lock().unwrap().payments, "reference", filter.as_deref())
        }
        ("GET", "/messages") => {
            let filter = query_value(request, "proof");
            filtered(&state.lock().unwrap().messages, "proof", filter.as_deref())
        }
        ("POST", "/payments") | ("POST", "/messages") => {
            match create(request, resource == "/messages", state) {
                Ok(redirect) => redirect,
                Err(message) => {
                    return (400, "Bad Request", json!({ "error": message }).to_string());
                }
            }
        }
        _ => return not_found(),
    };

    if config.missing_envelope {
        return (200, "OK", data.to_string());
    }
    (200, "OK", json!({ "data": data }).to_string())
}

fn issue_token(
    request: &RecordedRequest,
    config: &MockConfig,
    state: &Mutex<MockState>,
) -> (u16, &'static str, String) {
    if request.form_value("grant_type").as_deref() != Some("client_credentials") {
        return (400, "Bad Request", r#"{"error": "unsupported_grant_type"}"#.to_string());
    }
    let id_ok = request.form_value("client_id").as_deref() == Some(config.client_id.as_str());
    let secret_ok =
        request.form_value("client_secret").as_deref() == Some(config.client_secret.as_str());
    if !id_ok || !secret_ok {
        return (401, "Unauthorized", r#"{"error": "invalid_client"}"#.to_string());
    }

    let mut state = state.lock().unwrap();
    state.issued_tokens += 1;
    let body = json!({
        "access_token": format!("{}{}", TOKEN_PREFIX, state.issued_tokens),
        "expires_in": config.expires_in,
        "scope": request.form_value("scope").unwrap_or_default(),
        "token_type": config.token_type,
    });
    (200, "OK", body.to_string())
}

/// Store a new payment (and message) and answer with a checkout redirect
fn create(
    request: &RecordedRequest,
    is_message: bool,
    state: &Mutex<MockState>,
) -> Result<JsonValue, String> {
    let body = request.json();
    let amount = body["amount"].as_u64().ok_or("amount is required")?;
    if amount < 100 {
        return Err("amount must be >= 100".to_string());
    }
    if body["redirectUrl"].as_str().is_none() {
        return Err("redirectUrl is required".to_string());
    }

    let mut state = state.lock().unwrap();
    state.created += 1;
    let reference = format!("ref_new_{}", state.created);
    let payment = json!({
        "id": format!("pay_new_{}", state.created),
        "proof": format!("proof_new_{}", state.created),
        "reference": reference,
        "amount": amount,
        "currency": body["currency"],
        "createdAt": (Utc::now() - Duration::seconds(1)).to_rfc3339(),
    });
    if is_message {
        let mut message = payment.clone();
        message["username"] = body["username"].clone();
        message["message"] = body["message"].clone();
        message["flagged"] = json!(false);
        state.messages.push(message);
    }
    state.payments.push(payment);

    Ok(json!({
        "reference": reference,
        "redirectUrl": format!("https://livepix.gg/checkout/{}", reference),
    }))
}

fn filtered(items: &[JsonValue], key: &str, value: Option<&str>) -> JsonValue {
    let selected: Vec<JsonValue> = items
        .iter()
        .filter(|item| value.map_or(true, |v| item[key].as_str() == Some(v)))
        .cloned()
        .collect();
    JsonValue::Array(selected)
}

fn query_value(request: &RecordedRequest, key: &str) -> Option<String> {
    request
        .query_pairs()
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

fn not_found() -> (u16, &'static str, String) {
    (404, "Not Found", r#"{"error": "not found"}"#.to_string())
}

fn generate_payments(count: usize) -> Vec<JsonValue> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            json!({
                "id": format!("pay_{}", i),
                "proof": format!("proof_{}", i),
                "reference": format!("ref_{}", i),
                "amount": 100 * (i as u64 + 1),
                "currency": "BRL",
                "createdAt": (now - Duration::hours(i as i64 + 1)).to_rfc3339(),
            })
        })
        .collect()
}

fn generate_messages(count: usize) -> Vec<JsonValue> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            json!({
                "id": format!("msg_{}", i),
                "proof": format!("msg_proof_{}", i),
                "reference": format!("msg_ref_{}", i),
                "amount": 500,
                "currency": "BRL",
                "createdAt": (now - Duration::minutes(i as i64 + 5)).to_rfc3339(),
                "username": format!("viewer{}", i),
                "message": format!("hello #{}", i),
                "flagged": i % 2 == 1,
            })
        })
        .collect()
}

/// Read one HTTP/1.1 request: headers, then `Content-Length` bytes of body
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find_subsequence(&data, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut parts = lines.next()?.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = data[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buffer[..n]);
    }

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target.clone(), None),
    };

    Some(RecordedRequest {
        method,
        path,
        query,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn decode_pairs(input: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(input.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
