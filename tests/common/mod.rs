//! Common test utilities for linctl integration tests.
//!
//! Provides `TestEnv` for isolated config directories and `MockApi`, a
//! minimal canned-response GraphQL server the `lin` binary is pointed at
//! via the `LINCTL_API_URL` environment variable. Nothing here touches
//! the user's real `~/.config/linctl/` or the network.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::Command;
use serde_json::{Value, json};
pub use tempfile::TempDir;

/// A test environment with an isolated config directory.
///
/// The `lin()` method returns a `Command` with `LINCTL_CONFIG_DIR` set
/// per-invocation and ambient credentials scrubbed, making tests
/// parallel-safe.
pub struct TestEnv {
    pub config_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// A `lin` command with isolated config and no inherited credentials.
    pub fn lin(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_lin"));
        cmd.env("LINCTL_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("LINEAR_API_KEY");
        cmd.env_remove("LINCTL_API_URL");
        cmd
    }

    /// A `lin` command wired to a mock API with a test key.
    pub fn lin_with_api(&self, api: &MockApi) -> Command {
        let mut cmd = self.lin();
        cmd.env("LINEAR_API_KEY", "lin_api_test");
        cmd.env("LINCTL_API_URL", &api.url);
        cmd
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.config_dir.path().join("config.toml")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Response produced by a mock handler.
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    /// A 200 response wrapping `data` in the GraphQL envelope.
    pub fn data(data: Value) -> Self {
        Self {
            status: 200,
            body: json!({"data": data}).to_string(),
        }
    }

    /// A 200 response carrying GraphQL errors.
    pub fn graphql_error(message: &str) -> Self {
        Self {
            status: 200,
            body: json!({"data": null, "errors": [{"message": message}]}).to_string(),
        }
    }

    /// A plain HTTP failure.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

type Handler = dyn Fn(&str, &Value) -> MockResponse + Send + Sync;

/// A single-threaded canned-response GraphQL server.
///
/// Each connection carries one request (the server closes after
/// responding); the handler receives the GraphQL query string and the
/// variables object. Every request body is also recorded for
/// assertions about fetch counts and ordering.
pub struct MockApi {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
}

impl MockApi {
    pub fn spawn<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> MockResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/graphql", listener.local_addr().unwrap());
        let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let handler: Arc<Handler> = Arc::new(handler);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let log = Arc::clone(&log);
                let handler = Arc::clone(&handler);
                // One thread per connection keeps a slow assertion in the
                // test body from blocking the next request
                thread::spawn(move || handle_connection(stream, &log, &*handler));
            }
        });

        Self { url, requests }
    }

    /// Variables of every recorded request for the given operation name.
    pub fn calls_to(&self, operation: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|req| {
                req["query"]
                    .as_str()
                    .is_some_and(|q| q.contains(operation))
            })
            .map(|req| req["variables"].clone())
            .collect()
    }
}

fn handle_connection(mut stream: TcpStream, log: &Mutex<Vec<Value>>, handler: &Handler) {
    let Some(body) = read_request_body(&mut stream) else {
        return;
    };
    let Ok(request) = serde_json::from_slice::<Value>(&body) else {
        return;
    };

    log.lock().unwrap().push(request.clone());

    let query = request["query"].as_str().unwrap_or("");
    let response = handler(query, &request["variables"]);

    let reason = match response.status {
        200 => "OK",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    };
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes());
}

/// Read one HTTP request and return its body.
fn read_request_body(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    // Read until the end of the headers
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length: usize = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse().ok())?;

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(buf[body_start..body_start + content_length].to_vec())
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Shallow issue stub JSON as the API returns it.
pub fn stub(id: &str, identifier: &str, title: &str, state: Option<&str>) -> Value {
    let mut value = json!({
        "id": id,
        "identifier": identifier,
        "title": title,
    });
    if let Some(name) = state {
        value["state"] = json!({"name": name, "type": "unstarted"});
    }
    value
}

/// Full issue JSON including tree edges.
pub fn full_issue(
    base: Value,
    parent: Option<Value>,
    children: Vec<Value>,
    relations: Vec<(&str, Value)>,
) -> Value {
    let mut issue = base;
    if let Some(parent) = parent {
        issue["parent"] = parent;
    }
    issue["children"] = json!({"nodes": children});
    issue["relations"] = json!({
        "nodes": relations
            .into_iter()
            .map(|(ty, related)| json!({"type": ty, "relatedIssue": related}))
            .collect::<Vec<Value>>()
    });
    issue
}

/// Route a tree-shaped fixture: `query Issue` lookups resolve against
/// the given issues by the `id` variable, anything else is an error.
/// Identifiers in `fail` answer with HTTP 500.
pub fn issue_router(issues: Vec<Value>, fail: Vec<&str>) -> impl Fn(&str, &Value) -> MockResponse {
    let fail: Vec<String> = fail.into_iter().map(String::from).collect();
    move |query, variables| {
        if !query.contains("query Issue(") {
            return MockResponse::graphql_error("unexpected operation");
        }
        let id = variables["id"].as_str().unwrap_or("");
        if fail.iter().any(|f| f == id) {
            return MockResponse::status(500);
        }
        let found = issues
            .iter()
            .find(|issue| issue["identifier"] == id || issue["id"] == id)
            .cloned()
            .unwrap_or(Value::Null);
        MockResponse::data(json!({"issue": found}))
    }
}
