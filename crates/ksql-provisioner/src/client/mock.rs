//! In-process ksqlDB stand-in for client and provisioner tests.

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request received by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: Value,
}

/// Serves `/ksql`: answers `SHOW TABLES;` from its table list and registers
/// the turnstile tables when a statement succeeds.
#[derive(Clone)]
pub struct MockKsql {
    tables: Arc<Mutex<Vec<String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    statement_reply: (StatusCode, String),
    lookup_failure: Option<(StatusCode, String)>,
    delay: Option<Duration>,
}

impl MockKsql {
    pub fn new(tables: &[&str]) -> Self {
        let reply = serde_json::json!([{
            "@type": "currentStatus",
            "commandStatus": {"status": "SUCCESS", "message": "Table created"}
        }]);

        Self {
            tables: Arc::new(Mutex::new(tables.iter().map(|t| t.to_string()).collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
            statement_reply: (StatusCode::OK, reply.to_string()),
            lookup_failure: None,
            delay: None,
        }
    }

    /// Answer statements with the given status and body.
    pub fn failing(mut self, status: StatusCode, body: &str) -> Self {
        self.statement_reply = (status, body.to_string());
        self
    }

    /// Answer `SHOW TABLES;` with the given status and body.
    pub fn failing_lookup(mut self, status: StatusCode, body: &str) -> Self {
        self.lookup_failure = Some((status, body.to_string()));
        self
    }

    /// Hold every answer back for `delay`.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests other than table lookups.
    pub fn statements(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.body["ksql"] != "SHOW TABLES;")
            .collect()
    }

    /// Bind to an ephemeral port and serve in the background.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/ksql", post(handle))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

async fn handle(
    State(mock): State<MockKsql>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    if let Some(delay) = mock.delay {
        tokio::time::sleep(delay).await;
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let is_lookup = body["ksql"] == "SHOW TABLES;";

    mock.requests
        .lock()
        .unwrap()
        .push(RecordedRequest { content_type, body });

    if is_lookup {
        if let Some(failure) = mock.lookup_failure.clone() {
            return failure;
        }
        let tables: Vec<Value> = mock
            .tables
            .lock()
            .unwrap()
            .iter()
            .map(|name| serde_json::json!({"name": name, "topic": name, "format": "JSON", "type": "TABLE"}))
            .collect();
        let reply = serde_json::json!([{
            "@type": "tables",
            "statementText": "SHOW TABLES;",
            "tables": tables,
            "warnings": []
        }]);
        return (StatusCode::OK, reply.to_string());
    }

    let (status, reply) = mock.statement_reply.clone();
    if status.is_success() {
        let mut tables = mock.tables.lock().unwrap();
        for name in ["TURNSTILE", "TURNSTILE_SUMMARY"] {
            if !tables.iter().any(|t| t == name) {
                tables.push(name.to_string());
            }
        }
    }
    (status, reply)
}
