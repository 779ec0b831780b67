#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::CONTENT_RANGE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::net::TcpListener;

pub const SERVICE_KEY: &str = "service-role-key-for-tests";

/// In-process stand-in for a project's PostgREST endpoint.
#[derive(Default)]
pub struct MockBackend {
    tables: HashMap<String, Vec<Value>>,
    fail_first: AtomicUsize,
    fail_on: AtomicUsize,
    hits: AtomicUsize,
    table_hits: std::sync::Mutex<Vec<String>>,
}

impl MockBackend {
    /// All four chat tables, with `users` as the allow-list rows.
    pub fn with_chat_tables(users: Vec<Value>) -> Self {
        Self::default()
            .table("perfiles", vec![json!({"id": "p1", "email": "fer@example.com"})])
            .table("conversaciones", vec![])
            .table("mensajes", vec![])
            .table("usuarios_permitidos", users)
    }

    pub fn table(mut self, name: &str, rows: Vec<Value>) -> Self {
        self.tables.insert(name.to_string(), rows);
        self
    }

    pub fn without_table(mut self, name: &str) -> Self {
        self.tables.remove(name);
        self
    }

    /// Answer the next `n` requests with 503.
    pub fn failing_first(self, n: usize) -> Self {
        self.fail_first.store(n, Ordering::SeqCst);
        self
    }

    /// Answer only the `n`-th request (1-based) with 503.
    pub fn failing_request(self, n: usize) -> Self {
        self.fail_on.store(n, Ordering::SeqCst);
        self
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn table_hits(&self) -> Vec<String> {
        self.table_hits.lock().unwrap().clone()
    }
}

async fn select(
    State(backend): State<Arc<MockBackend>>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let nth = backend.hits.fetch_add(1, Ordering::SeqCst) + 1;
    backend.table_hits.lock().unwrap().push(table.clone());

    let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {SERVICE_KEY}");
    if api_key != Some(SERVICE_KEY) || bearer != Some(expected_bearer.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid API key"})),
        )
            .into_response();
    }

    let fail_first = backend
        .fail_first
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if fail_first || backend.fail_on.load(Ordering::SeqCst) == nth {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response();
    }

    let Some(rows) = backend.tables.get(&table) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "code": "42P01",
                "message": format!("relation \"public.{table}\" does not exist"),
            })),
        )
            .into_response();
    };

    let limit = query
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(rows.len());
    let page: Vec<Value> = rows.iter().take(limit).cloned().collect();
    let range = if page.is_empty() {
        format!("*/{}", rows.len())
    } else {
        format!("0-{}/{}", page.len() - 1, rows.len())
    };
    ([(CONTENT_RANGE, range)], Json(page)).into_response()
}

/// Serve `backend` on an ephemeral port; returns its base URL.
pub async fn spawn(backend: MockBackend) -> (String, Arc<MockBackend>) {
    let backend = Arc::new(backend);
    let app = Router::new()
        .route("/rest/v1/{table}", get(select))
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock backend");
    let addr = listener.local_addr().expect("mock backend has no address");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock backend stopped");
    });
    (format!("http://{addr}"), backend)
}

/// A base URL nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe port");
    let addr = listener.local_addr().expect("probe port has no address");
    drop(listener);
    format!("http://{addr}")
}

/// Every required application variable, pointing at `base_url`.
pub fn full_env(base_url: &str) -> HashMap<String, String> {
    HashMap::from([
        ("NEXT_PUBLIC_SUPABASE_URL".to_string(), base_url.to_string()),
        (
            "NEXT_PUBLIC_SUPABASE_ANON_KEY".to_string(),
            "anon-public-key-0123456789".to_string(),
        ),
        ("SUPABASE_SERVICE_ROLE_KEY".to_string(), SERVICE_KEY.to_string()),
        ("OPENAI_API_KEY".to_string(), "sk-test-0123456789abcdef".to_string()),
        ("OPENAI_ASSISTANT_ID".to_string(), "asst_test123".to_string()),
    ])
}

pub fn test_config() -> chat_doctor::Config {
    chat_doctor::Config {
        connect_timeout_secs: 2,
        timeout_secs: 5,
        ..Default::default()
    }
}

pub fn active_user(email: &str, name: &str) -> Value {
    json!({"id": email, "email": email, "nombre": name, "activo": true})
}

pub fn inactive_user(email: &str) -> Value {
    json!({"id": email, "email": email, "nombre": null, "activo": false})
}
