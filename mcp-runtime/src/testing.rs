//! In-process stand-in for the remote task service, used by unit tests.
//! Every request is recorded; unknown routes answer 404 with a JSON error.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use taskbridge_core::config::RemoteConfig;

const API_PREFIX: &str = "/api/v2";

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json_body(&self) -> Value {
        serde_json::from_str(&self.body).expect("recorded body should be JSON")
    }

    /// `"GET /team/1/space"` style label, handy for asserting call order.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Clone, Default)]
pub struct FakeRoutes {
    routes: HashMap<(String, String), CannedResponse>,
}

impl FakeRoutes {
    pub fn json(mut self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(
            (method.to_string(), path.to_string()),
            CannedResponse {
                status,
                content_type: "application/json",
                body: body.to_string(),
            },
        );
        self
    }

    pub fn text(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method.to_string(), path.to_string()),
            CannedResponse {
                status,
                content_type: "text/plain",
                body: body.to_string(),
            },
        );
        self
    }
}

#[derive(Clone)]
struct FakeState {
    routes: Arc<HashMap<(String, String), CannedResponse>>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeRemote {
    pub base_url: String,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeRemote {
    pub async fn start(routes: FakeRoutes) -> Self {
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            routes: Arc::new(routes.routes),
            log: log.clone(),
        };
        let app = Router::new().fallback(respond).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("fake remote should bind");
        let addr = listener.local_addr().expect("fake remote address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}{API_PREFIX}"),
            log,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.requests().iter().map(RecordedRequest::label).collect()
    }
}

/// Config pointing at `remote` with a test token and no default team.
pub fn config_for(remote: &FakeRemote) -> RemoteConfig {
    RemoteConfig::new(
        remote.base_url.clone(),
        Some("pk_test_token".to_string()),
        None,
    )
}

async fn respond(State(state): State<FakeState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let raw_path = parts.uri.path();
    let path = raw_path.strip_prefix(API_PREFIX).unwrap_or(raw_path).to_string();
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: path.clone(),
        query: parts.uri.query().map(str::to_string),
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: String::from_utf8_lossy(&bytes).to_string(),
    };
    state
        .log
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(recorded);

    match state.routes.get(&(parts.method.to_string(), path)) {
        Some(canned) => Response::builder()
            .status(canned.status)
            .header(CONTENT_TYPE, canned.content_type)
            .body(Body::from(canned.body.clone()))
            .expect("canned response should build"),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "err": "Route not found", "ECODE": "APP_001" })),
        )
            .into_response(),
    }
}
