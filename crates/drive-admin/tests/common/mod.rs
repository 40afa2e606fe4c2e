#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use drive_admin::api::HttpGateway;
use drive_admin::config::ApiConfig;
use drive_admin::session::{AuthToken, Session};
use reqwest::Url;
use serde_json::Value;

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: String,
    body: Bytes,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<String, Canned>>>,
}

/// In-process stand-in for the admin backend, bound to an ephemeral port.
/// Unscripted routes answer 404 with a JSON message.
pub struct MockBackend {
    addr: SocketAddr,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend runs");
        });
        Self { addr, state }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("valid url")
    }

    pub fn gateway(&self, session: Option<Session>) -> HttpGateway {
        HttpGateway::new(&ApiConfig::new(self.base_url()), session).expect("gateway builds")
    }

    pub fn respond_json(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.respond(method, path, status, "application/json", body.to_string());
    }

    pub fn respond(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        content_type: &str,
        body: impl Into<Bytes>,
    ) {
        self.state.responses.lock().expect("mock mutex").insert(
            route_key(&method, path),
            Canned {
                status,
                content_type: content_type.to_string(),
                body: body.into(),
            },
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().expect("mock mutex").clone()
    }
}

pub fn session() -> Session {
    Session::new(
        AuthToken::new("test-token".to_string()),
        "admin@school.et".to_string(),
        chrono::Utc::now(),
    )
}

fn route_key(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let key = route_key(&method, uri.path());
    state.requests.lock().expect("mock mutex").push(Recorded {
        method,
        path: uri.path().to_string(),
        authorization,
        body,
    });

    match state.responses.lock().expect("mock mutex").get(&key).cloned() {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, canned.content_type)],
            canned.body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json".to_string())],
            r#"{"message":"no such route"}"#,
        )
            .into_response(),
    }
}
