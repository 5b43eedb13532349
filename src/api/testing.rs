//! Scripted transport for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::api::{ApiClient, ApiRequest, RawResponse, Transport};
use crate::app::{AksharError, Result};
use crate::domain::{Session, User};
use crate::session::SessionStore;
use crate::store::SqliteStore;

pub const BASE_URL: &str = "http://test.local/api";

#[derive(Debug, Clone)]
pub struct Reply {
    outcome: Option<RawResponse>,
    delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            outcome: Some(RawResponse {
                status,
                body: serde_json::to_vec(&body).unwrap(),
            }),
            delay: None,
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            outcome: Some(RawResponse {
                status,
                body: Vec::new(),
            }),
            delay: None,
        }
    }

    pub fn network_error() -> Self {
        Self {
            outcome: None,
            delay: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Routes are keyed by method and the URL relative to [`BASE_URL`],
/// including any query string. Unrouted requests fail as network errors.
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, path: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), reply);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, relative(r)))
            .collect()
    }
}

fn relative(request: &ApiRequest) -> String {
    request
        .url
        .as_str()
        .strip_prefix(BASE_URL)
        .unwrap_or(request.url.as_str())
        .to_string()
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let key = (request.method.clone(), relative(&request));
        self.requests.lock().unwrap().push(request);

        let reply = self.routes.lock().unwrap().get(&key).cloned();
        let Some(reply) = reply else {
            return Err(AksharError::Network(format!("no route for {} {}", key.0, key.1)));
        };

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply
            .outcome
            .ok_or_else(|| AksharError::Network("connection refused".into()))
    }
}

/// An API client over `mock` with a fresh, anonymous in-memory session.
pub fn client(mock: MockTransport) -> (ApiClient, SessionStore) {
    let session = SessionStore::load(Arc::new(SqliteStore::in_memory().unwrap()));
    let api = ApiClient::new(Arc::new(mock), BASE_URL, session.clone()).unwrap();
    (api, session)
}

pub fn user(id: &str, name: &str, username: &str) -> User {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "name": name,
        "email": format!("{}@example.com", username),
        "username": username,
    }))
    .unwrap()
}

/// Put `session` straight into an authenticated state as user `me`.
pub fn sign_in(session: &SessionStore, token: &str) -> User {
    let me = user("me", "Test Reader", "reader");
    session.replace(Session::authenticated(token.to_string(), me.clone()));
    me
}

pub fn article_json(id: &str, slug: &str, title: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "title": title,
        "content": format!("<p>{} body</p>", title),
        "tags": ["rust"],
        "status": "published",
        "author": {"_id": "author-1", "name": "Aarav Sharma", "username": "aarav-writes"},
        "likes": [],
        "likesCount": 2,
        "slug": slug,
        "createdAt": "2026-03-01T10:00:00.000Z",
        "updatedAt": "2026-03-01T10:00:00.000Z"
    })
}
