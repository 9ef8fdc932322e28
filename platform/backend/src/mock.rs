//! In-memory stand-in for the backend, shared by the unit tests here and the
//! end-to-end suite (`mock` feature).
//!
//! Master-data routes require a bearer token; `/auth/login` accepts the
//! password `secret` and issues `token-{username}`.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{BackendClient, BackendConfig};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Store {
    records: HashMap<String, Vec<Value>>,
    next_id: i64,
    failing: bool,
    calls: Vec<RecordedCall>,
}

#[derive(Clone)]
pub struct MockBackend {
    pub base_url: String,
    store: Arc<Mutex<Store>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let store = Arc::new(Mutex::new(Store {
            next_id: 100,
            ..Store::default()
        }));
        let handler_store = store.clone();
        let router = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
                let store = handler_store.clone();
                async move { handle(&store, &method, &uri, &headers, &body) }
            },
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            store,
        }
    }

    pub fn client(&self) -> BackendClient {
        BackendClient::new(&BackendConfig::new(&self.base_url)).unwrap()
    }

    pub fn client_with_service_token(&self, token: &str) -> BackendClient {
        let mut config = BackendConfig::new(&self.base_url);
        config.service_token = Some(token.to_string());
        BackendClient::new(&config).unwrap()
    }

    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        let mut store = self.store.lock().unwrap();
        store.records.insert(resource.to_string(), records);
    }

    /// Make every master-data request answer 503.
    pub fn set_failing(&self, failing: bool) {
        self.store.lock().unwrap().failing = failing;
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.store.lock().unwrap().calls.clone()
    }

    /// `METHOD /path` of every call so far.
    pub fn routes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| format!("{} {}", call.method, call.path))
            .collect()
    }
}

fn handle(
    store: &Mutex<Store>,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut store = store.lock().unwrap();
    store.calls.push(RecordedCall {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: authorization.clone(),
    });
    let segments: Vec<&str> = uri.path().trim_matches('/').split('/').collect();
    let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "login"]) => {
            if payload["password"] != "secret" {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            let username = payload["username"].as_str().unwrap_or_default();
            return Json(json!({
                "token": format!("token-{username}"),
                "user": {"id": 7, "username": username, "fullName": "Asha Raman", "roleName": "HR Manager"}
            }))
            .into_response();
        }
        ("GET", ["auth", "me"]) => {
            return match authorization.as_deref().and_then(|a| a.strip_prefix("Bearer token-")) {
                Some(username) => Json(json!({"id": 7, "username": username})).into_response(),
                None => StatusCode::UNAUTHORIZED.into_response(),
            };
        }
        _ => {}
    }

    if authorization.is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if store.failing {
        return (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response();
    }

    match (method.as_str(), segments.as_slice()) {
        ("GET", [resource, "all"]) => {
            let records = store.records.get(*resource).cloned().unwrap_or_default();
            Json(records).into_response()
        }
        ("GET", [resource, id]) => match find(&store, resource, id) {
            Some((_, record)) => Json(record).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        ("POST", [resource]) => {
            let mut record = payload;
            store.next_id += 1;
            record["id"] = json!(store.next_id);
            store
                .records
                .entry(resource.to_string())
                .or_default()
                .push(record.clone());
            (StatusCode::CREATED, Json(record)).into_response()
        }
        ("PUT", [resource, id]) => match find(&store, resource, id) {
            Some((index, _)) => {
                if let Some(rows) = store.records.get_mut(*resource) {
                    rows[index] = payload.clone();
                }
                Json(payload).into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        },
        ("DELETE", [resource, id]) => match find(&store, resource, id) {
            Some((index, _)) => {
                if let Some(rows) = store.records.get_mut(*resource) {
                    rows.remove(index);
                }
                StatusCode::NO_CONTENT.into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        },
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn find(store: &Store, resource: &str, id: &str) -> Option<(usize, Value)> {
    let id: i64 = id.parse().ok()?;
    store
        .records
        .get(resource)?
        .iter()
        .enumerate()
        .find(|(_, record)| record["id"] == json!(id))
        .map(|(index, record)| (index, record.clone()))
}
