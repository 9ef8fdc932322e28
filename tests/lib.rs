//! Shared harness: the router wired against the in-memory backend.

use std::collections::HashMap;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use workforce_server::{AppConfig, AppState, build_app, i18n::I18nConfig};

pub use platform_backend::mock::{MockBackend, RecordedCall};

pub const COOKIE_SECRET: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `name=value` of the first `Set-Cookie` header, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        let raw = self.header("set-cookie")?;
        raw.split(';').next().map(str::to_string)
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: MockBackend,
}

impl TestApp {
    pub async fn start() -> Self {
        Self::with_i18n(I18nConfig::default()).await
    }

    pub async fn with_i18n(i18n: I18nConfig) -> Self {
        Self::build(i18n, &[]).await
    }

    /// Backend calls without a caller token carry `token`.
    pub async fn with_service_token(token: &str) -> Self {
        Self::build(I18nConfig::default(), &[("BACKEND_SERVICE_TOKEN", token)]).await
    }

    async fn build(i18n: I18nConfig, extra: &[(&str, &str)]) -> Self {
        let backend = MockBackend::start().await;
        let mut env: HashMap<&str, String> = HashMap::from([
            ("BACKEND_BASE_URL", backend.base_url.clone()),
            ("COOKIE_SECRET_BASE64", COOKIE_SECRET.to_string()),
            ("COOKIE_SECURE", "false".to_string()),
        ]);
        env.extend(extra.iter().map(|(key, value)| (*key, value.to_string())));
        let mut config = AppConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
        config.i18n = i18n;
        let state = AppState::new(config).unwrap();
        Self {
            router: build_app(state),
            backend,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, &[], None).await
    }
}
