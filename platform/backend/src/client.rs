use std::{sync::Arc, time::Duration};

use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, instrument};

use entity::ValidationError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend configuration: {0}")]
    Config(String),
    #[error("backend request failed: {0}")]
    Request(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode backend response: {0}")]
    Decode(String),
    #[error("invalid {label}: {source}")]
    Invalid {
        label: &'static str,
        source: ValidationError,
    },
}

#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Token used when the caller has no session of its own.
    pub service_token: Option<String>,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            service_token: None,
        }
    }
}

/// Shared HTTP client for the backend API.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    service_token: Option<Arc<str>>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "base url `{}` must start with http:// or https://",
                config.base_url
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| BackendError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: Arc::from(base_url),
            service_token: config
                .service_token
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(Arc::from),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The bearer a call with `token` will carry: the caller's own, else the
    /// service token.
    pub fn credential<'a>(&'a self, token: Option<&'a str>) -> Option<&'a str> {
        token.or(self.service_token.as_deref())
    }

    fn authorize(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match self.credential(token) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    #[instrument(name = "backend.get", skip(self, token))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let request = self.authorize(self.http.get(self.url(path)), token);
        let text = self.execute(request).await?;
        decode(&text)
    }

    #[instrument(name = "backend.send", skip(self, body, token))]
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.http.request(method, self.url(path)), token);
        let text = self.execute(request.json(body)).await?;
        decode(&text)
    }

    /// POST with no bearer at all; for endpoints that establish a session.
    #[instrument(name = "backend.post_anonymous", skip(self, body))]
    pub async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        let text = self.execute(request).await?;
        decode(&text)
    }

    #[instrument(name = "backend.delete", skip(self, token))]
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(), BackendError> {
        let request = self.authorize(self.http.delete(self.url(path)), token);
        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "backend responded");
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, BackendError> {
    serde_json::from_str(text).map_err(|e| BackendError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = BackendClient::new(&BackendConfig::new("http://hr.local/api/")).unwrap();
        assert_eq!(client.base_url(), "http://hr.local/api");
        assert_eq!(client.url("/holiday/all"), "http://hr.local/api/holiday/all");
        assert_eq!(client.url("grade/3"), "http://hr.local/api/grade/3");
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let err = BackendClient::new(&BackendConfig::new("hr.local/api")).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn caller_token_wins_over_service_token() {
        let mut config = BackendConfig::new("http://hr.local/api");
        config.service_token = Some("svc".into());
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(client.credential(Some("user")), Some("user"));
        assert_eq!(client.credential(None), Some("svc"));

        let anonymous = BackendClient::new(&BackendConfig::new("http://hr.local/api")).unwrap();
        assert_eq!(anonymous.credential(None), None);
    }

    #[test]
    fn decode_errors_are_reported() {
        let err = decode::<Vec<i64>>("not json").unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }
}
