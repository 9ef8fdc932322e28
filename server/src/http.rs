use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::FromRef,
    http::{self, HeaderName, HeaderValue, Method},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use platform_backend::{Backend, NameCache};
use serde::Serialize;
use tower::{Layer, ServiceBuilder};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use workforce_hr::HrModule;

use crate::{config::AppConfig, i18n, master, session, tabs};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Backend,
    pub hr: Arc<HrModule>,
    pub names: Arc<NameCache>,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let backend = Backend::connect(&config.backend).context("failed to build backend client")?;
        Ok(Self {
            backend,
            hr: Arc::new(HrModule::with_fixtures()),
            names: Arc::new(NameCache::new(config.name_cache_ttl)),
            cookie_key: config.cookie_key.clone(),
            config: Arc::new(config),
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "workforce server listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let layer = CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);
    if allowed.is_empty() {
        // Credentials cannot be combined with a wildcard origin.
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_credentials(true)
            .allow_origin(AllowOrigin::list(allowed))
    }
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/login", post(session::login_handler))
        .route("/auth/logout", post(session::logout_handler))
        .route("/api/me", get(session::me_handler))
        .route("/api/attendance", get(tabs::attendance_handler))
        .route("/api/leave", get(tabs::leave_handler))
        .route("/api/schedule", get(tabs::schedule_handler))
        .route("/api/security", get(tabs::security_handler))
        .route("/api/organization", get(tabs::organization_handler))
        .route("/api/dashboard", get(tabs::dashboard_handler))
        .route("/api/charts/attendance.svg", get(tabs::attendance_chart_handler))
        .route("/api/charts/leave.svg", get(tabs::leave_chart_handler))
        .route(
            "/api/master/{kind}",
            get(master::list_handler).post(master::create_handler),
        )
        .route(
            "/api/master/{kind}/{id}",
            get(master::get_handler)
                .put(master::update_handler)
                .delete(master::delete_handler),
        )
        .route("/api/lookup/{kind}/{id}", get(master::lookup_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

/// Full application: the locale middleware runs ahead of routing so it can
/// rewrite prefixed paths.
pub fn build_app(state: AppState) -> Router {
    let i18n_config = Arc::new(state.config.i18n.clone());
    let routes = build_router(state);
    let localized = middleware::from_fn_with_state(i18n_config, i18n::localize).layer(routes);
    Router::new().fallback_service(localized)
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };

    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn state() -> AppState {
        let config = AppConfig::from_lookup(|key| match key {
            "COOKIE_SECRET_BASE64" => {
                Some("MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=".to_string())
            }
            "CORS_ALLOWED_ORIGINS" => Some("https://hr.example.com".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::new(config).unwrap()
    }

    #[tokio::test]
    async fn health_is_served() {
        let response = build_app(state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn allowed_origin_gets_credentialed_cors() {
        let request = Request::get("/health")
            .header(http::header::ORIGIN, "https://hr.example.com")
            .body(Body::empty())
            .unwrap();
        let response = build_app(state()).oneshot(request).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers.get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://hr.example.com"
        );
        assert_eq!(
            headers
                .get(http::header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }
}
