//! Session handling. Tokens are issued by the backend; this side only keeps
//! them in an encrypted cookie and forwards them upstream.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::{
    WithRejection,
    cookie::{Cookie, PrivateCookieJar, SameSite},
};
use entity::{Credentials, SessionUser};
use platform_api::{ApiError, ApiResult};
use time::Duration as TimeDuration;
use tracing::info;

use crate::http::AppState;

pub const SESSION_COOKIE: &str = "wf_session";
const SESSION_HOURS: i64 = 12;

/// Token to forward to the backend: the caller's bearer header, else the
/// session cookie. `None` lets the backend client fall back to its service
/// token.
#[derive(Clone, Debug, Default)]
pub struct BackendToken(pub Option<String>);

impl BackendToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

impl FromRequestParts<AppState> for BackendToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer(&parts.headers) {
            return Ok(Self(Some(token)));
        }
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        Ok(Self(
            jar.get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string()),
        ))
    }
}

pub async fn login_handler(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    WithRejection(Json(credentials), _): WithRejection<Json<Credentials>, ApiError>,
) -> ApiResult<(PrivateCookieJar, Json<SessionUser>)> {
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(ApiError::invalid("username and password are required"));
    }
    let login = state.backend.auth().login(&credentials).await?;
    let cookie = Cookie::build((SESSION_COOKIE, login.token))
        .path("/")
        .http_only(true)
        .secure(state.config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::hours(SESSION_HOURS))
        .build();
    info!(user = %login.user.username, "user signed in");
    Ok((jar.add(cookie), Json(login.user)))
}

pub async fn logout_handler(jar: PrivateCookieJar) -> (PrivateCookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (jar, StatusCode::NO_CONTENT)
}

pub async fn me_handler(
    State(state): State<AppState>,
    token: BackendToken,
) -> ApiResult<Json<SessionUser>> {
    let token = token.0.ok_or(ApiError::Unauthorized)?;
    let user = state.backend.auth().me(&token).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(bearer(&headers("Bearer abc")), Some("abc".into()));
        assert_eq!(bearer(&headers("bearer  abc ")), Some("abc".into()));
    }

    #[test]
    fn other_schemes_are_ignored() {
        assert_eq!(bearer(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer(&headers("Bearer ")), None);
        assert_eq!(bearer(&HeaderMap::new()), None);
    }
}
