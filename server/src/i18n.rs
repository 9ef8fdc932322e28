//! Locale-prefixed routing.
//!
//! Disabled by default. When enabled, `/{locale}/...` is rewritten to `/...`
//! before routing and the chosen locale travels as a [`Locale`] extension.

use std::sync::Arc;

use anyhow::{Result, bail};
use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue, Uri,
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE},
        uri::PathAndQuery,
    },
    middleware::Next,
    response::Response,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct I18nConfig {
    pub enabled: bool,
    pub default_locale: String,
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            default_locale: "en".into(),
            locales: vec!["en".into()],
        }
    }
}

impl I18nConfig {
    pub fn new(enabled: bool, default_locale: &str, locales: Vec<String>) -> Result<Self> {
        let locales: Vec<String> = locales.into_iter().map(|l| l.to_lowercase()).collect();
        let default_locale = default_locale.to_lowercase();
        if !locales.contains(&default_locale) {
            bail!(
                "default locale `{default_locale}` is not one of the supported locales ({})",
                locales.join(", ")
            );
        }
        Ok(Self {
            enabled,
            default_locale,
            locales,
        })
    }

    fn supported(&self, candidate: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|locale| locale.eq_ignore_ascii_case(candidate))
            .map(String::as_str)
    }

    /// Split a leading locale segment off `uri`, keeping the query intact.
    fn strip_prefix(&self, uri: &Uri) -> Option<(String, Uri)> {
        let rest = uri.path().strip_prefix('/')?;
        let (first, tail) = match rest.split_once('/') {
            Some((first, tail)) => (first, format!("/{tail}")),
            None => (rest, "/".to_string()),
        };
        let locale = self.supported(first)?.to_string();
        let path_and_query = match uri.query() {
            Some(query) => format!("{tail}?{query}"),
            None => tail,
        };
        let mut parts = uri.clone().into_parts();
        parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
        Uri::from_parts(parts).ok().map(|uri| (locale, uri))
    }

    /// First supported primary language in `Accept-Language`, in written order.
    fn negotiate(&self, headers: &HeaderMap) -> String {
        headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| {
                raw.split(',').find_map(|part| {
                    let tag = part.split(';').next()?.trim();
                    let primary = tag.split('-').next()?;
                    self.supported(primary)
                })
            })
            .unwrap_or(self.default_locale.as_str())
            .to_string()
    }
}

/// The locale a request is served in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale(pub String);

pub async fn localize(
    State(config): State<Arc<I18nConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let locale = if config.enabled {
        match config.strip_prefix(request.uri()) {
            Some((locale, uri)) => {
                *request.uri_mut() = uri;
                locale
            }
            None => config.negotiate(request.headers()),
        }
    } else {
        config.default_locale.clone()
    };
    request.extensions_mut().insert(Locale(locale.clone()));
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&locale) {
        response.headers_mut().insert(CONTENT_LANGUAGE, value);
    }
    response
}
