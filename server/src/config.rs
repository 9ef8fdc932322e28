use std::{fmt, time::Duration};

use anyhow::{Context, Result, anyhow};
use axum_extra::extract::cookie::Key;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use platform_backend::BackendConfig;

use crate::i18n::I18nConfig;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8081/api";
const DEFAULT_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub cookie_key: Key,
    /// Mark the session cookie `Secure`; only disable for plain-http dev setups.
    pub secure_cookies: bool,
    pub cors_allowed_origins: Vec<String>,
    pub i18n: I18nConfig,
    pub name_cache_ttl: Duration,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend_base_url", &self.backend.base_url)
            .field("secure_cookies", &self.secure_cookies)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("i18n", &self.i18n)
            .field("name_cache_ttl", &self.name_cache_ttl)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source; `load` reads the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = backend_config(&lookup)?;

        let cookie_secret = lookup("COOKIE_SECRET_BASE64").context("COOKIE_SECRET_BASE64 missing")?;
        let secret_bytes = STANDARD
            .decode(cookie_secret.trim())
            .context("invalid COOKIE_SECRET_BASE64")?;
        if secret_bytes.len() < 32 {
            return Err(anyhow!(
                "COOKIE_SECRET_BASE64 must decode to at least 32 bytes"
            ));
        }
        // HKDF expansion gives independent signing and encryption halves.
        let cookie_key = Key::derive_from(&secret_bytes);

        let secure_cookies = flag(&lookup, "COOKIE_SECURE").unwrap_or(true);

        let cors_allowed_origins = list(
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ORIGIN.into()),
        );

        let locales = list(&lookup("I18N_LOCALES").unwrap_or_else(|| "en,ar".into()));
        let default_locale = lookup("I18N_DEFAULT_LOCALE").unwrap_or_else(|| "en".into());
        let i18n = I18nConfig::new(
            flag(&lookup, "I18N_ENABLED").unwrap_or(false),
            default_locale.trim(),
            locales,
        )?;

        let name_cache_ttl = Duration::from_secs(number(&lookup, "NAME_CACHE_TTL_SECS")?.unwrap_or(300));

        Ok(Self {
            backend,
            cookie_key,
            secure_cookies,
            cors_allowed_origins,
            i18n,
            name_cache_ttl,
        })
    }
}

/// Backend settings alone; enough for commands that never serve HTTP.
pub fn backend_config(lookup: &impl Fn(&str) -> Option<String>) -> Result<BackendConfig> {
    let mut backend =
        BackendConfig::new(lookup("BACKEND_BASE_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.into()));
    if let Some(secs) = number(lookup, "BACKEND_TIMEOUT_SECS")? {
        backend.timeout = Duration::from_secs(secs);
    }
    backend.service_token = lookup("BACKEND_SERVICE_TOKEN").filter(|t| !t.trim().is_empty());
    Ok(backend)
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
}

fn number(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("{key} must be a whole number of seconds"))
        })
        .transpose()
}

fn list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
