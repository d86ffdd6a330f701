use std::path::PathBuf;
use std::time::Duration;

use crate::errors::HostError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";
const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 60;

/// Runtime settings for the portal host, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub port: u16,
    /// Backend base URL without a trailing slash.
    pub backend_url: String,
    pub static_dir: PathBuf,
    pub proxy_timeout: Duration,
}

impl HostConfig {
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset or empty keys fall
    /// back to their defaults; set but unparseable keys are rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let backend_url = get("PORTAL_BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = backend_url.trim().trim_end_matches('/').to_string();
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(HostError::InvalidConfig {
                key: "PORTAL_BACKEND_URL",
                value: backend_url,
            });
        }

        let static_dir = get("PORTAL_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let timeout_secs = match get("PORTAL_PROXY_TIMEOUT_SECS") {
            Some(raw) => parse_number("PORTAL_PROXY_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_PROXY_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(HostError::InvalidConfig {
                key: "PORTAL_PROXY_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            port,
            backend_url,
            static_dir,
            proxy_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, HostError> {
    raw.trim().parse().map_err(|_| HostError::InvalidConfig {
        key,
        value: raw.to_string(),
    })
}
