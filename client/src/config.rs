//! Client configuration: routing conventions and native transport settings.
//!
//! `SessionConfig` carries the path conventions the session client relies on
//! (login page, API prefix, post-login landing page). `ClientConfig` adds
//! the settings only a native host needs and is parsed from environment
//! variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL `{0}`: expected http:// or https://")]
    InvalidBaseUrl(String),
    #[error("invalid {var} `{value}`: must start with '/'")]
    InvalidPath { var: &'static str, value: String },
}

/// Path conventions shared by the browser and native hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub login_path: String,
    pub api_prefix: String,
    pub default_landing: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            default_landing: DEFAULT_LANDING_PATH.to_owned(),
        }
    }
}

impl SessionConfig {
    /// `true` when `target` addresses the data API rather than a page.
    ///
    /// `/api`, `/api/...` and `/api?...` match; `/apis` and `/dashboard` do not.
    #[must_use]
    pub fn is_api_target(&self, target: &str) -> bool {
        let prefix = self.api_prefix.trim_end_matches('/');
        match target.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
    pub session_file: PathBuf,
    pub session: SessionConfig,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `PFM_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `PFM_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PFM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PFM_SESSION_FILE`: default `$HOME/.pfm/session.json`
    /// - `PFM_LOGIN_PATH`: default `/login`
    /// - `PFM_API_PREFIX`: default `/api`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-HTTP base URL or a path setting
    /// that is not absolute.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("PFM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let timeouts = Timeouts {
            request_secs: parse_u64(lookup("PFM_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("PFM_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        let session_file = lookup("PFM_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_session_file(lookup("HOME")));

        let session = SessionConfig {
            login_path: absolute_path("PFM_LOGIN_PATH", lookup("PFM_LOGIN_PATH"), DEFAULT_LOGIN_PATH)?,
            api_prefix: absolute_path("PFM_API_PREFIX", lookup("PFM_API_PREFIX"), DEFAULT_API_PREFIX)?,
            default_landing: DEFAULT_LANDING_PATH.to_owned(),
        };

        Ok(Self { base_url, timeouts, session_file, session })
    }
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn absolute_path(var: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_owned());
    if value.starts_with('/') {
        Ok(value)
    } else {
        Err(ConfigError::InvalidPath { var, value })
    }
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(".pfm").join("session.json"),
        None => PathBuf::from(".pfm-session.json"),
    }
}
