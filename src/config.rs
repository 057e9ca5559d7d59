//! Backend connection settings.
//!
//! In the browser the base URL is baked in at compile time from
//! `LEDGERX_API_BASE`; an empty value means "same origin", which is what the
//! dev proxy expects. Native consumers read the same variables at runtime.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors produced while building an [`ApiConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is neither empty nor an `http(s)://` origin.
    #[error("invalid base URL '{0}': expected an http(s) origin or an empty value")]
    InvalidBaseUrl(String),

    /// A timeout variable is not a positive integer.
    #[error("invalid {var}: '{value}' is not a positive number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
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

/// Where and how the API client reaches the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin without a trailing slash, or empty for same-origin requests.
    pub base_url: String,
    /// Only honored by the native transport; the browser's fetch has no
    /// per-request timeout knob.
    pub timeouts: Timeouts,
}

impl ApiConfig {
    /// Build a config for `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value is not an
    /// `http(s)` origin.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: Timeouts::default() })
    }

    /// Config baked in at compile time. A malformed baked value falls back to
    /// same-origin requests.
    pub fn from_build_env() -> Self {
        match Self::new(option_env!("LEDGERX_API_BASE").unwrap_or_default()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using same-origin requests");
                Self::default()
            }
        }
    }

    /// Config read from the process environment.
    ///
    /// - `LEDGERX_API_BASE`: backend origin, empty for same-origin
    /// - `LEDGERX_REQUEST_TIMEOUT_SECS`: default 30
    /// - `LEDGERX_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&env_var("LEDGERX_API_BASE").unwrap_or_default())?;
        let timeouts = Timeouts {
            request_secs: parse_timeout(
                "LEDGERX_REQUEST_TIMEOUT_SECS",
                env_var("LEDGERX_REQUEST_TIMEOUT_SECS").as_deref(),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            connect_secs: parse_timeout(
                "LEDGERX_CONNECT_TIMEOUT_SECS",
                env_var("LEDGERX_CONNECT_TIMEOUT_SECS").as_deref(),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
        };
        Ok(Self { base_url, timeouts })
    }

    /// Absolute (or origin-relative) URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

pub(crate) fn parse_timeout(var: &'static str, raw: Option<&str>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidTimeout { var, value: raw.to_owned() }),
    }
}

/// Parse a log level name, defaulting to `info`.
pub fn log_level(raw: Option<&str>) -> log::Level {
    match raw.map(str::parse::<log::Level>) {
        Some(Ok(level)) => level,
        _ => log::Level::Info,
    }
}
