//! Client configuration

use std::time::Duration;

use crate::{ClientError, ClientResult};

/// Default backend address
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the order backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Session token sent as `Authorization: Bearer`
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Log level filter (e.g., "info", "toyart_client=debug")
    pub log_level: String,

    /// Emit JSON log lines instead of the pretty format
    pub log_json: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            log_level: "info".into(),
            log_json: false,
        }
    }

    /// Load the configuration from `TOYART_*` environment variables
    ///
    /// | variable | default |
    /// |----------|---------|
    /// | `TOYART_API_URL` | `http://localhost:3000` |
    /// | `TOYART_API_TOKEN` | none |
    /// | `TOYART_TIMEOUT_SECS` | `30` |
    /// | `TOYART_LOG_LEVEL` | `info` |
    /// | `TOYART_LOG_JSON` | `false` |
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let mut config =
            Self::new(lookup("TOYART_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()));

        if let Some(token) = lookup("TOYART_API_TOKEN").filter(|t| !t.trim().is_empty()) {
            config.token = Some(token);
        }
        if let Some(raw) = lookup("TOYART_TIMEOUT_SECS") {
            config.timeout = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("TOYART_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        if let Some(level) = lookup("TOYART_LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_json = lookup("TOYART_LOG_JSON")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        config.validate()?;
        Ok(config)
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn validate(&self) -> ClientResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("Timeout must be at least 1 second".into()));
        }
        Ok(())
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
