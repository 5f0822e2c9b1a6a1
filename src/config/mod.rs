//! Client configuration (explicit values > environment > defaults).

use std::fmt;
use std::time::Duration;

use crate::error::{FishAudioError, Result};

/// Default REST/WebSocket host.
pub const DEFAULT_BASE_URL: &str = "https://api.fish.audio";

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(240);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FISH_AUDIO_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "FISH_AUDIO_BASE_URL";

/// Connection settings shared by every resource client.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"..")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config from an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FishAudioError::Configuration(format!(
                "API key must be provided either as argument or via {API_KEY_ENV} environment variable"
            )));
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        })
    }

    /// Load from `FISH_AUDIO_API_KEY` / `FISH_AUDIO_BASE_URL` (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        Self::resolve(None)
    }

    /// Use `api_key` when given, otherwise fall back to the environment.
    pub fn resolve(api_key: Option<String>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default();
        let mut config = Self::new(api_key)?;

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn default_user_agent() -> String {
    format!("fish-audio/rust/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_uses_defaults() {
        let config = ClientConfig::new("key-123").unwrap();
        assert_eq!(config.api_key(), "key-123");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.user_agent().starts_with("fish-audio/rust/"));
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = ClientConfig::new("   ").unwrap_err();
        assert!(matches!(err, FishAudioError::Configuration(msg) if msg.contains(API_KEY_ENV)));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("k")
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = ClientConfig::new("super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
