//! Error types for the Fish Audio client.

pub mod category;

pub use category::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all Fish Audio operations.
#[derive(Error, Debug)]
pub enum FishAudioError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 401 from the API.
    #[error("HTTP {status}: {message}")]
    Authentication {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// 403 from the API.
    #[error("HTTP {status}: {message}")]
    PermissionDenied {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// 404 from the API.
    #[error("HTTP {status}: {message}")]
    NotFound {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// 429 from the API.
    #[error("HTTP {status}: {message}")]
    RateLimited {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// Any 5xx from the API.
    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// Any other non-2xx status.
    #[error("HTTP {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// Streaming session failure: handshake rejection, server error frame or
    /// an unexpected disconnect.
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required dependency: {dependency}\nInstall it with: {install_command}")]
    Dependency {
        dependency: String,
        install_command: String,
    },

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("MessagePack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("MessagePack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl FishAudioError {
    /// Build the typed error for a non-2xx HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>, body: Option<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Authentication {
                status,
                message,
                body,
            },
            403 => Self::PermissionDenied {
                status,
                message,
                body,
            },
            404 => Self::NotFound {
                status,
                message,
                body,
            },
            429 => Self::RateLimited {
                status,
                message,
                body,
            },
            500.. => Self::Server {
                status,
                message,
                body,
            },
            _ => Self::Api {
                status,
                message,
                body,
            },
        }
    }

    /// HTTP status carried by API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::PermissionDenied { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Server { status, .. }
            | Self::Api { status, .. } => Some(*status),
            Self::Network(error) => error.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body for API errors, when one was returned.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Authentication { body, .. }
            | Self::PermissionDenied { body, .. }
            | Self::NotFound { body, .. }
            | Self::RateLimited { body, .. }
            | Self::Server { body, .. }
            | Self::Api { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication { .. } => ErrorCategory::Authentication,
            Self::PermissionDenied { .. } => ErrorCategory::Permission,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Server { .. } => ErrorCategory::Server,
            Self::Api { .. } => ErrorCategory::Api,
            Self::WebSocket(_) => ErrorCategory::WebSocket,
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Dependency { .. } => ErrorCategory::Dependency,
            Self::Serialization(_) | Self::Encode(_) | Self::Decode(_) => {
                ErrorCategory::Serialization
            }
            Self::Io(_) | Self::Playback(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether the caller may reasonably retry. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication | ErrorCategory::Permission => {
                RecoverySuggestion::CheckCredentials
            }
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryWithBackoff
            }
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration | ErrorCategory::Validation => {
                RecoverySuggestion::CheckConfiguration
            }
            ErrorCategory::Dependency => RecoverySuggestion::InstallDependency,
            ErrorCategory::NotFound => RecoverySuggestion::CheckResourceId,
            ErrorCategory::WebSocket => RecoverySuggestion::OpenNewSession,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FishAudioError>;
