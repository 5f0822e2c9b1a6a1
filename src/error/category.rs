//! Error classification and recovery hints.

/// Broad error category for routing recovery logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Permission,
    NotFound,
    RateLimit,
    Server,
    Api,
    WebSocket,
    Network,
    Timeout,
    Configuration,
    Validation,
    Dependency,
    Serialization,
    Unknown,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    RetryWithBackoff,
    CheckCredentials,
    CheckConfiguration,
    CheckResourceId,
    IncreaseTimeout,
    InstallDependency,
    OpenNewSession,
    ContactSupport,
}
