//! Tests for the error system.

use fishaudio::error::*;

#[test]
fn status_codes_map_to_variants() {
    assert!(matches!(
        FishAudioError::from_status(401, "bad key", None),
        FishAudioError::Authentication { status: 401, .. }
    ));
    assert!(matches!(
        FishAudioError::from_status(403, "forbidden", None),
        FishAudioError::PermissionDenied { .. }
    ));
    assert!(matches!(
        FishAudioError::from_status(404, "missing", None),
        FishAudioError::NotFound { .. }
    ));
    assert!(matches!(
        FishAudioError::from_status(429, "slow down", None),
        FishAudioError::RateLimited { .. }
    ));
    assert!(matches!(
        FishAudioError::from_status(502, "bad gateway", None),
        FishAudioError::Server { .. }
    ));
    assert!(matches!(
        FishAudioError::from_status(422, "invalid", Some("{}".into())),
        FishAudioError::Api { status: 422, .. }
    ));
}

#[test]
fn api_errors_render_status_and_message() {
    let err = FishAudioError::from_status(404, "Voice not found", Some("raw".into()));
    assert_eq!(err.to_string(), "HTTP 404: Voice not found");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.body(), Some("raw"));
}

#[test]
fn dependency_error_carries_install_hint() {
    let err = FishAudioError::Dependency {
        dependency: "mpv".into(),
        install_command: "brew install mpv".into(),
    };
    assert_eq!(
        err.to_string(),
        "Missing required dependency: mpv\nInstall it with: brew install mpv"
    );
    assert_eq!(err.recovery_suggestion(), RecoverySuggestion::InstallDependency);
}

#[test]
fn error_helper_mappings_are_stable_for_major_variants() {
    struct Case {
        error: FishAudioError,
        expected_category: ErrorCategory,
        expected_retryable: bool,
        expected_recovery: RecoverySuggestion,
    }

    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        Case {
            error: FishAudioError::from_status(401, "bad key", None),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckCredentials,
        },
        Case {
            error: FishAudioError::from_status(429, "later", None),
            expected_category: ErrorCategory::RateLimit,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: FishAudioError::from_status(404, "gone", None),
            expected_category: ErrorCategory::NotFound,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckResourceId,
        },
        Case {
            error: FishAudioError::Timeout(5000),
            expected_category: ErrorCategory::Timeout,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::IncreaseTimeout,
        },
        Case {
            error: FishAudioError::Configuration("bad-config".to_string()),
            expected_category: ErrorCategory::Configuration,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckConfiguration,
        },
        Case {
            error: FishAudioError::WebSocket("WebSocket stream ended with error".into()),
            expected_category: ErrorCategory::WebSocket,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::OpenNewSession,
        },
        Case {
            error: FishAudioError::Network(network_error),
            expected_category: ErrorCategory::Network,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: FishAudioError::Serialization(serde_error),
            expected_category: ErrorCategory::Serialization,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
    ];

    for case in cases {
        assert_eq!(case.error.category(), case.expected_category, "{}", case.error);
        assert_eq!(case.error.is_retryable(), case.expected_retryable, "{}", case.error);
        assert_eq!(
            case.error.recovery_suggestion(),
            case.expected_recovery,
            "{}",
            case.error
        );
    }
}
