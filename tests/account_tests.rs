mod common;

use common::test_client;
use fishaudio::FishAudioError;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn credits_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wallet/self/api-credit"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "credit-1",
            "user_id": "user-1",
            "credit": "99.75",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z",
            "has_free_credit": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let credits = client
        .account()
        .get_credits(None)
        .await
        .expect("credits should load");
    assert_eq!(credits.id, "credit-1");
    assert_eq!(credits.credit.as_str(), "99.75");
    assert_eq!(credits.has_free_credit, Some(false));
    assert_eq!(credits.has_phone_sha256, None);
}

#[tokio::test]
async fn package_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wallet/self/package"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "pkg-1",
            "user_id": "user-1",
            "type": "monthly",
            "total": 1000,
            "balance": 250,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-02-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let package = client
        .account()
        .get_package(None)
        .await
        .expect("package should load");
    assert_eq!(package.package_type, "monthly");
    assert_eq!(package.balance, 250);
    assert_eq!(package.finished_at, None);
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wallet/self/api-credit"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.account().get_credits(None).await.unwrap_err();
    assert!(matches!(err, FishAudioError::Server { status: 503, .. }));
    assert!(err.is_retryable());
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}
