//! HTTP and WebSocket plumbing shared by the resource clients.

pub mod http;
pub mod options;
pub mod websocket;

pub use http::HttpTransport;
pub use options::RequestOptions;
pub use websocket::{websocket_url, WebSocketOptions};

use std::future::Future;
use std::time::Duration;

use crate::error::FishAudioError;

/// Wrap a future with a timeout.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, FishAudioError>>,
) -> Result<T, FishAudioError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(FishAudioError::Timeout(duration.as_millis() as u64)),
    }
}
