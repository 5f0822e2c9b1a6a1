//! WebSocket connection options and handshake.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::{connect_async_with_config, MaybeTlsStream, WebSocketStream};
use tracing::info;

use super::http::HttpTransport;
use super::with_timeout;
use crate::error::{FishAudioError, Result};

pub(crate) type TtsWebSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const DEFAULT_KEEPALIVE_PING_INTERVAL: Duration = Duration::from_secs(20);
pub const DEFAULT_KEEPALIVE_PING_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_MAX_MESSAGE_SIZE_BYTES: usize = 65_536;
pub const DEFAULT_QUEUE_SIZE: usize = 512;

/// Tuning knobs for a streaming session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSocketOptions {
    /// Interval between client pings; `None` or zero disables keepalive.
    pub keepalive_ping_interval: Option<Duration>,
    /// Extra grace period after a ping before the connection counts as dead.
    pub keepalive_ping_timeout: Duration,
    /// Largest inbound message accepted from the server.
    pub max_message_size_bytes: usize,
    /// Inbound frames buffered before the socket stops being read.
    pub queue_size: usize,
}

impl Default for WebSocketOptions {
    fn default() -> Self {
        Self {
            keepalive_ping_interval: Some(DEFAULT_KEEPALIVE_PING_INTERVAL),
            keepalive_ping_timeout: DEFAULT_KEEPALIVE_PING_TIMEOUT,
            max_message_size_bytes: DEFAULT_MAX_MESSAGE_SIZE_BYTES,
            queue_size: DEFAULT_QUEUE_SIZE,
        }
    }
}

impl WebSocketOptions {
    pub fn with_keepalive_ping_interval(mut self, interval: Duration) -> Self {
        self.keepalive_ping_interval = Some(interval);
        self
    }

    pub fn without_keepalive(mut self) -> Self {
        self.keepalive_ping_interval = None;
        self
    }

    pub fn with_keepalive_ping_timeout(mut self, timeout: Duration) -> Self {
        self.keepalive_ping_timeout = timeout;
        self
    }

    pub fn with_max_message_size_bytes(mut self, bytes: usize) -> Self {
        self.max_message_size_bytes = bytes;
        self
    }

    pub fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size;
        self
    }

    /// Ping period, if keepalive is on.
    pub(crate) fn ping_interval(&self) -> Option<Duration> {
        self.keepalive_ping_interval
            .filter(|interval| !interval.is_zero())
    }

    /// Longest silence tolerated from the server, if keepalive is on.
    pub(crate) fn idle_limit(&self) -> Option<Duration> {
        self.ping_interval()
            .map(|interval| interval + self.keepalive_ping_timeout)
    }

    pub(crate) fn protocol_config(&self) -> WebSocketConfig {
        let mut config = WebSocketConfig::default();
        config.max_message_size = Some(self.max_message_size_bytes);
        config.max_frame_size = Some(self.max_message_size_bytes);
        config
    }
}

/// Turn the HTTP base URL into its WebSocket counterpart.
pub fn websocket_url(base_url: &str, path: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let rest = if let Some(rest) = trimmed.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("ws://{rest}")
    } else if trimmed.starts_with("wss://") || trimmed.starts_with("ws://") {
        trimmed.to_string()
    } else {
        return Err(FishAudioError::Configuration(format!(
            "Unsupported base URL scheme: {base_url}"
        )));
    };
    Ok(format!("{rest}{path}"))
}

/// Open an authenticated socket to `path`, sending `model` as a header.
pub(crate) async fn connect(
    transport: &HttpTransport,
    path: &str,
    model: &str,
    options: &WebSocketOptions,
) -> Result<TtsWebSocket> {
    let url = websocket_url(transport.config().base_url(), path)?;
    let mut request = url.as_str().into_client_request().map_err(|error| {
        FishAudioError::Configuration(format!("Invalid websocket URL: {error}"))
    })?;

    for (name, value) in transport.default_headers().iter() {
        request.headers_mut().insert(name.clone(), value.clone());
    }
    let model_value = HeaderValue::from_str(model)
        .map_err(|error| FishAudioError::Configuration(format!("Invalid model header: {error}")))?;
    request.headers_mut().insert("model", model_value);

    info!(url = %url, model = %model, "WebSocket connecting");
    let connect = async {
        connect_async_with_config(request, Some(options.protocol_config()), false)
            .await
            .map(|(socket, _)| socket)
            .map_err(map_connect_error)
    };
    let socket = with_timeout(transport.config().timeout(), connect).await?;
    info!(url = %url, "WebSocket connected");
    Ok(socket)
}

fn map_connect_error(error: WsError) -> FishAudioError {
    match error {
        WsError::Http(response) => FishAudioError::WebSocket(format!(
            "WebSocket handshake rejected with status {}",
            response.status().as_u16()
        )),
        WsError::Url(error) => {
            FishAudioError::Configuration(format!("Invalid websocket URL: {error}"))
        }
        other => FishAudioError::WebSocket(format!("WebSocket connect failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_schemes_map_to_websocket_schemes() {
        assert_eq!(
            websocket_url("https://api.fish.audio", "/v1/tts/live").unwrap(),
            "wss://api.fish.audio/v1/tts/live"
        );
        assert_eq!(
            websocket_url("http://127.0.0.1:8080/", "/v1/tts/live").unwrap(),
            "ws://127.0.0.1:8080/v1/tts/live"
        );
        assert_eq!(
            websocket_url("ws://localhost", "/x").unwrap(),
            "ws://localhost/x"
        );
    }

    #[test]
    fn unknown_scheme_is_a_configuration_error() {
        let err = websocket_url("ftp://example.com", "/v1/tts/live").unwrap_err();
        assert!(matches!(err, FishAudioError::Configuration(_)));
    }

    #[test]
    fn defaults_match_documented_values() {
        let options = WebSocketOptions::default();
        assert_eq!(options.keepalive_ping_interval, Some(Duration::from_secs(20)));
        assert_eq!(options.max_message_size_bytes, 65_536);
        assert_eq!(options.queue_size, 512);
        assert_eq!(options.idle_limit(), Some(Duration::from_secs(40)));
        assert_eq!(options.clone().without_keepalive().idle_limit(), None);
    }

    #[test]
    fn zero_ping_interval_disables_keepalive() {
        let options = WebSocketOptions::default().with_keepalive_ping_interval(Duration::ZERO);
        assert_eq!(options.ping_interval(), None);
        assert_eq!(options.idle_limit(), None);
    }

    #[test]
    fn protocol_config_applies_message_limit() {
        let config = WebSocketOptions::default()
            .with_max_message_size_bytes(1024)
            .protocol_config();
        assert_eq!(config.max_message_size, Some(1024));
        assert_eq!(config.max_frame_size, Some(1024));
    }
}
