//! Async entry point.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::resources::{AccountClient, AsrClient, TtsClient, VoicesClient};
use crate::transport::HttpTransport;

/// Async Fish Audio client. Cheap to clone; clones share one connection pool.
///
/// ```no_run
/// # async fn demo() -> fishaudio::Result<()> {
/// use fishaudio::{FishAudio, TtsParams};
///
/// let client = FishAudio::new("your-api-key")?;
/// let audio = client
///     .tts()
///     .convert_to_bytes("Hello, world!", &TtsParams::default(), None)
///     .await?;
/// fishaudio::utils::save(&audio, "hello.mp3")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FishAudio {
    transport: Arc<HttpTransport>,
}

impl FishAudio {
    /// Client with an explicit API key and default settings. The base URL may
    /// still come from `FISH_AUDIO_BASE_URL`.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::resolve(Some(api_key.into()))?)
    }

    /// Client configured entirely from the environment.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Self {
        Self {
            transport: Arc::new(HttpTransport::with_client(config, client)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    pub fn tts(&self) -> TtsClient {
        TtsClient::new(Arc::clone(&self.transport))
    }

    pub fn asr(&self) -> AsrClient {
        AsrClient::new(Arc::clone(&self.transport))
    }

    pub fn voices(&self) -> VoicesClient {
        VoicesClient::new(Arc::clone(&self.transport))
    }

    pub fn account(&self) -> AccountClient {
        AccountClient::new(Arc::clone(&self.transport))
    }
}
