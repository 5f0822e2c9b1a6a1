use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use super::stream::BlockingAudioStream;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::realtime::TextInput;
use crate::resources;
use crate::transport::{RequestOptions, WebSocketOptions};
use crate::types::{
    AsrParams, AsrResponse, CreateVoiceParams, Credits, ListVoicesParams, Package,
    PaginatedResponse, TtsParams, UpdateVoiceParams, Voice,
};

const TEXT_FEED_CAPACITY: usize = 64;

/// Synchronous client backed by a private Tokio runtime.
///
/// Must not be used from inside an async context; use [`crate::FishAudio`]
/// there instead.
#[derive(Debug, Clone)]
pub struct FishAudio {
    inner: crate::FishAudio,
    runtime: Arc<Runtime>,
}

impl FishAudio {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::resolve(Some(api_key.into()))?)
    }

    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("fishaudio-blocking")
            .enable_all()
            .build()?;
        let inner = {
            let _guard = runtime.enter();
            crate::FishAudio::with_config(config)?
        };
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    pub fn tts(&self) -> TtsClient {
        TtsClient {
            inner: self.inner.tts(),
            runtime: Arc::clone(&self.runtime),
        }
    }

    pub fn asr(&self) -> AsrClient {
        AsrClient {
            inner: self.inner.asr(),
            runtime: Arc::clone(&self.runtime),
        }
    }

    pub fn voices(&self) -> VoicesClient {
        VoicesClient {
            inner: self.inner.voices(),
            runtime: Arc::clone(&self.runtime),
        }
    }

    pub fn account(&self) -> AccountClient {
        AccountClient {
            inner: self.inner.account(),
            runtime: Arc::clone(&self.runtime),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TtsClient {
    inner: resources::TtsClient,
    runtime: Arc<Runtime>,
}

impl TtsClient {
    pub fn convert(
        &self,
        text: impl Into<String>,
        params: &TtsParams,
        options: Option<&RequestOptions>,
    ) -> Result<BlockingAudioStream> {
        let stream = self
            .runtime
            .block_on(self.inner.convert(text, params, options))?;
        Ok(BlockingAudioStream::new(stream, Arc::clone(&self.runtime)))
    }

    pub fn convert_to_bytes(
        &self,
        text: impl Into<String>,
        params: &TtsParams,
        options: Option<&RequestOptions>,
    ) -> Result<Bytes> {
        self.runtime
            .block_on(self.inner.convert_to_bytes(text, params, options))
    }

    /// Live synthesis from a text iterator.
    ///
    /// The iterator is drained on a helper thread, so a slow producer (an LLM
    /// token feed, say) does not stall audio delivery.
    pub fn stream_websocket<I>(
        &self,
        text: I,
        params: &TtsParams,
        options: Option<WebSocketOptions>,
    ) -> Result<BlockingAudioStream>
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Into<TextInput>,
    {
        let (tx, rx) = mpsc::channel::<TextInput>(TEXT_FEED_CAPACITY);
        let items = text.into_iter();
        thread::Builder::new()
            .name("fishaudio-text-feed".into())
            .spawn(move || {
                for item in items {
                    if tx.blocking_send(item.into()).is_err() {
                        debug!("Live TTS session closed before text feed finished");
                        break;
                    }
                }
            })?;

        let stream = self.runtime.block_on(self.inner.stream_websocket(
            ReceiverStream::new(rx),
            params,
            options,
        ))?;
        Ok(BlockingAudioStream::new(stream, Arc::clone(&self.runtime)))
    }
}

#[derive(Debug, Clone)]
pub struct AsrClient {
    inner: resources::AsrClient,
    runtime: Arc<Runtime>,
}

impl AsrClient {
    pub fn transcribe(
        &self,
        audio: &[u8],
        params: &AsrParams,
        options: Option<&RequestOptions>,
    ) -> Result<AsrResponse> {
        self.runtime
            .block_on(self.inner.transcribe(audio, params, options))
    }
}

#[derive(Debug, Clone)]
pub struct VoicesClient {
    inner: resources::VoicesClient,
    runtime: Arc<Runtime>,
}

impl VoicesClient {
    pub fn list(
        &self,
        params: &ListVoicesParams,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedResponse<Voice>> {
        self.runtime.block_on(self.inner.list(params, options))
    }

    pub fn get(&self, voice_id: &str, options: Option<&RequestOptions>) -> Result<Voice> {
        self.runtime.block_on(self.inner.get(voice_id, options))
    }

    pub fn create(
        &self,
        params: CreateVoiceParams,
        options: Option<&RequestOptions>,
    ) -> Result<Voice> {
        self.runtime.block_on(self.inner.create(params, options))
    }

    pub fn update(
        &self,
        voice_id: &str,
        params: UpdateVoiceParams,
        options: Option<&RequestOptions>,
    ) -> Result<()> {
        self.runtime
            .block_on(self.inner.update(voice_id, params, options))
    }

    pub fn delete(&self, voice_id: &str, options: Option<&RequestOptions>) -> Result<()> {
        self.runtime.block_on(self.inner.delete(voice_id, options))
    }
}

#[derive(Debug, Clone)]
pub struct AccountClient {
    inner: resources::AccountClient,
    runtime: Arc<Runtime>,
}

impl AccountClient {
    pub fn get_credits(&self, options: Option<&RequestOptions>) -> Result<Credits> {
        self.runtime.block_on(self.inner.get_credits(options))
    }

    pub fn get_package(&self, options: Option<&RequestOptions>) -> Result<Package> {
        self.runtime.block_on(self.inner.get_package(options))
    }
}
