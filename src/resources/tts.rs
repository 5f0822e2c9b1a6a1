//! Text-to-speech over HTTP and the live WebSocket.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::debug;

use crate::error::{FishAudioError, Result};
use crate::realtime::session;
use crate::realtime::TextInput;
use crate::stream::AudioStream;
use crate::transport::{HttpTransport, RequestOptions, WebSocketOptions};
use crate::types::TtsParams;

pub(crate) const MSGPACK: &str = "application/msgpack";

/// `client.tts()`.
#[derive(Debug, Clone)]
pub struct TtsClient {
    transport: Arc<HttpTransport>,
}

impl TtsClient {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Synthesize `text` in one request and stream back the audio.
    ///
    /// Empty transport chunks are dropped.
    pub async fn convert(
        &self,
        text: impl Into<String>,
        params: &TtsParams,
        options: Option<&RequestOptions>,
    ) -> Result<AudioStream> {
        let request = params.resolve(text)?;
        let body = rmp_serde::to_vec_named(&request)?;
        debug!(
            model = %params.model,
            format = %request.format,
            chars = request.text.chars().count(),
            "TTS convert"
        );

        let builder = self
            .transport
            .request(Method::POST, "/v1/tts")
            .header(CONTENT_TYPE, MSGPACK)
            .header("model", params.model.to_string())
            .body(body);
        let response = self.transport.execute(builder, options).await?;

        let chunks = response.bytes_stream().filter_map(|chunk| async move {
            match chunk {
                Ok(bytes) if bytes.is_empty() => None,
                Ok(bytes) => Some(Ok(bytes)),
                Err(error) => Some(Err(FishAudioError::from(error))),
            }
        });
        Ok(AudioStream::new(chunks))
    }

    /// Convenience over [`TtsClient::convert`] that buffers the whole file.
    pub async fn convert_to_bytes(
        &self,
        text: impl Into<String>,
        params: &TtsParams,
        options: Option<&RequestOptions>,
    ) -> Result<bytes::Bytes> {
        self.convert(text, params, options)
            .await?
            .collect_audio()
            .await
    }

    /// Feed a stream of text (and flush markers) to the live endpoint while
    /// audio streams back.
    ///
    /// ```no_run
    /// # async fn demo() -> fishaudio::Result<()> {
    /// use futures::StreamExt;
    /// use fishaudio::{FishAudio, TtsParams};
    ///
    /// let client = FishAudio::from_env()?;
    /// let text = futures::stream::iter(["Hello, ", "world!"]);
    /// let mut audio = client
    ///     .tts()
    ///     .stream_websocket(text, &TtsParams::default(), None)
    ///     .await?;
    /// while let Some(chunk) = audio.next().await {
    ///     let _bytes = chunk?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn stream_websocket<S>(
        &self,
        text: S,
        params: &TtsParams,
        options: Option<WebSocketOptions>,
    ) -> Result<AudioStream>
    where
        S: Stream + Send + 'static,
        S::Item: Into<TextInput>,
    {
        let request = params.resolve(String::new())?;
        session::open(
            &self.transport,
            params.model,
            request,
            text,
            options.unwrap_or_default(),
        )
        .await
    }
}
