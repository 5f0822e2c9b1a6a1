//! Speech-to-text.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use super::tts::MSGPACK;
use crate::error::Result;
use crate::transport::{HttpTransport, RequestOptions};
use crate::types::{AsrParams, AsrResponse};

#[derive(Serialize)]
struct AsrRequest<'a> {
    #[serde(with = "serde_bytes")]
    audio: &'a [u8],
    ignore_timestamps: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
}

/// `client.asr()`.
#[derive(Debug, Clone)]
pub struct AsrClient {
    transport: Arc<HttpTransport>,
}

impl AsrClient {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// Transcribe an audio file.
    pub async fn transcribe(
        &self,
        audio: &[u8],
        params: &AsrParams,
        options: Option<&RequestOptions>,
    ) -> Result<AsrResponse> {
        let body = rmp_serde::to_vec_named(&AsrRequest {
            audio,
            ignore_timestamps: !params.include_timestamps,
            language: params.language.as_deref(),
        })?;
        debug!(bytes = audio.len(), language = ?params.language, "ASR transcribe");

        let builder = self
            .transport
            .request(Method::POST, "/v1/asr")
            .header(CONTENT_TYPE, MSGPACK)
            .body(body);
        let response = self.transport.execute(builder, options).await?;
        Ok(response.json().await?)
    }
}
