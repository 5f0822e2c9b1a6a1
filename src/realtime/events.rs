//! Frames exchanged on the `/v1/tts/live` socket.
//!
//! Every frame is a MessagePack map with an `event` key.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;

use crate::error::Result;
use crate::types::TtsRequest;

/// Client-to-server frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ClientEvent {
    /// Opens synthesis with the full request configuration.
    Start { request: TtsRequest },
    Text { text: String },
    /// Synthesize whatever text is buffered now.
    Flush,
    /// No more text will follow.
    #[serde(rename = "stop")]
    Close,
}

impl ClientEvent {
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}

/// A chunk of text to synthesize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEvent {
    pub text: String,
}

impl TextEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Marker asking the server to synthesize buffered text immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushEvent;

/// One item of the text stream fed to a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    Text(TextEvent),
    Flush(FlushEvent),
}

impl From<TextEvent> for TextInput {
    fn from(event: TextEvent) -> Self {
        Self::Text(event)
    }
}

impl From<FlushEvent> for TextInput {
    fn from(event: FlushEvent) -> Self {
        Self::Flush(event)
    }
}

impl From<String> for TextInput {
    fn from(text: String) -> Self {
        Self::Text(TextEvent { text })
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        Self::Text(TextEvent::new(text))
    }
}

impl From<TextInput> for ClientEvent {
    fn from(input: TextInput) -> Self {
        match input {
            TextInput::Text(TextEvent { text }) => ClientEvent::Text { text },
            TextInput::Flush(_) => ClientEvent::Flush,
        }
    }
}

/// Why the server ended the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Error,
}

/// Server-to-client frames after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    Audio(Bytes),
    Finish(FinishReason),
    /// Anything the client does not act on.
    Unknown(String),
}

#[derive(Debug, Deserialize)]
struct RawServerFrame {
    event: String,
    #[serde(default)]
    audio: Option<ByteBuf>,
    #[serde(default)]
    reason: Option<String>,
}

impl ServerEvent {
    /// Decode one binary frame.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let frame: RawServerFrame = rmp_serde::from_slice(payload)?;
        Ok(match frame.event.as_str() {
            "audio" => match frame.audio {
                Some(audio) => Self::Audio(Bytes::from(audio.into_vec())),
                None => Self::Unknown(frame.event),
            },
            "finish" => match frame.reason.as_deref() {
                Some("stop") => Self::Finish(FinishReason::Stop),
                Some("error") => Self::Finish(FinishReason::Error),
                _ => Self::Unknown(frame.event),
            },
            _ => Self::Unknown(frame.event),
        })
    }
}
