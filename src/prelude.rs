//! Convenience re-exports for common use.

pub use crate::client::FishAudio;
pub use crate::config::ClientConfig;
pub use crate::error::{FishAudioError, Result};
pub use crate::realtime::{FlushEvent, TextEvent, TextInput};
pub use crate::stream::AudioStream;
pub use crate::transport::{RequestOptions, WebSocketOptions};
pub use crate::types::{
    AsrParams, AudioFormat, LatencyMode, Model, Prosody, ReferenceAudio, TtsConfig, TtsParams,
};
