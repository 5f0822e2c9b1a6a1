//! Enums and envelopes shared across resources.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// TTS model, sent as the `model` header.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
pub enum Model {
    #[serde(rename = "speech-1.5")]
    #[strum(serialize = "speech-1.5")]
    Speech1_5,
    #[serde(rename = "speech-1.6")]
    #[strum(serialize = "speech-1.6")]
    Speech1_6,
    #[default]
    #[serde(rename = "s1")]
    #[strum(serialize = "s1")]
    S1,
}

/// Audio container/codec of synthesized output.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Pcm,
    #[default]
    Mp3,
    Opus,
}

/// Generation mode: `Normal` favours quality, `Balanced` favours latency.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LatencyMode {
    Normal,
    #[default]
    Balanced,
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    #[default]
    Private,
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrainMode {
    #[default]
    Fast,
}

/// Lifecycle of a voice model on the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelState {
    Created,
    Training,
    Trained,
    Failed,
}

/// `svc` is singing voice conversion, `tts` is text-to-speech.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceType {
    Svc,
    Tts,
}

/// Sort order for voice listings.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoiceSortBy {
    #[default]
    TaskCount,
    CreatedAt,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    /// Total number of items across all pages.
    pub total: u64,
    pub items: Vec<T>,
}
