//! Speech-to-text models.

use serde::{Deserialize, Serialize};

/// A timestamped span of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AsrSegment {
    pub text: String,
    /// Seconds from the start of the audio.
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AsrResponse {
    pub text: String,
    /// Audio duration in milliseconds.
    pub duration: f64,
    /// Empty when timestamps were not requested.
    #[serde(default)]
    pub segments: Vec<AsrSegment>,
}

/// Options for `POST /v1/asr`.
#[derive(Debug, Clone, bon::Builder)]
pub struct AsrParams {
    /// Language code such as `en`; auto-detected when unset.
    #[builder(into)]
    pub language: Option<String>,
    #[builder(default = true)]
    pub include_timestamps: bool,
}

impl Default for AsrParams {
    fn default() -> Self {
        Self::builder().build()
    }
}
