//! Text-to-speech request models.

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::shared::{AudioFormat, LatencyMode, Model};
use crate::error::{FishAudioError, Result};

const MP3_BITRATES: [u32; 3] = [64, 128, 192];
const OPUS_BITRATES: [i32; 5] = [-1000, 24, 32, 48, 64];

/// A reference sample for instant voice cloning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceAudio {
    #[serde(with = "serde_bytes")]
    pub audio: Vec<u8>,
    /// Exact transcript of `audio`, punctuation included.
    pub text: String,
}

impl ReferenceAudio {
    pub fn new(audio: impl Into<Vec<u8>>, text: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            text: text.into(),
        }
    }
}

/// Speed (0.5–2.0) and volume in dB (-20–20).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prosody {
    pub speed: f64,
    pub volume: f64,
}

impl Default for Prosody {
    fn default() -> Self {
        Self {
            speed: 1.0,
            volume: 0.0,
        }
    }
}

impl Prosody {
    /// Override speed while keeping the volume of `base`.
    pub fn from_speed_override(speed: f64, base: Option<&Prosody>) -> Self {
        Self {
            speed,
            volume: base.map(|p| p.volume).unwrap_or(0.0),
        }
    }

    fn validate(&self) -> Result<()> {
        check_range("prosody.speed", self.speed, 0.5, 2.0)?;
        check_range("prosody.volume", self.volume, -20.0, 20.0)
    }
}

/// Reusable synthesis defaults. Create once, pass to many calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TtsConfig {
    pub format: AudioFormat,
    /// `None` lets the server pick the format's default rate.
    pub sample_rate: Option<u32>,
    /// 64, 128 or 192 kbps.
    pub mp3_bitrate: u32,
    /// -1000 (auto), 24, 32, 48 or 64 kbps.
    pub opus_bitrate: i32,
    pub normalize: bool,
    /// Characters per generation chunk, 100–300.
    pub chunk_length: u32,
    pub latency: LatencyMode,
    pub reference_id: Option<String>,
    pub references: Vec<ReferenceAudio>,
    pub prosody: Option<Prosody>,
    pub top_p: f64,
    pub temperature: f64,
    pub max_new_tokens: u32,
    pub repetition_penalty: f64,
    pub min_chunk_length: u32,
    pub condition_on_previous_chunks: bool,
    pub early_stop_threshold: f64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            format: AudioFormat::Mp3,
            sample_rate: None,
            mp3_bitrate: 128,
            opus_bitrate: 32,
            normalize: true,
            chunk_length: 200,
            latency: LatencyMode::Balanced,
            reference_id: None,
            references: Vec::new(),
            prosody: None,
            top_p: 0.7,
            temperature: 0.7,
            max_new_tokens: 1024,
            repetition_penalty: 1.2,
            min_chunk_length: 50,
            condition_on_previous_chunks: true,
            early_stop_threshold: 1.0,
        }
    }
}

impl TtsConfig {
    /// Materialize a request for `text` using these settings.
    pub fn to_request(&self, text: impl Into<String>) -> TtsRequest {
        TtsRequest {
            text: text.into(),
            chunk_length: self.chunk_length,
            format: self.format,
            sample_rate: self.sample_rate,
            mp3_bitrate: self.mp3_bitrate,
            opus_bitrate: self.opus_bitrate,
            references: self.references.clone(),
            reference_id: self.reference_id.clone(),
            normalize: self.normalize,
            latency: self.latency,
            prosody: self.prosody,
            top_p: self.top_p,
            temperature: self.temperature,
            max_new_tokens: self.max_new_tokens,
            repetition_penalty: self.repetition_penalty,
            min_chunk_length: self.min_chunk_length,
            condition_on_previous_chunks: self.condition_on_previous_chunks,
            early_stop_threshold: self.early_stop_threshold,
        }
    }
}

/// Wire payload for `/v1/tts` and the `start` frame of a streaming session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TtsRequest {
    pub text: String,
    pub chunk_length: u32,
    pub format: AudioFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    pub mp3_bitrate: u32,
    pub opus_bitrate: i32,
    pub references: Vec<ReferenceAudio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub normalize: bool,
    pub latency: LatencyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prosody: Option<Prosody>,
    pub top_p: f64,
    pub temperature: f64,
    pub max_new_tokens: u32,
    pub repetition_penalty: f64,
    pub min_chunk_length: u32,
    pub condition_on_previous_chunks: bool,
    pub early_stop_threshold: f64,
}

impl Default for TtsRequest {
    fn default() -> Self {
        TtsConfig::default().to_request(String::new())
    }
}

impl TtsRequest {
    /// Check the documented parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(100..=300).contains(&self.chunk_length) {
            return Err(FishAudioError::Validation(format!(
                "chunk_length must be between 100 and 300, got {}",
                self.chunk_length
            )));
        }
        if !MP3_BITRATES.contains(&self.mp3_bitrate) {
            return Err(FishAudioError::Validation(format!(
                "mp3_bitrate must be one of {MP3_BITRATES:?}, got {}",
                self.mp3_bitrate
            )));
        }
        if !OPUS_BITRATES.contains(&self.opus_bitrate) {
            return Err(FishAudioError::Validation(format!(
                "opus_bitrate must be one of {OPUS_BITRATES:?}, got {}",
                self.opus_bitrate
            )));
        }
        check_range("top_p", self.top_p, 0.0, 1.0)?;
        check_range("temperature", self.temperature, 0.0, 1.0)?;
        if let Some(prosody) = &self.prosody {
            prosody.validate()?;
        }
        Ok(())
    }
}

/// Per-call overrides layered on top of a [`TtsConfig`].
///
/// Any override that is set wins over the matching config value.
///
/// ```
/// use fishaudio::types::{AudioFormat, TtsParams};
///
/// let params = TtsParams::builder()
///     .format(AudioFormat::Wav)
///     .speed(1.25)
///     .build();
/// let request = params.resolve("Hello").unwrap();
/// assert_eq!(request.format, AudioFormat::Wav);
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct TtsParams {
    pub reference_id: Option<String>,
    pub references: Option<Vec<ReferenceAudio>>,
    pub format: Option<AudioFormat>,
    pub latency: Option<LatencyMode>,
    /// Speed multiplier; keeps the configured volume.
    pub speed: Option<f64>,
    #[builder(default)]
    pub config: TtsConfig,
    #[builder(default)]
    pub model: Model,
}

impl TtsParams {
    /// Build and validate the request for `text`.
    pub fn resolve(&self, text: impl Into<String>) -> Result<TtsRequest> {
        let mut request = self.config.to_request(text);

        if let Some(reference_id) = &self.reference_id {
            request.reference_id = Some(reference_id.clone());
        }
        if let Some(references) = &self.references {
            request.references = references.clone();
        }
        if let Some(format) = self.format {
            request.format = format;
        }
        if let Some(latency) = self.latency {
            request.latency = latency;
        }
        if let Some(speed) = self.speed {
            request.prosody = Some(Prosody::from_speed_override(
                speed,
                self.config.prosody.as_ref(),
            ));
        }

        request.validate()?;
        Ok(request)
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(FishAudioError::Validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
