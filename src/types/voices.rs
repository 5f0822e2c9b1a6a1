//! Voice model types and request parameters.

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{ModelState, TrainMode, VoiceSortBy, VoiceType, Visibility};

/// Demo clip attached to a voice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub title: String,
    pub text: String,
    pub task_id: String,
    /// URL of the clip.
    pub audio: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub nickname: String,
    pub avatar: String,
}

/// A voice model. Its `id` is what TTS calls take as `reference_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voice {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type")]
    pub voice_type: VoiceType,
    pub title: String,
    pub description: String,
    pub cover_image: String,
    pub train_mode: TrainMode,
    pub state: ModelState,
    pub tags: Vec<String>,
    pub samples: Vec<Sample>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub languages: Vec<String>,
    pub visibility: Visibility,
    pub lock_visibility: bool,
    pub like_count: u64,
    pub mark_count: u64,
    pub shared_count: u64,
    pub task_count: u64,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub marked: bool,
    pub author: Author,
}

/// Filters for `GET /model`.
#[derive(Debug, Clone, Builder)]
pub struct ListVoicesParams {
    #[builder(default = 10)]
    pub page_size: u32,
    #[builder(default = 1)]
    pub page_number: u32,
    pub title: Option<String>,
    #[builder(default)]
    pub tags: Vec<String>,
    /// Only return the caller's own voices.
    #[builder(default)]
    pub self_only: bool,
    pub author_id: Option<String>,
    #[builder(default)]
    pub languages: Vec<String>,
    #[builder(default)]
    pub title_languages: Vec<String>,
    #[builder(default)]
    pub sort_by: VoiceSortBy,
}

impl Default for ListVoicesParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ListVoicesParams {
    /// Query pairs in wire order; list filters repeat their key.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page_size".to_string(), self.page_size.to_string()),
            ("page_number".to_string(), self.page_number.to_string()),
        ];
        if let Some(title) = &self.title {
            query.push(("title".into(), title.clone()));
        }
        query.extend(self.tags.iter().map(|tag| ("tag".to_string(), tag.clone())));
        query.push(("self".into(), self.self_only.to_string()));
        if let Some(author_id) = &self.author_id {
            query.push(("author_id".into(), author_id.clone()));
        }
        query.extend(
            self.languages
                .iter()
                .map(|language| ("language".to_string(), language.clone())),
        );
        query.extend(
            self.title_languages
                .iter()
                .map(|language| ("title_language".to_string(), language.clone())),
        );
        query.push(("sort_by".into(), self.sort_by.to_string()));
        query
    }
}

/// Fields for cloning a new voice from audio samples.
#[derive(Debug, Clone, Builder)]
pub struct CreateVoiceParams {
    #[builder(into)]
    pub title: String,
    /// Raw audio files, one multipart part each.
    pub voices: Vec<Vec<u8>>,
    #[builder(default)]
    pub description: String,
    /// Transcripts matching `voices`, in order.
    #[builder(default)]
    pub texts: Vec<String>,
    #[builder(default)]
    pub tags: Vec<String>,
    #[builder(default)]
    pub visibility: Visibility,
    #[builder(default)]
    pub train_mode: TrainMode,
    #[builder(default = true)]
    pub enhance_audio_quality: bool,
    pub cover_image: Option<Vec<u8>>,
}

/// Partial update; unset fields are not sent.
#[derive(Debug, Clone, Default, Builder)]
pub struct UpdateVoiceParams {
    #[builder(into)]
    pub title: Option<String>,
    #[builder(into)]
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<Vec<u8>>,
}

impl UpdateVoiceParams {
    /// Text fields as form pairs, tags repeated.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title".to_string(), title.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description".to_string(), description.clone()));
        }
        if let Some(visibility) = self.visibility {
            fields.push(("visibility".to_string(), visibility.to_string()));
        }
        if let Some(tags) = &self.tags {
            fields.extend(tags.iter().map(|tag| ("tags".to_string(), tag.clone())));
        }
        fields
    }
}
