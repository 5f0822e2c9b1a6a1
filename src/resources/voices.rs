//! Voice model management under `/model`.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{debug, info};

use crate::error::Result;
use crate::transport::{HttpTransport, RequestOptions};
use crate::types::{
    CreateVoiceParams, ListVoicesParams, PaginatedResponse, UpdateVoiceParams, Voice,
};

/// `client.voices()`.
#[derive(Debug, Clone)]
pub struct VoicesClient {
    transport: Arc<HttpTransport>,
}

impl VoicesClient {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// One page of voices matching `params`.
    pub async fn list(
        &self,
        params: &ListVoicesParams,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedResponse<Voice>> {
        let builder = self
            .transport
            .request(Method::GET, "/model")
            .query(&params.to_query());
        let response = self.transport.execute(builder, options).await?;
        Ok(response.json().await?)
    }

    pub async fn get(&self, voice_id: &str, options: Option<&RequestOptions>) -> Result<Voice> {
        let builder = self
            .transport
            .request(Method::GET, &format!("/model/{voice_id}"));
        let response = self.transport.execute(builder, options).await?;
        Ok(response.json().await?)
    }

    /// Clone a voice from one or more audio samples.
    pub async fn create(
        &self,
        params: CreateVoiceParams,
        options: Option<&RequestOptions>,
    ) -> Result<Voice> {
        debug!(title = %params.title, samples = params.voices.len(), "Creating voice");
        let mut form = Form::new()
            .text("title", params.title)
            .text("description", params.description)
            .text("visibility", params.visibility.to_string())
            .text("type", "tts")
            .text("train_mode", params.train_mode.to_string());
        for text in params.texts {
            form = form.text("texts", text);
        }
        for tag in params.tags {
            form = form.text("tags", tag);
        }
        form = form.text(
            "enhance_audio_quality",
            params.enhance_audio_quality.to_string(),
        );
        for (index, audio) in params.voices.into_iter().enumerate() {
            form = form.part("voices", Part::bytes(audio).file_name(format!("voice_{index}")));
        }
        if let Some(cover) = params.cover_image {
            form = form.part("cover_image", Part::bytes(cover).file_name("cover_image"));
        }

        let builder = self
            .transport
            .request(Method::POST, "/model")
            .multipart(form);
        let response = self.transport.execute(builder, options).await?;
        let voice: Voice = response.json().await?;
        info!(voice_id = %voice.id, "Voice created");
        Ok(voice)
    }

    /// Change metadata of an existing voice. Only set fields are sent.
    pub async fn update(
        &self,
        voice_id: &str,
        params: UpdateVoiceParams,
        options: Option<&RequestOptions>,
    ) -> Result<()> {
        let fields = params.form_fields();
        let builder = self
            .transport
            .request(Method::PATCH, &format!("/model/{voice_id}"));
        let builder = match params.cover_image {
            Some(cover) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value))
                    .part("cover_image", Part::bytes(cover).file_name("cover_image"));
                builder.multipart(form)
            }
            None => builder.form(&fields),
        };
        self.transport.execute(builder, options).await?;
        Ok(())
    }

    pub async fn delete(&self, voice_id: &str, options: Option<&RequestOptions>) -> Result<()> {
        let builder = self
            .transport
            .request(Method::DELETE, &format!("/model/{voice_id}"));
        self.transport.execute(builder, options).await?;
        info!(voice_id = %voice_id, "Voice deleted");
        Ok(())
    }
}
