use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{SpeechClient, SpeechClientError};
use crate::domain::{AudioUpload, Task, Transcript, TranscriptionOptions};
use crate::infrastructure::observability::sanitize_for_log;

const DEFAULT_FILE_NAME: &str = "audio";
const RESPONSE_FORMAT: &str = "verbose_json";

/// Client for the OpenAI audio transcription and translation endpoints.
pub struct OpenAiSpeechClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiSpeechClient {
    pub fn new(
        api_key: Option<String>,
        base_url: &str,
        model: impl Into<String>,
    ) -> Result<Self, SpeechClientError> {
        let api_key = api_key.ok_or(SpeechClientError::MissingApiKey)?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn endpoint(&self, task: Task) -> String {
        let operation = match task {
            Task::Transcribe => "transcriptions",
            Task::Translate => "translations",
        };
        format!("{}/audio/{}", self.base_url, operation)
    }

    fn form(
        &self,
        upload: &AudioUpload,
        options: &TranscriptionOptions,
    ) -> Result<multipart::Form, SpeechClientError> {
        let mut file_part = multipart::Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().unwrap_or(DEFAULT_FILE_NAME).to_string());
        if let Some(content_type) = upload.content_type() {
            file_part = file_part
                .mime_str(content_type)
                .map_err(|e| SpeechClientError::InvalidUpload(format!("mime: {}", e)))?;
        }

        let mut form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", RESPONSE_FORMAT);
        if let Some(language) = &options.language {
            form = form.text("language", language.clone());
        }

        Ok(form)
    }
}

#[derive(Deserialize)]
struct OpenAiErrorEnvelope {
    error: OpenAiErrorBody,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Prefers the `error.message` of an OpenAI error envelope over the raw body.
fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<OpenAiErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl SpeechClient for OpenAiSpeechClient {
    async fn recognize(
        &self,
        upload: &AudioUpload,
        options: &TranscriptionOptions,
    ) -> Result<Transcript, SpeechClientError> {
        let url = self.endpoint(options.task);
        let form = self.form(upload, options)?;

        tracing::debug!(
            url = %url,
            model = %self.model,
            bytes = upload.len(),
            language = options.language.as_deref().unwrap_or("auto"),
            "Sending audio to OpenAI speech API"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SpeechClientError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::warn!(
                status = status.as_u16(),
                body = %sanitize_for_log(&body),
                "OpenAI speech API returned an error"
            );
            return Err(SpeechClientError::Upstream {
                status: status.as_u16(),
                message: upstream_message(status, &body),
            });
        }

        let transcript: Transcript = response
            .json()
            .await
            .map_err(|e| SpeechClientError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            task = %options.task,
            chars = transcript.text.len(),
            segments = transcript.segments.as_ref().map_or(0, Vec::len),
            "OpenAI speech recognition completed"
        );

        Ok(transcript)
    }
}

