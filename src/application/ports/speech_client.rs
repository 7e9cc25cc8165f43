use async_trait::async_trait;

use crate::domain::{AudioUpload, Transcript, TranscriptionOptions};

/// Remote speech-recognition service.
#[async_trait]
pub trait SpeechClient: Send + Sync {
    async fn recognize(
        &self,
        upload: &AudioUpload,
        options: &TranscriptionOptions,
    ) -> Result<Transcript, SpeechClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechClientError {
    #[error("speech api key is not configured")]
    MissingApiKey,
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
