use std::sync::Arc;

use crate::application::ports::{SpeechClient, SpeechClientError};
use crate::domain::{AudioUpload, Segment, Task, TranscriptionOptions, render_srt};

pub struct TranscriptionService<S>
where
    S: SpeechClient + ?Sized,
{
    speech_client: Arc<S>,
}

impl<S> TranscriptionService<S>
where
    S: SpeechClient + ?Sized,
{
    pub fn new(speech_client: Arc<S>) -> Self {
        Self { speech_client }
    }

    /// Runs one recognition call and renders subtitles when requested.
    pub async fn transcribe(
        &self,
        upload: &AudioUpload,
        options: &TranscriptionOptions,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let transcript = self.speech_client.recognize(upload, options).await?;

        let srt = if options.want_srt {
            render_srt(transcript.segments.as_deref())
        } else {
            None
        };

        tracing::debug!(
            task = %options.task,
            chars = transcript.text.len(),
            segments = transcript.segments.as_ref().map_or(0, Vec::len),
            srt = srt.is_some(),
            "Recognition finished"
        );

        Ok(TranscriptionOutcome {
            task: options.task,
            text: transcript.text,
            srt,
            segments: transcript.segments,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionOutcome {
    pub task: Task,
    pub text: String,
    pub srt: Option<String>,
    pub segments: Option<Vec<Segment>>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("speech service: {0}")]
    Speech(#[from] SpeechClientError),
}
