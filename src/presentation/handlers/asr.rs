use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::SpeechClient;
use crate::application::services::TranscriptionOutcome;
use crate::domain::{Segment, Task};
use crate::presentation::error::ApiError;
use crate::presentation::extract::AudioUploadRequest;
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct AsrResponse {
    pub task: Task,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

impl From<TranscriptionOutcome> for AsrResponse {
    fn from(outcome: TranscriptionOutcome) -> Self {
        Self {
            task: outcome.task,
            text: outcome.text,
            srt: outcome.srt,
            segments: outcome.segments,
        }
    }
}

#[tracing::instrument(
    skip(state, request),
    fields(task = %request.options.task, bytes = request.audio.len())
)]
pub async fn asr_handler<S>(
    State(state): State<AppState<S>>,
    request: AudioUploadRequest,
) -> Result<Json<AsrResponse>, ApiError>
where
    S: SpeechClient + ?Sized + 'static,
{
    let outcome = state
        .transcription_service
        .transcribe(&request.audio, &request.options)
        .await?;

    tracing::info!(
        chars = outcome.text.len(),
        srt = outcome.srt.is_some(),
        "Recognition request served"
    );

    Ok(Json(outcome.into()))
}

/// Answers every non-POST method on the recognition route.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
