use std::sync::Arc;

use crate::application::ports::SpeechClient;
use crate::application::services::TranscriptionService;

pub struct AppState<S>
where
    S: SpeechClient + ?Sized,
{
    pub transcription_service: Arc<TranscriptionService<S>>,
    pub max_body_bytes: usize,
}

impl<S> AppState<S>
where
    S: SpeechClient + ?Sized,
{
    pub fn new(speech_client: Arc<S>, max_body_bytes: usize) -> Self {
        Self {
            transcription_service: Arc::new(TranscriptionService::new(speech_client)),
            max_body_bytes,
        }
    }
}

impl<S> Clone for AppState<S>
where
    S: SpeechClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            max_body_bytes: self.max_body_bytes,
        }
    }
}
