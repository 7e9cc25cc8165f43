mod speech_client;

pub use speech_client::{SpeechClient, SpeechClientError};
