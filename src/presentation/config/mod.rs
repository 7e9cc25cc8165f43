mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_SPEECH_BASE_URL, DEFAULT_SPEECH_MODEL, LoggingSettings,
    ServerSettings, Settings, SettingsError, SpeechSettings, UploadSettings,
};
