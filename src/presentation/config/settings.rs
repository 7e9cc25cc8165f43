use config::builder::DefaultState;
use config::{
    Config, ConfigBuilder, ConfigError, Environment as EnvironmentSource, File, FileFormat,
};
use serde::Deserialize;

use super::Environment;

pub const DEFAULT_SPEECH_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SPEECH_MODEL: &str = "whisper-1";
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub speech: SpeechSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Deserialize)]
pub struct SpeechSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl std::fmt::Debug for SpeechSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("environment: {0}")]
    Environment(String),
}

impl Settings {
    /// Layers defaults, `appsettings.{env}.toml` and `APP_*` variables.
    ///
    /// `OPENAI_API_KEY` fills `speech.api_key` when no key is configured.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let builder = Self::defaults()?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut settings = Self::build(builder)?;
        if settings.speech.api_key.is_none() {
            settings.speech.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        Ok(settings)
    }

    /// Defaults overlaid with an inline TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, SettingsError> {
        Self::build(Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("speech.base_url", DEFAULT_SPEECH_BASE_URL)?
            .set_default("speech.model", DEFAULT_SPEECH_MODEL)?
            .set_default("upload.max_body_bytes", DEFAULT_MAX_BODY_BYTES as i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.speech.api_key = settings
            .speech
            .api_key
            .take()
            .filter(|key| !key.trim().is_empty());
        Ok(settings)
    }
}
