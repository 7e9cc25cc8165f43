use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_directive: String,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            json_format: logging.json,
            default_directive: format!(
                "{level},asr_relay={level},tower_http={level}",
                level = logging.level
            ),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            json_format: false,
            default_directive: "info,asr_relay=debug,tower_http=debug".to_string(),
        }
    }
}
