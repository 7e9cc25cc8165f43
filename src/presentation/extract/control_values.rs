use axum::http::HeaderMap;

use crate::domain::{Task, TranscriptionOptions};

use super::UploadError;

pub const TASK_HEADER: &str = "x-task";
pub const LANGUAGE_HEADER: &str = "x-language";
pub const WANT_SRT_HEADER: &str = "x-want-srt";

pub const TASK_FIELD: &str = "task";
pub const LANGUAGE_FIELD: &str = "language";
pub const WANT_SRT_FIELD: &str = "want_srt";

/// Raw control values from one source (form fields or headers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlValues {
    pub task: Option<String>,
    pub language: Option<String>,
    pub want_srt: Option<String>,
}

impl ControlValues {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };

        Self {
            task: read(TASK_HEADER),
            language: read(LANGUAGE_HEADER),
            want_srt: read(WANT_SRT_HEADER),
        }
    }

    /// Records a form field; returns `false` for names that are not controls.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            TASK_FIELD => &mut self.task,
            LANGUAGE_FIELD => &mut self.language,
            WANT_SRT_FIELD => &mut self.want_srt,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Fills blank values from `fallback`. Values present here win.
    pub fn or(self, fallback: ControlValues) -> Self {
        Self {
            task: non_blank(self.task).or_else(|| non_blank(fallback.task)),
            language: non_blank(self.language).or_else(|| non_blank(fallback.language)),
            want_srt: non_blank(self.want_srt).or_else(|| non_blank(fallback.want_srt)),
        }
    }

    pub fn into_options(self) -> Result<TranscriptionOptions, UploadError> {
        let task = match non_blank(self.task) {
            Some(raw) => raw.parse::<Task>().map_err(UploadError::InvalidTask)?,
            None => Task::default(),
        };

        Ok(TranscriptionOptions {
            task,
            language: non_blank(self.language),
            want_srt: self.want_srt.as_deref().is_some_and(parse_flag),
        })
    }
}

/// Accepts `true`, `1` and `yes` in any case.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
