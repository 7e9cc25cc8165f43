use super::task::Task;

/// Per-request controls for a recognition call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptionOptions {
    pub task: Task,
    /// Source-language hint, forwarded untouched.
    pub language: Option<String>,
    pub want_srt: bool,
}

impl TranscriptionOptions {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_srt(mut self, want_srt: bool) -> Self {
        self.want_srt = want_srt;
        self
    }
}
