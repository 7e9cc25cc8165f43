mod audio_upload;
mod segment;
pub mod subtitle;
mod task;
mod transcript;
mod transcription_options;

pub use audio_upload::AudioUpload;
pub use segment::Segment;
pub use subtitle::{SubtitleBlock, SubtitleEntry, format_timestamp, render_srt};
pub use task::Task;
pub use transcript::Transcript;
pub use transcription_options::TranscriptionOptions;
