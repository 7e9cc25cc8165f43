//! SRT rendering of recognized speech segments.
//!
//! Each entry is three lines (index, timing range, text) and entries are
//! separated by a single blank line:
//!
//! ```text
//! 1
//! 00:00:00,000 --> 00:00:02,500
//! Hello world
//! ```

use std::fmt;

use super::segment::Segment;

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;
const MILLIS_PER_SECOND: u64 = 1000;

/// Formats a position in seconds as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Milliseconds that round up to a full second carry into the seconds field,
/// cascading into minutes and hours. Negative and non-finite inputs render
/// as zero.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };

    let whole = seconds.floor();
    let mut total_seconds = whole as u64;
    let mut millis = ((seconds - whole) * MILLIS_PER_SECOND as f64).round() as u64;
    if millis >= MILLIS_PER_SECOND {
        total_seconds += 1;
        millis -= MILLIS_PER_SECOND;
    }

    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = total_seconds % SECONDS_PER_MINUTE;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// One numbered caption.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl SubtitleEntry {
    pub fn from_segment(index: usize, segment: &Segment) -> Self {
        Self {
            index,
            start: segment.start,
            end: segment.end,
            text: segment.trimmed_text().to_string(),
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            format_timestamp(self.start),
            format_timestamp(self.end)
        )?;
        writeln!(f, "{}", self.text)
    }
}

/// Ordered captions, numbered from 1 in segment order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleBlock {
    entries: Vec<SubtitleEntry>,
}

impl SubtitleBlock {
    /// Returns `None` when there is nothing to caption.
    pub fn from_segments(segments: &[Segment]) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        let entries = segments
            .iter()
            .enumerate()
            .map(|(position, segment)| SubtitleEntry::from_segment(position + 1, segment))
            .collect();

        Some(Self { entries })
    }

    pub fn entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SubtitleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Renders segments as SRT text. Absent or empty input yields `None`.
pub fn render_srt(segments: Option<&[Segment]>) -> Option<String> {
    segments
        .and_then(SubtitleBlock::from_segments)
        .map(|block| block.to_string())
}
