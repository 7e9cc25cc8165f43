use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A timed span of recognized speech, as returned by the speech service.
///
/// Fields other than `start`, `end` and `text` are kept in `extra` so the
/// segment serializes back to the same shape it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: Some(text.into()),
            extra: Map::new(),
        }
    }

    pub fn without_text(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            text: None,
            extra: Map::new(),
        }
    }

    /// Segment text with surrounding whitespace removed; empty when absent.
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// Reads an explicit JSON `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
