use crate::canvas::SurfaceError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named, timestamped snapshot of the whole bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSketch {
    /// Creation time in Unix milliseconds, as a decimal string
    pub id: String,
    pub name: String,
    /// `data:image/png;base64,...`
    #[serde(rename = "dataURL")]
    pub data_url: String,
    /// ISO-8601 UTC creation time
    pub date: String,
}

impl SavedSketch {
    pub fn new(id: String, name: impl Into<String>, data_url: String, date: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            data_url,
            date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Parsed creation time, if the stored string is a valid timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|date| date.with_timezone(&Utc))
    }
}

#[derive(Debug, Error)]
pub enum SketchError {
    #[error("no saved sketch with id '{0}'")]
    NotFound(String),

    #[error("sketch name must not be empty")]
    EmptyName,

    #[error("drawing surface has no bitmap to save")]
    NothingToSave,

    #[error("failed to persist sketches")]
    PersistFailed,

    #[error("failed to decode sketch: {0}")]
    Decode(#[from] SurfaceError),
}
