//! Note record and presentation helpers.
//!
//! # Invariants
//! - Serialized field names are `id`, `title`, `description`, `imageUri`,
//!   `date`; every field is a required string.
//! - `date` is an ISO 8601 UTC timestamp supplied by the caller.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Opaque note identifier.
pub type NoteId = String;

/// One photo note as stored in the collection blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Display title. Non-empty by caller contract; the store does not check.
    pub title: String,
    pub description: String,
    /// Local file path or content URI of the photo, passed through untouched.
    pub image_uri: String,
    /// Creation time, or last-modification time after an edit.
    pub date: String,
}

impl Note {
    /// Builds a note with a fresh id stamped with the current UTC time.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_note_id(),
            title: title.into(),
            description: description.into(),
            image_uri: image_uri.into(),
            date: now_iso8601(),
        }
    }

    /// Parses `date`, returning `None` for values that are not RFC 3339.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|value| value.with_timezone(&Utc))
    }
}

/// Returns a new time-ordered note id.
pub fn generate_note_id() -> NoteId {
    Uuid::now_v7().to_string()
}

/// Returns the current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sorts notes newest first by `date`, the order the list screen shows.
///
/// Ties keep their stored order. Notes whose `date` does not parse go last.
pub fn sort_by_date_desc(notes: &mut [Note]) {
    notes.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
