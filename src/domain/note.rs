//! Note record as it crosses the record-store wire.

use crate::domain::NoteId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single note record.
///
/// Notes are stored individually in the record store, keyed by their id.
/// The struct mirrors the JSON wire format used by the app (camelCase
/// field names, RFC 3339 timestamps). Updates overwrite the full record;
/// this layer performs no merging.
///
/// At most one note should carry `scratchpad: true`. The adapter
/// maintains that invariant when seeding, but does not police records
/// written by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, also the storage key for this record.
    pub id: NoteId,

    /// Plain text / markdown body.
    pub text: String,

    /// Owning category id. Empty string means uncategorized.
    #[serde(default)]
    pub category: String,

    /// Whether the note is pinned to the favorites list.
    #[serde(default)]
    pub favorite: bool,

    /// Whether this is the distinguished scratchpad note.
    #[serde(default)]
    pub scratchpad: bool,

    /// When the note was created.
    pub created: DateTime<Utc>,

    /// When the note was last updated.
    pub last_updated: DateTime<Utc>,
}

impl Note {
    /// Creates an uncategorized note with a fresh id and current
    /// timestamps.
    pub fn new(text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            text: text.into(),
            category: String::new(),
            favorite: false,
            scratchpad: false,
            created: now,
            last_updated: now,
        }
    }
}
