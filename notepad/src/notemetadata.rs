//! Bookkeeping kept alongside every note.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written by this build.
///
/// A store refuses to restore notes whose metadata is of a newer schema.
pub const NOTE_METADATA_SCHEMA_VERSION: u64 = 0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteMetadata {
    pub schema_version: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl NoteMetadata {
    pub(crate) fn new(now: DateTime<Utc>) -> Self {
        NoteMetadata {
            schema_version: NOTE_METADATA_SCHEMA_VERSION,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.schema_version <= NOTE_METADATA_SCHEMA_VERSION
    }

    /// Record a change to the note at `now`.
    ///
    /// `modified_at` never moves backwards, even if the clock does.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.schema_version = NOTE_METADATA_SCHEMA_VERSION;
        self.modified_at = self.modified_at.max(now);
        self.modified_at
    }
}
