//! Core types of Notepad.
use crate::address::Address;
use crate::notemetadata::NoteMetadata;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

/// ID of notes.
///
/// In a given note store ([`crate::notestore`]), IDs are handed out sequentially
/// starting from 1 and are never reused, not even after a note is deleted.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Clone, Copy, Hash)]
#[serde(transparent)]
pub struct NoteID {
    id: u64,
}

impl NoteID {
    pub const fn new(id: u64) -> Self {
        NoteID { id }
    }

    pub fn get(&self) -> u64 {
        self.id
    }
}

impl From<u64> for NoteID {
    fn from(id: u64) -> NoteID {
        NoteID::new(id)
    }
}

impl From<NoteID> for u64 {
    fn from(id: NoteID) -> u64 {
        id.id
    }
}

impl FromStr for NoteID {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(NoteID::new)
    }
}

impl Display for NoteID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A stored note.
///
/// A note has exactly one creator, who decides who else can read it
/// through the public flag and the share set.
/// Deleted notes are kept as tombstones so that their IDs stay taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub(crate) id: NoteID,
    pub(crate) creator: Address,
    pub(crate) content: String,
    pub(crate) is_public: bool,
    pub(crate) shared_with: HashSet<Address>,
    pub(crate) deleted: bool,
    pub(crate) metadata: NoteMetadata,
}

impl Note {
    pub(crate) fn new(id: NoteID, creator: Address, content: String) -> Self {
        Note {
            id,
            creator,
            content,
            is_public: false,
            shared_with: HashSet::new(),
            deleted: false,
            metadata: NoteMetadata::new(Utc::now()),
        }
    }

    pub fn get_creator(&self) -> Address {
        self.creator
    }

    pub fn get_content(&self) -> &str {
        &self.content
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn get_shared_with(&self) -> &HashSet<Address> {
        &self.shared_with
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn get_metadata(&self) -> &NoteMetadata {
        &self.metadata
    }
}
