//! Who may do what to a note.
//!
//! Each operation has its own rule over the caller, the note's creator and
//! the administrator of the store.
//! The administrator may change sharing settings of any note,
//! but may neither delete notes nor take addresses off a share set.
use crate::address::Address;
use crate::note::Note;
use std::fmt::{self, Display};

/// The rule that rejected a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Not the creator, the note isn't public and the caller isn't in the share set.
    Read,
    /// Neither the creator nor the administrator.
    UpdateSharing,
    /// Not the creator.
    Delete,
    /// Not the creator.
    RemoveShared,
}

impl Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Denial::Read => "You do not have access to this note",
            Denial::UpdateSharing => {
                "Only the creator or contract owner can update sharing settings"
            }
            Denial::Delete => "Only the creator can delete this note",
            Denial::RemoveShared => "Only the creator can remove sharing addresses",
        };
        f.write_str(reason)
    }
}

pub fn can_read(note: &Note, caller: &Address) -> bool {
    &note.creator == caller || note.is_public || note.shared_with.contains(caller)
}

pub fn can_update_sharing(note: &Note, caller: &Address, administrator: &Address) -> bool {
    &note.creator == caller || administrator == caller
}

pub fn can_delete(note: &Note, caller: &Address) -> bool {
    &note.creator == caller
}

pub fn can_remove_shared(note: &Note, caller: &Address) -> bool {
    &note.creator == caller
}
