//! Notifications emitted by a note store.
use crate::{Address, NoteID};
use serde::{Deserialize, Serialize};

/// Capacity of the channel carrying [`NoteEvent`]s to subscribers.
///
/// A subscriber that falls further behind than this misses the oldest events.
pub const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// A committed change to a note store.
///
/// Events are published after the change is applied.
/// A failed operation never publishes anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum NoteEvent {
    NoteCreated {
        id: NoteID,
        creator: Address,
    },
    /// `addresses` is the list as requested, not the resulting share set.
    NoteSharingUpdated {
        id: NoteID,
        is_public: bool,
        addresses: Vec<Address>,
    },
    NoteSharingRemoved {
        id: NoteID,
        address: Address,
    },
}
