//! Storage backends of notes.
use crate::errors::NoteStoreError;
use crate::event::NoteEvent;
use crate::{Address, NoteID};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::broadcast;

mod in_memory;
#[cfg(test)]
mod tests;
pub mod util;

pub use in_memory::InMemoryStore;

pub type BoxedNoteStore = Box<dyn NoteStore>;

/// Settings fixed when a store is created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// May update the sharing settings of every note.
    pub administrator: Address,
    /// Longest accepted note content, in characters. `None` means unbounded.
    pub max_content_length: Option<usize>,
}

impl StoreConfig {
    pub fn new(administrator: Address) -> Self {
        StoreConfig {
            administrator,
            max_content_length: None,
        }
    }

    pub fn with_max_content_length(mut self, max_content_length: usize) -> Self {
        self.max_content_length = Some(max_content_length);
        self
    }
}

/// An abstraction for storage backends.
///
/// Every operation is atomic: it either commits completely, or fails and leaves the store
/// exactly as it was.
/// Operations on the same store are totally ordered.
pub trait NoteStore: Send + Sync {
    /// Create a new note owned by `caller`.
    ///
    /// IDs are assigned sequentially across the whole store, starting from 1.
    /// Publishes [`NoteEvent::NoteCreated`].
    fn add_note(
        &self,
        caller: Address,
        content: String,
    ) -> BoxFuture<Result<NoteID, NoteStoreError>>;
    /// IDs of the notes `caller` created and hasn't deleted, in creation order.
    fn get_user_notes(&self, caller: Address) -> BoxFuture<Result<Vec<NoteID>, NoteStoreError>>;
    /// Read the content of a note on behalf of `caller`.
    ///
    /// Existence and deletion are checked before access,
    /// so a caller without access still learns whether a note exists or was deleted.
    fn get_shared_note(
        &self,
        id: NoteID,
        caller: Address,
    ) -> BoxFuture<Result<String, NoteStoreError>>;
    /// Delete a note.
    ///
    /// Only the creator can delete a note.
    /// The note is kept as a tombstone so that its ID is never handed out again,
    /// but it disappears from the creator's list of notes.
    fn delete_note(&self, id: NoteID, caller: Address) -> BoxFuture<Result<(), NoteStoreError>>;
    /// Replace the public flag and add `addresses` to the share set.
    ///
    /// The creator and the administrator can do this.
    /// The share set only ever grows here; use [`NoteStore::remove_shared_address`] to shrink it.
    /// Publishes [`NoteEvent::NoteSharingUpdated`] with `addresses` as given.
    fn update_sharing_settings(
        &self,
        id: NoteID,
        caller: Address,
        is_public: bool,
        addresses: Vec<Address>,
    ) -> BoxFuture<Result<(), NoteStoreError>>;
    /// Take `address` off the share set of a note.
    ///
    /// Only the creator can do this.
    /// Publishes [`NoteEvent::NoteSharingRemoved`].
    fn remove_shared_address(
        &self,
        id: NoteID,
        caller: Address,
        address: Address,
    ) -> BoxFuture<Result<(), NoteStoreError>>;
    /// The administrator configured at creation.
    fn administrator(&self) -> Address;
    /// Receive every event published after this call.
    fn subscribe(&self) -> broadcast::Receiver<NoteEvent>;
    /// Backup the storage to a folder on some filesystem.
    fn backup(&self, path: Box<dyn AsRef<Path> + Send>) -> BoxFuture<Result<(), NoteStoreError>>;
    /// Restore the storage from a folder on some filesystem.
    fn restore<P: AsRef<Path>>(path: P) -> Result<Self, NoteStoreError>
    where
        Self: Sized;
}
