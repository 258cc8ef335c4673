//! In-memory storage of notes
use crate::access::{self, Denial};
use crate::errors::NoteStoreError;
use crate::event::{NoteEvent, EVENT_CHANNEL_CAPACITY};
use crate::notestore::StoreConfig;
use crate::{Address, Note, NoteID, NoteStore};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

const BACKUP_FILE_NAME: &str = "notepad_in_memory.json";

/// In-memory storage.
///
/// Every ID in `[1, next_id)` maps to exactly one note, live or deleted.
/// `owner_index` lists live notes only; since IDs grow monotonically,
/// ascending ID order is creation order.
#[derive(Debug, Serialize, Deserialize)]
struct InMemoryStoreInner {
    config: StoreConfig,
    notes: HashMap<NoteID, Note>,
    next_id: NoteID,
    owner_index: HashMap<Address, BTreeSet<NoteID>>,
}

impl InMemoryStoreInner {
    fn new(config: StoreConfig) -> Self {
        InMemoryStoreInner {
            config,
            notes: Default::default(),
            next_id: NoteID::new(1),
            owner_index: Default::default(),
        }
    }

    /// Generate a new [`NoteID`].
    fn get_new_noteid(&mut self) -> NoteID {
        let id = self.next_id;
        self.next_id = NoteID::new(id.get() + 1);
        id
    }

    /// Find a note that hasn't been deleted
    fn get_live_note(&self, id: NoteID) -> Result<&Note, NoteStoreError> {
        match self.notes.get(&id) {
            None => Err(NoteStoreError::NoteNotExist(id)),
            Some(note) if note.deleted => Err(NoteStoreError::NoteDeleted(id)),
            Some(note) => Ok(note),
        }
    }

    fn get_live_note_mut(&mut self, id: NoteID) -> Result<&mut Note, NoteStoreError> {
        match self.notes.get_mut(&id) {
            None => Err(NoteStoreError::NoteNotExist(id)),
            Some(note) if note.deleted => Err(NoteStoreError::NoteDeleted(id)),
            Some(note) => Ok(note),
        }
    }

    // The methods above are helper methods
    // The methods below are to implement the NoteStore interface
    fn add_note(&mut self, caller: Address, content: String) -> Result<NoteID, NoteStoreError> {
        if let Some(max) = self.config.max_content_length {
            let len = content.chars().count();
            if len > max {
                return Err(NoteStoreError::ContentTooLong(len, max));
            }
        }
        let id = self.get_new_noteid();
        assert!(!self.notes.contains_key(&id));
        self.notes.insert(id, Note::new(id, caller, content));
        self.owner_index.entry(caller).or_default().insert(id);
        Ok(id)
    }

    fn get_user_notes(&self, caller: &Address) -> Vec<NoteID> {
        self.owner_index
            .get(caller)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn get_shared_note(&self, id: NoteID, caller: &Address) -> Result<String, NoteStoreError> {
        let note = self.get_live_note(id)?;
        if !access::can_read(note, caller) {
            return Err(NoteStoreError::Unauthorized(id, Denial::Read));
        }
        Ok(note.content.clone())
    }

    fn delete_note(
        &mut self,
        id: NoteID,
        caller: &Address,
    ) -> Result<DateTime<Utc>, NoteStoreError> {
        let note = self.get_live_note_mut(id)?;
        if !access::can_delete(note, caller) {
            return Err(NoteStoreError::Unauthorized(id, Denial::Delete));
        }
        note.deleted = true;
        let modified_at = note.metadata.touch(Utc::now());
        let creator = note.creator;
        if let Some(ids) = self.owner_index.get_mut(&creator) {
            ids.remove(&id);
            if ids.is_empty() {
                self.owner_index.remove(&creator);
            }
        }
        Ok(modified_at)
    }

    fn update_sharing_settings(
        &mut self,
        id: NoteID,
        caller: &Address,
        is_public: bool,
        addresses: &[Address],
    ) -> Result<DateTime<Utc>, NoteStoreError> {
        let administrator = self.config.administrator;
        let note = self.get_live_note_mut(id)?;
        if !access::can_update_sharing(note, caller, &administrator) {
            return Err(NoteStoreError::Unauthorized(id, Denial::UpdateSharing));
        }
        note.is_public = is_public;
        note.shared_with.extend(addresses.iter().copied());
        Ok(note.metadata.touch(Utc::now()))
    }

    fn remove_shared_address(
        &mut self,
        id: NoteID,
        caller: &Address,
        address: &Address,
    ) -> Result<DateTime<Utc>, NoteStoreError> {
        let note = self.get_live_note_mut(id)?;
        if !access::can_remove_shared(note, caller) {
            return Err(NoteStoreError::Unauthorized(id, Denial::RemoveShared));
        }
        if !note.shared_with.remove(address) {
            return Err(NoteStoreError::NotShared(id, *address));
        }
        Ok(note.metadata.touch(Utc::now()))
    }

    fn backup<P: AsRef<Path>>(&self, path: P) -> Result<(), NoteStoreError> {
        let p = path.as_ref().join(BACKUP_FILE_NAME);

        let mut f = File::create(p).map_err(NoteStoreError::IOError)?;
        f.write_all(&serde_json::to_vec(&self).map_err(NoteStoreError::SerdeError)?)
            .map_err(NoteStoreError::IOError)?;
        Ok(())
    }

    fn restore<P: AsRef<Path>>(path: P) -> Result<Self, NoteStoreError> {
        let p = path.as_ref().join(BACKUP_FILE_NAME);
        let contents = fs::read_to_string(p).map_err(NoteStoreError::IOError)?;
        let inner: InMemoryStoreInner =
            serde_json::from_str(&contents).map_err(NoteStoreError::SerdeError)?;
        // Metadata of a newer schema can't be updated in place
        if let Some(newer) = inner.notes.values().find(|n| !n.metadata.is_supported()) {
            return Err(NoteStoreError::UnsupportedSchema(newer.metadata.schema_version));
        }
        Ok(inner)
    }
}

pub struct InMemoryStore {
    ims: RwLock<InMemoryStoreInner>,
    // Copy of `config.administrator`, which never changes after creation
    administrator: Address,
    events: broadcast::Sender<NoteEvent>,
}

impl InMemoryStore {
    /// A store with `administrator` and no bound on content length.
    pub fn new(administrator: Address) -> Self {
        Self::with_config(StoreConfig::new(administrator))
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::from_inner(InMemoryStoreInner::new(config))
    }

    fn from_inner(inner: InMemoryStoreInner) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        InMemoryStore {
            administrator: inner.config.administrator,
            ims: RwLock::new(inner),
            events,
        }
    }

    /// Publish an event of a committed operation.
    ///
    /// Called with the write lock held, so subscribers see events in commit order.
    fn publish(&self, event: NoteEvent) {
        debug!(?event, "publishing note event");
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl NoteStore for InMemoryStore {
    fn add_note(
        &self,
        caller: Address,
        content: String,
    ) -> BoxFuture<Result<NoteID, NoteStoreError>> {
        Box::pin(async move {
            let mut ims = self.ims.write().await;
            let id = ims.add_note(caller, content)?;
            info!(%id, creator = %caller, "note created");
            self.publish(NoteEvent::NoteCreated {
                id,
                creator: caller,
            });
            Ok(id)
        })
    }

    fn get_user_notes(&self, caller: Address) -> BoxFuture<Result<Vec<NoteID>, NoteStoreError>> {
        Box::pin(async move {
            let ims = self.ims.read().await;
            Ok(ims.get_user_notes(&caller))
        })
    }

    fn get_shared_note(
        &self,
        id: NoteID,
        caller: Address,
    ) -> BoxFuture<Result<String, NoteStoreError>> {
        Box::pin(async move {
            let ims = self.ims.read().await;
            ims.get_shared_note(id, &caller)
        })
    }

    fn delete_note(&self, id: NoteID, caller: Address) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let mut ims = self.ims.write().await;
            let modified_at = ims.delete_note(id, &caller)?;
            info!(%id, %modified_at, "note deleted");
            Ok(())
        })
    }

    fn update_sharing_settings(
        &self,
        id: NoteID,
        caller: Address,
        is_public: bool,
        addresses: Vec<Address>,
    ) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let mut ims = self.ims.write().await;
            let modified_at = ims.update_sharing_settings(id, &caller, is_public, &addresses)?;
            info!(
                %id,
                is_public,
                added = addresses.len(),
                %modified_at,
                "sharing settings updated"
            );
            self.publish(NoteEvent::NoteSharingUpdated {
                id,
                is_public,
                addresses,
            });
            Ok(())
        })
    }

    fn remove_shared_address(
        &self,
        id: NoteID,
        caller: Address,
        address: Address,
    ) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let mut ims = self.ims.write().await;
            let modified_at = ims.remove_shared_address(id, &caller, &address)?;
            info!(%id, %address, %modified_at, "shared address removed");
            self.publish(NoteEvent::NoteSharingRemoved { id, address });
            Ok(())
        })
    }

    fn administrator(&self) -> Address {
        self.administrator
    }

    fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.events.subscribe()
    }

    fn backup(&self, path: Box<dyn AsRef<Path> + Send>) -> BoxFuture<Result<(), NoteStoreError>> {
        Box::pin(async move {
            let ims = self.ims.read().await;
            ims.backup(&*path)
        })
    }

    fn restore<P: AsRef<Path>>(path: P) -> Result<Self, NoteStoreError> {
        Ok(Self::from_inner(InMemoryStoreInner::restore(path)?))
    }
}
