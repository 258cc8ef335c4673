//! Requests against a note store, in a serializable form.
//!
//! Drivers that receive requests as data (e.g., JSON over HTTP) parse them into an
//! [`Operation`] and [`dispatch`] it. Anything that isn't one of the known operations
//! is rejected with [`NoteStoreError::UnknownOperation`] before touching the store.
use crate::errors::NoteStoreError;
use crate::{Address, NoteID, NoteStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    AddNote {
        content: String,
    },
    /// Despite the name, yields the IDs rather than a count.
    GetUserNoteAmount,
    GetSharedNote {
        id: NoteID,
    },
    DeleteNote {
        id: NoteID,
    },
    #[serde(rename_all = "camelCase")]
    UpdateSharingSettings {
        id: NoteID,
        is_public: bool,
        addresses: Vec<Address>,
    },
    RemoveSharedAddress {
        id: NoteID,
        address: Address,
    },
}

/// What a successful [`Operation`] returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    NoteID(NoteID),
    NoteIDs(Vec<NoteID>),
    Content(String),
    Done,
}

impl Operation {
    pub fn parse(request: serde_json::Value) -> Result<Operation, NoteStoreError> {
        serde_json::from_value(request).map_err(|e| {
            debug!(error = %e, "request doesn't match any operation");
            NoteStoreError::UnknownOperation
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddNote { .. } => "addNote",
            Operation::GetUserNoteAmount => "getUserNoteAmount",
            Operation::GetSharedNote { .. } => "getSharedNote",
            Operation::DeleteNote { .. } => "deleteNote",
            Operation::UpdateSharingSettings { .. } => "updateSharingSettings",
            Operation::RemoveSharedAddress { .. } => "removeSharedAddress",
        }
    }
}

/// Run `operation` against `store` on behalf of `caller`.
pub async fn dispatch(
    store: &dyn NoteStore,
    caller: Address,
    operation: Operation,
) -> Result<OperationOutput, NoteStoreError> {
    match operation {
        Operation::AddNote { content } => store
            .add_note(caller, content)
            .await
            .map(OperationOutput::NoteID),
        Operation::GetUserNoteAmount => store
            .get_user_notes(caller)
            .await
            .map(OperationOutput::NoteIDs),
        Operation::GetSharedNote { id } => store
            .get_shared_note(id, caller)
            .await
            .map(OperationOutput::Content),
        Operation::DeleteNote { id } => store
            .delete_note(id, caller)
            .await
            .map(|_| OperationOutput::Done),
        Operation::UpdateSharingSettings {
            id,
            is_public,
            addresses,
        } => store
            .update_sharing_settings(id, caller, is_public, addresses)
            .await
            .map(|_| OperationOutput::Done),
        Operation::RemoveSharedAddress { id, address } => store
            .remove_shared_address(id, caller, address)
            .await
            .map(|_| OperationOutput::Done),
    }
}
