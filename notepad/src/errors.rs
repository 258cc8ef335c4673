use thiserror::Error;

use crate::access::Denial;
use crate::{Address, NoteID};

#[derive(Error, Debug)]
pub enum NoteStoreError {
    #[error("Note does not exist")]
    NoteNotExist(NoteID),
    #[error("Note has been deleted")]
    NoteDeleted(NoteID),
    #[error("{1}")]
    Unauthorized(NoteID, Denial),
    #[error("Address is not shared with this note")]
    NotShared(NoteID, Address),
    #[error("Fallback function: Call a function that exists!")]
    UnknownOperation,
    #[error("note content is {0} characters long, at most {1} are allowed")]
    ContentTooLong(usize, usize),
    #[error("backup uses note schema version `{0}`, which is newer than this store supports")]
    UnsupportedSchema(u64),
    #[error("io error")]
    IOError(#[from] std::io::Error),
    #[error("serde error")]
    SerdeError(#[from] serde_json::Error),
}

impl NoteStoreError {
    /// A stable, machine-readable name of the failure.
    pub fn code(&self) -> &'static str {
        match self {
            NoteStoreError::NoteNotExist(_) => "NotFound",
            NoteStoreError::NoteDeleted(_) => "Deleted",
            NoteStoreError::Unauthorized(_, Denial::Delete) => "NotCreator",
            NoteStoreError::Unauthorized(_, _) => "Unauthorized",
            NoteStoreError::NotShared(_, _) => "NotShared",
            NoteStoreError::UnknownOperation => "UnknownOperation",
            NoteStoreError::ContentTooLong(_, _) => "ContentTooLong",
            NoteStoreError::UnsupportedSchema(_)
            | NoteStoreError::IOError(_)
            | NoteStoreError::SerdeError(_) => "Internal",
        }
    }
}
