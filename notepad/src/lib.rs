//! Notepad: a note store where every note's creator decides who else may read it.
pub mod access;
pub mod address;
pub mod errors;
pub mod event;
pub mod note;
pub mod notemetadata;
pub mod notestore;
pub mod operation;

pub use address::Address;
pub use event::NoteEvent;
pub use note::{Note, NoteID};
pub use notestore::{InMemoryStore, NoteStore, StoreConfig};
pub use operation::{dispatch, Operation, OperationOutput};
