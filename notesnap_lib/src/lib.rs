use thiserror::Error;

use crate::device::Capability;

pub mod api;
pub mod device;
pub mod note;
pub mod query;
pub mod store;

pub use api::{DEFAULT_API_URL, NotesApi, RemoteApi, SEED_LIMIT};
pub use note::{Note, NoteDraft, NoteLocation, ValidationError, mint_note_id};
pub use store::{Action, LOAD_ERROR_MESSAGE, NoteStore, StoreEvent, StoreState, reduce};

#[derive(Error, Debug)]
pub enum NoteSnapError {
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("Create failed: {0}")]
    Create(String),
    #[error("Update failed: {0}")]
    Update(String),
    #[error("Permission denied for {0}")]
    PermissionDenied(Capability),
    #[error("{capability} capture failed: {message}")]
    Capture {
        capability: Capability,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, NoteSnapError>;
