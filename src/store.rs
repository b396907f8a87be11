use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::fs;

use crate::models::Note;

/// StoreError
///
/// Failures of the persistence layer. A corrupt notes file is surfaced as its
/// own variant rather than silently read as an empty store, so callers can
/// distinguish "no notes yet" from "the data on disk is unreadable".
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("notes file is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("could not encode notes: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("notes file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// 1. NoteStore Contract
/// NoteStore
///
/// Defines the abstract contract for the persisted note list. The trait allows
/// swapping the flat-file implementation (FileNoteStore) for the in-memory one
/// (InMemoryNoteStore) in tests without affecting the calling handlers.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn NoteStore>`) safely shareable across Axum's task boundaries.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Reads the full note list. A missing file means the store has never been
    /// written and yields an empty list; an unparsable file is an error.
    async fn load(&self) -> Result<Vec<Note>, StoreError>;

    /// Serializes the full list and overwrites the file in place. This is not
    /// atomic and takes no lock: concurrent writers race at whole-file
    /// granularity and the last write wins.
    async fn save(&self, notes: &[Note]) -> Result<(), StoreError>;
}

/// StoreState
///
/// The concrete type used to share the note store across the application state.
pub type StoreState = Arc<dyn NoteStore>;

// 2. The Real Implementation (Flat JSON File)
/// FileNoteStore
///
/// The production store: a single JSON array persisted at the configured path,
/// pretty-printed with two-space indentation so the file stays hand-editable.
/// There is no schema version and no migration path.
#[derive(Clone)]
pub struct FileNoteStore {
    path: PathBuf,
}

impl FileNoteStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl NoteStore for FileNoteStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            // Absent file: the store simply hasn't been written yet.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&raw).map_err(StoreError::Corrupt)
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(notes).map_err(StoreError::Encode)?;
        fs::write(&self.path, encoded).await?;
        Ok(())
    }
}

// 3. The In-Memory Implementation (For Tests)
/// InMemoryNoteStore
///
/// A store backed by a plain `Mutex<Vec<Note>>`, used for unit and integration
/// testing of the handlers without touching the file system. The `corrupt`
/// constructor simulates an unreadable notes file so the 500 path can be
/// exercised deterministically.
#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: Mutex<Vec<Note>>,
    corrupt: bool,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `load` fails as if the backing file were unparsable.
    pub fn new_corrupt() -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            corrupt: true,
        }
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        if self.corrupt {
            let parse_failure =
                serde_json::from_str::<Vec<Note>>("this is not json").unwrap_err();
            return Err(StoreError::Corrupt(parse_failure));
        }
        Ok(self.notes.lock().expect("store mutex poisoned").clone())
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        *self.notes.lock().expect("store mutex poisoned") = notes.to_vec();
        Ok(())
    }
}
