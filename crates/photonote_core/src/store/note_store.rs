//! Single-aggregate note store.
//!
//! # Invariants
//! - `create` prepends, so stored order is newest-created first.
//! - `list`/`get` never fail: a missing key, a failed read or an unreadable
//!   blob all read as an empty collection.
//! - `create`/`update`/`delete` surface write failures to the caller.
//!
//! # Concurrency
//! The store holds no lock and performs no version check. Two overlapping
//! mutations can lose one of the changes. Callers must guarantee a single
//! writer at a time.

use crate::kv::{KeyValueStore, KvError};
use crate::model::note::{Note, NoteId};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key holding the serialized collection.
pub const NOTES_STORAGE_KEY: &str = "@photo_notes_data";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a note store operation.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying key-value read or write failed.
    Kv(KvError),
    /// The collection could not be encoded for writing.
    Encode(serde_json::Error),
    /// Stored blob is present but is not a valid note collection.
    Corrupt(serde_json::Error),
    /// `create` refused a note whose id already exists (opt-in check).
    DuplicateId(NoteId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "note storage failed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::Corrupt(err) => write!(f, "stored notes are unreadable: {err}"),
            Self::DuplicateId(id) => write!(f, "note id already exists: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
            Self::Encode(err) | Self::Corrupt(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Optional behaviors layered on the default store semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Reject `create` when a note with the same id is already stored.
    ///
    /// Off by default: ids are trusted to be unique and duplicates are
    /// stored as given.
    pub enforce_unique_ids: bool,
}

/// Note collection persisted as one JSON array under [`NOTES_STORAGE_KEY`].
pub struct NoteStore<S> {
    kv: S,
    options: StoreOptions,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Creates a store with default options over `kv`.
    pub fn new(kv: S) -> Self {
        Self::with_options(kv, StoreOptions::default())
    }

    pub fn with_options(kv: S, options: StoreOptions) -> Self {
        Self { kv, options }
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Prepends `note` to the collection and writes it back.
    ///
    /// No field validation is done here. An unreadable blob is replaced by
    /// a collection holding only `note`.
    ///
    /// # Errors
    /// - `StoreError::Kv` when the read or the write fails.
    /// - `StoreError::DuplicateId` when unique ids are enforced and taken.
    pub fn create(&self, note: &Note) -> StoreResult<()> {
        let mut notes = self.load_for_write("note_create")?;
        if self.options.enforce_unique_ids && notes.iter().any(|n| n.id == note.id) {
            warn!("event=note_create module=store status=rejected reason=duplicate_id");
            return Err(StoreError::DuplicateId(note.id.clone()));
        }

        notes.insert(0, note.clone());
        self.persist("note_create", &notes)
    }

    /// Returns the collection in stored order.
    ///
    /// Never fails; see [`NoteStore::try_list`] for a read that tells an
    /// empty store apart from a broken one.
    pub fn list(&self) -> Vec<Note> {
        match self.try_list() {
            Ok(notes) => notes,
            Err(err) => {
                warn!("event=note_list module=store status=degraded error={err}");
                Vec::new()
            }
        }
    }

    /// Returns the collection, reporting read and decode failures.
    ///
    /// A missing key is still an empty collection, not an error.
    pub fn try_list(&self) -> StoreResult<Vec<Note>> {
        match self.kv.get(NOTES_STORAGE_KEY)? {
            Some(raw) => decode_collection(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the first note whose id equals `id`.
    pub fn get(&self, id: &str) -> Option<Note> {
        self.list().into_iter().find(|note| note.id == id)
    }

    /// Replaces the first note sharing `note.id`, keeping its position.
    ///
    /// When nothing matches the collection is written back unchanged.
    pub fn update(&self, note: &Note) -> StoreResult<()> {
        let mut notes = self.load_for_write("note_update")?;
        match notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(slot) => *slot = note.clone(),
            None => debug!("event=note_update module=store status=no_match"),
        }
        self.persist("note_update", &notes)
    }

    /// Removes every note whose id equals `id` and writes the rest back.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut notes = self.load_for_write("note_delete")?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        debug!(
            "event=note_delete module=store status=filtered removed={}",
            before - notes.len()
        );
        self.persist("note_delete", &notes)
    }

    /// Returns the stored blob exactly as persisted.
    pub fn raw(&self) -> StoreResult<Option<String>> {
        Ok(self.kv.get(NOTES_STORAGE_KEY)?)
    }

    /// Drops the whole collection; the next read sees an empty store.
    pub fn clear(&self) -> StoreResult<()> {
        self.kv.remove(NOTES_STORAGE_KEY)?;
        info!("event=note_clear module=store status=ok");
        Ok(())
    }

    fn load_for_write(&self, event: &'static str) -> StoreResult<Vec<Note>> {
        match self.try_list() {
            Ok(notes) => Ok(notes),
            Err(StoreError::Corrupt(err)) => {
                warn!("event={event} module=store status=degraded reason=corrupt_blob error={err}");
                Ok(Vec::new())
            }
            Err(err) => {
                warn!("event={event} module=store status=error phase=read error={err}");
                Err(err)
            }
        }
    }

    fn persist(&self, event: &'static str, notes: &[Note]) -> StoreResult<()> {
        let raw = encode_collection(notes)?;
        if let Err(err) = self.kv.set(NOTES_STORAGE_KEY, &raw) {
            warn!("event={event} module=store status=error phase=write error={err}");
            return Err(err.into());
        }
        info!("event={event} module=store status=ok count={}", notes.len());
        Ok(())
    }
}

/// Encodes a collection into the stored JSON array form.
pub fn encode_collection(notes: &[Note]) -> StoreResult<String> {
    serde_json::to_string(notes).map_err(StoreError::Encode)
}

/// Decodes the stored JSON array form.
pub fn decode_collection(raw: &str) -> StoreResult<Vec<Note>> {
    serde_json::from_str(raw).map_err(StoreError::Corrupt)
}
