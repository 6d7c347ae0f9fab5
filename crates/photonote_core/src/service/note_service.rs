//! Note use-case service.
//!
//! # Responsibility
//! - Turn form drafts into stored notes (id and timestamp assignment).
//! - Reject drafts without a title or an image before touching storage.
//! - Present the list in newest-date-first order.
//!
//! # Invariants
//! - Edits keep the note id and stamp `date` with the edit time.
//! - Store-level semantics (prepend, silent no-op on unknown ids) are left
//!   to `NoteStore`.

use crate::kv::KeyValueStore;
use crate::model::note::{now_iso8601, sort_by_date_desc, Note, NoteId};
use crate::store::note_store::{NoteStore, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// No image reference was attached.
    MissingImage,
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "please enter a title"),
            Self::MissingImage => write!(f, "please add an image"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Form payload submitted by the create and edit screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub image_uri: String,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_uri: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image_uri: image_uri.into(),
        }
    }

    /// Checks the fields the screens refuse to save without.
    pub fn validate(&self) -> Result<(), NoteServiceError> {
        if self.title.trim().is_empty() {
            return Err(NoteServiceError::EmptyTitle);
        }
        if self.image_uri.trim().is_empty() {
            return Err(NoteServiceError::MissingImage);
        }
        Ok(())
    }
}

/// Note service facade over a [`NoteStore`].
pub struct NoteService<S> {
    store: NoteStore<S>,
}

impl<S: KeyValueStore> NoteService<S> {
    pub fn new(store: NoteStore<S>) -> Self {
        Self { store }
    }

    /// Borrows the underlying store for raw operations.
    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    /// Validates `draft`, assigns id and date, and stores the new note.
    pub fn create_note(&self, draft: NoteDraft) -> Result<Note, NoteServiceError> {
        draft.validate()?;
        let note = Note::new(draft.title, draft.description, draft.image_uri);
        self.store.create(&note)?;
        Ok(note)
    }

    /// Replaces the editable fields of note `id` and restamps its date.
    pub fn edit_note(&self, id: &str, draft: NoteDraft) -> Result<Note, NoteServiceError> {
        let existing = self
            .store
            .get(id)
            .ok_or_else(|| NoteServiceError::NoteNotFound(id.to_string()))?;
        draft.validate()?;

        let updated = Note {
            id: existing.id,
            title: draft.title,
            description: draft.description,
            image_uri: draft.image_uri,
            date: now_iso8601(),
        };
        self.store.update(&updated)?;
        Ok(updated)
    }

    /// Gets one note by id.
    pub fn get_note(&self, id: &str) -> Option<Note> {
        self.store.get(id)
    }

    /// Lists notes newest date first.
    pub fn list_notes(&self) -> Vec<Note> {
        let mut notes = self.store.list();
        sort_by_date_desc(&mut notes);
        notes
    }

    /// Deletes note `id`; unknown ids are a no-op.
    pub fn delete_note(&self, id: &str) -> Result<(), NoteServiceError> {
        self.store.delete(id)?;
        Ok(())
    }
}
