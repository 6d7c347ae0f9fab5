//! FFI use-case API for the Flutter note screens.
//!
//! # Responsibility
//! - Expose note list/detail/create/edit/delete to Dart via FRB.
//! - Map core errors into simple envelopes the UI can show as-is.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Each call opens the store, runs one use-case and releases it.
//! - One writer at a time: the UI must not overlap mutating calls.

use log::warn;
use photonote_core::db::open_db;
use photonote_core::{
    config::db_path_from_env, core_version as core_version_inner,
    init_logging as init_logging_inner, ping as ping_inner, Note, NoteDraft, NoteService,
    NoteServiceError, NoteStore, SqliteKeyValueStore,
};
use std::path::PathBuf;
use std::sync::RwLock;

static STORE_PATH: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core file logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error`, case-insensitive.
/// - `log_dir`: absolute directory for rolling log files.
/// - Returns an empty string on success, an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Points the note store at a database file, usually in app documents.
///
/// Without this call the store falls back to `PHOTONOTE_DB_PATH`, then to
/// the temp directory. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "configure_store failed: db_path cannot be empty".to_string();
    }
    match STORE_PATH.write() {
        Ok(mut slot) => {
            *slot = Some(PathBuf::from(trimmed));
            String::new()
        }
        Err(_) => "configure_store failed: store path lock poisoned".to_string(),
    }
}

/// Note fields as shown by list and detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_uri: String,
    /// ISO 8601 UTC timestamp.
    pub date: String,
}

impl From<Note> for NoteItem {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            description: note.description,
            image_uri: note.image_uri,
            date: note.date,
        }
    }
}

/// List response for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    /// Notes ordered newest date first.
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Result envelope for create/update/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Affected note id on success.
    pub note_id: Option<String>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: String) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Lists every stored note for the home screen.
///
/// A store that cannot be opened reads as empty; `message` says why.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NoteListResponse {
    match with_note_service(|service| Ok(service.list_notes())) {
        Ok(notes) => {
            let message = if notes.is_empty() {
                "No notes yet.".to_string()
            } else {
                format!("{} note(s).", notes.len())
            };
            NoteListResponse {
                items: notes.into_iter().map(NoteItem::from).collect(),
                message,
            }
        }
        Err(err) => NoteListResponse {
            items: Vec::new(),
            message: format!("notes_list failed: {err}"),
        },
    }
}

/// Loads one note for the detail and edit screens.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(id: String) -> Option<NoteItem> {
    with_note_service(|service| Ok(service.get_note(id.trim())))
        .ok()
        .flatten()
        .map(NoteItem::from)
}

/// Saves a new note from the create screen.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create(title: String, description: String, image_uri: String) -> NoteActionResponse {
    let draft = NoteDraft::new(title, description, image_uri);
    match with_note_service(|service| service.create_note(draft)) {
        Ok(note) => NoteActionResponse::success("Note saved.", note.id),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Saves edits to an existing note; its date becomes the edit time.
#[flutter_rust_bridge::frb(sync)]
pub fn note_update(
    id: String,
    title: String,
    description: String,
    image_uri: String,
) -> NoteActionResponse {
    let draft = NoteDraft::new(title, description, image_uri);
    match with_note_service(|service| service.edit_note(id.trim(), draft)) {
        Ok(note) => NoteActionResponse::success("Note updated.", note.id),
        Err(err) => NoteActionResponse::failure(format!("note_update failed: {err}")),
    }
}

/// Deletes a note. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: String) -> NoteActionResponse {
    let id = id.trim().to_string();
    match with_note_service(|service| service.delete_note(&id)) {
        Ok(()) => NoteActionResponse::success("Note deleted.", id),
        Err(err) => NoteActionResponse::failure(format!("note_delete failed: {err}")),
    }
}

fn resolve_store_path() -> PathBuf {
    if let Ok(slot) = STORE_PATH.read() {
        if let Some(path) = slot.as_ref() {
            return path.clone();
        }
    }
    db_path_from_env()
}

fn with_note_service<T>(
    f: impl FnOnce(&NoteService<SqliteKeyValueStore<'_>>) -> Result<T, NoteServiceError>,
) -> Result<T, String> {
    let db_path = resolve_store_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("note store open failed: {err}")
    })?;
    let service = NoteService::new(NoteStore::new(SqliteKeyValueStore::new(&conn)));
    f(&service).map_err(|err| err.to_string())
}
