//! Core persistence for photo notes.
//!
//! The note collection lives as one JSON array under a single key of a
//! durable key-value store. Everything above that (camera, pickers, screens)
//! calls in through `NoteStore` or `NoteService`.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{generate_note_id, now_iso8601, sort_by_date_desc, Note, NoteId};
pub use service::note_service::{NoteDraft, NoteService, NoteServiceError};
pub use store::note_store::{
    decode_collection, encode_collection, NoteStore, StoreError, StoreOptions, StoreResult,
    NOTES_STORAGE_KEY,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
