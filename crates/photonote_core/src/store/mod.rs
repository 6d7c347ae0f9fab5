//! Note persistence over a single key-value entry.
//!
//! # Responsibility
//! - Translate between the in-memory note collection and its JSON blob.
//! - Offer create/list/get/update/delete on top of whole-blob rewrites.
//!
//! # Invariants
//! - Exactly one key (`NOTES_STORAGE_KEY`) holds the entire collection.
//! - Every mutation is read-all, transform, write-all; no partial updates.
//! - Logical absence (unknown id) is never an error.

pub mod note_store;
