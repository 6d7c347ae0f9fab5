//! Domain model for photo notes.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its wire shape.
//! - Provide id/timestamp helpers used by callers that build notes.
//!
//! # Invariants
//! - `Note::id` is the only identity and equality key used by the store.
//! - All record fields are plain strings on the wire.

pub mod note;
