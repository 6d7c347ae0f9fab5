//! Use-case services for screen-level callers.
//!
//! # Responsibility
//! - Apply the form checks the create/edit screens require.
//! - Keep UI and FFI layers decoupled from store and storage details.

pub mod note_service;
