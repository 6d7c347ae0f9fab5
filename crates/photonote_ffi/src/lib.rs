//! Flutter bridge entry points for the photo note core.

pub mod api;
