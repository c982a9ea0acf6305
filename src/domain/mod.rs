//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: model roles, metadata record, install report.
//! - `constants.rs`: fixed layout names, metadata defaults, tile vocabularies,
//!   dev server headers.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `ModelMetadata` is read by the browser app from `metadata.json`.
//! Renaming or reordering its fields changes that file.

pub mod constants;
pub mod models;
