//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `installer.rs`: interactive install session (prompts, validation, metadata).
//! - `prompt.rs`: line-oriented console used by the installer.
//! - `storage.rs`: model layout, shallow file copy, metadata persistence.
//! - `output.rs`: section rules and install summary rendering.
//! - `server.rs`: warp routes for the dev server, header injection, listings.
//! - `network.rs`: LAN address probe.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Console output goes through a writer so runs can be captured in tests.

pub mod installer;
pub mod network;
pub mod output;
pub mod prompt;
pub mod server;
pub mod storage;
