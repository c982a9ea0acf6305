//! Command handler layer.
//!
//! One handler per binary; each owns console wiring and exit behaviour.
//!
//! ## Files
//! - `install.rs`: `add-models`: interactive install, failure reporting.
//! - `serve.rs`: `serve`: bind, startup banner, run until Ctrl+C.
//!
//! ## Principles
//! - Delegate business logic to `services/*`.
//! - Keep console text stable; integration tests match on it.

pub mod install;
pub mod serve;

pub use install::{handle_add_models, report_failure};
pub use serve::handle_serve;
