//! Helper tooling for the Qwirkle Counter web app.
//!
//! - `add-models` installs exported color/shape models under
//!   `models/pretrained` and writes `metadata.json`.
//! - `serve` runs a static dev server with CORS and camera headers.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod logging;
pub mod services;
