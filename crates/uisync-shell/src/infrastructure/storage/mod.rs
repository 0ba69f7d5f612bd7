//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration from the
//! platform-appropriate directory, falls back to defaults when the file does
//! not exist yet, and writes it back on request.

pub mod config;
