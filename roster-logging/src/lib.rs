//! Logging setup for Roster
//!
//! Installs a global `tracing` subscriber built from
//! [`roster_config::LoggingConfig`]. Installation is idempotent: if a
//! subscriber is already set (tests, embedding applications) the call is a
//! no-op.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing, LoggingError};
