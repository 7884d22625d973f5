//! Roster server
//!
//! Wires configuration, logging, the in-memory storage and the REST API
//! into a runnable HTTP server.

pub mod cli;
pub mod startup;

pub use cli::Cli;
pub use startup::{web_cors_config, Server};
