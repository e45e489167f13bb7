//! CLI module
//!
//! Command-line interface implementing the connector protocol.
//!
//! # Commands
//!
//! - `spec` - Print the configuration specification
//! - `check` - Test the API key against the Books API
//! - `discover` - Print the stream catalog
//! - `read` - Extract records for the configured catalog

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{reject_invocation, ExitStatus, Runner, INVALID_COMMAND_MESSAGE};
