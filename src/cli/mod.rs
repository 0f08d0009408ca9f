//! CLI module for campusd
//!
//! Provides the command-line interface:
//! - serve: boot the HTTP API, optionally seeding sample students

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, serve};
pub use errors::{CliError, CliResult};
