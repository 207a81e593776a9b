//! CLI module for sheetbridge
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Run the HTTP API
//! - list: Print all records
//! - add: Append one record

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{AddArgs, Cli, Command};
pub use commands::{add, init, list, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_json;
