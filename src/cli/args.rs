//! CLI argument definitions using clap
//!
//! Commands:
//! - sheetbridge init --config <path>
//! - sheetbridge serve --config <path> [--port <n>] [--memory]
//! - sheetbridge list --config <path>
//! - sheetbridge add --config <path> --name .. --phone .. --assigned-to .. --category .. --status ..

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sheetbridge - REST API over a follow-up spreadsheet
#[derive(Parser, Debug)]
#[command(name = "sheetbridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./sheetbridge.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./sheetbridge.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Serve from an in-memory sheet instead of the remote spreadsheet
        #[arg(long)]
        memory: bool,
    },

    /// Print every record as JSON and exit
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./sheetbridge.json")]
        config: PathBuf,
    },

    /// Append one record and print its id
    Add(AddArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Path to configuration file
    #[arg(long, default_value = "./sheetbridge.json")]
    pub config: PathBuf,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub assigned_to: String,

    #[arg(long)]
    pub category: String,

    /// One of the allowed follow-up statuses, e.g. "Waiting for a response"
    #[arg(long)]
    pub status: String,

    #[arg(long)]
    pub notes: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
