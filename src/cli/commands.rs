//! CLI command implementations
//!
//! `serve` runs the HTTP server; `list` and `add` perform one record
//! operation against the configured sheet and print the result as JSON.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{Logger, ObservationScope, Severity};
use crate::records::{NewRecord, RecordStore};
use crate::sheets::{GoogleSheetsClient, MemorySheet, SheetBackend};

use super::args::{AddArgs, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve {
            config,
            port,
            memory,
        } => serve(&config, port, memory),
        Command::List { config } => list(&config),
        Command::Add(args) => add(args),
    }
}

/// Write a default configuration file
///
/// Refuses to overwrite an existing file.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(
            &config_path.display().to_string(),
        ));
    }

    let mut text = serde_json::to_string_pretty(&Config::default())?;
    text.push('\n');
    fs::write(config_path, text)?;

    let path = config_path.display().to_string();
    Logger::info(
        "CONFIG_WRITTEN",
        &[("path", path.as_str()), ("next", "set sheet.spreadsheet_id")],
    );
    Ok(())
}

/// Start the HTTP server
///
/// With `memory`, records live in process memory and the config file is
/// optional.
pub fn serve(config_path: &Path, port: Option<u16>, memory: bool) -> CliResult<()> {
    let mut config = if memory && !config_path.exists() {
        Config::default()
    } else {
        Config::load(config_path)?
    };
    if let Some(port) = port {
        config.http.port = port;
        config.http.validate().map_err(CliError::config_error)?;
    }
    Logger::set_min_severity(config.severity()?);

    if memory {
        Logger::warn(
            "MEMORY_BACKEND",
            &[("detail", "records are kept in memory and lost on exit")],
        );
        let store = RecordStore::new(MemorySheet::new(), config.sheet.column_layout);
        run_server(config.http, Arc::new(store))
    } else {
        let store = connect_store(&config)?;
        run_server(config.http, Arc::new(store))
    }
}

/// Print every record
pub fn list(config_path: &Path) -> CliResult<()> {
    let store = open_for_command(config_path)?;

    let scope = ObservationScope::new("LIST");
    match store.list() {
        Ok(records) => {
            scope.complete_with_fields(&[("count", records.len().to_string().as_str())]);
            write_json(&records)
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e.into())
        }
    }
}

/// Append one record and print its id
pub fn add(args: AddArgs) -> CliResult<()> {
    let store = open_for_command(&args.config)?;

    let new = NewRecord {
        name: args.name,
        phone: args.phone,
        assigned_to: args.assigned_to,
        category: args.category,
        status: args.status,
        notes: args.notes,
    };
    let id = store.create(new)?;
    write_json(&json!({ "message": "Record added", "id": id }))
}

/// Load config for a one-shot command and connect to the sheet
///
/// INFO events would interleave with the JSON on stdout, so one-shot
/// commands log at WARN and above.
fn open_for_command(config_path: &Path) -> CliResult<RecordStore<GoogleSheetsClient>> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?.max(Severity::Warn));
    connect_store(&config)
}

fn connect_store(config: &Config) -> CliResult<RecordStore<GoogleSheetsClient>> {
    config.validate_remote()?;
    let client = GoogleSheetsClient::connect(&config.sheet).map_err(|e| {
        CliError::boot_failed(format!("Failed to connect to spreadsheet: {}", e))
    })?;
    Ok(RecordStore::new(client, config.sheet.column_layout))
}

fn run_server<B: SheetBackend + 'static>(
    http: HttpServerConfig,
    store: Arc<RecordStore<B>>,
) -> CliResult<()> {
    let server = HttpServer::new(http, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}
