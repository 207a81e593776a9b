//! Configuration file
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "http": { "host": "0.0.0.0", "port": 8080, "cors_origins": [] },
//!   "sheet": { "spreadsheet_id": "...", "sheet_name": "Sheet1", "first_data_row": 2,
//!              "credentials_path": "service_account.json", "column_layout": "current",
//!              "timeout_ms": 10000 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::sheets::SheetConfig;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub sheet: SheetConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
            sheet: SheetConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    ///
    /// Only settings every command needs are validated here; commands that
    /// reach the remote sheet also call [`Config::validate_remote`].
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;
        self.http.validate().map_err(CliError::config_error)?;
        Ok(())
    }

    /// Validate the settings needed to reach the spreadsheet
    pub fn validate_remote(&self) -> CliResult<()> {
        self.sheet.validate().map_err(CliError::config_error)
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!("Invalid log_level: '{}'", self.log_level))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ColumnLayout;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"{
                "log_level": "warn",
                "http": {"port": 9000, "cors_origins": ["http://localhost:5173"]},
                "sheet": {"spreadsheet_id": "doc", "column_layout": "legacy"}
            }"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.sheet.column_layout, ColumnLayout::Legacy);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
        assert!(config.validate_remote().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.sheet.sheet_name, "Sheet1");
        assert!(config.validate_remote().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let file = write_config(r#"{"log_level": "chatty"}"#);
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let file = write_config("{ not json");
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.message().contains("Invalid config JSON"));
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(&dir.path().join("absent.json")).is_err());
    }
}
