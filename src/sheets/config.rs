//! Spreadsheet connection configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::records::ColumnLayout;

/// Which spreadsheet to talk to and how the record table is laid out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Spreadsheet document id (the long token in the sheet URL)
    #[serde(default)]
    pub spreadsheet_id: String,

    /// Tab holding the record table (default: "Sheet1")
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// First row below the header (default: 2)
    #[serde(default = "default_first_data_row")]
    pub first_data_row: u32,

    /// Service-account key file (default: "service_account.json")
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,

    /// Column order of the live sheet (default: current)
    #[serde(default)]
    pub column_layout: ColumnLayout,

    /// Connect/read/write timeout for each remote call (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_first_data_row() -> u32 {
    2
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("service_account.json")
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            sheet_name: default_sheet_name(),
            first_data_row: default_first_data_row(),
            credentials_path: default_credentials_path(),
            column_layout: ColumnLayout::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SheetConfig {
    /// Check the settings needed to reach the remote sheet
    pub fn validate(&self) -> Result<(), String> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err("sheet.spreadsheet_id must be set".to_string());
        }
        if self.sheet_name.trim().is_empty() {
            return Err("sheet.sheet_name must not be empty".to_string());
        }
        if self.first_data_row == 0 {
            return Err("sheet.first_data_row must be >= 1".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("sheet.timeout_ms must be > 0".to_string());
        }
        Ok(())
    }
}
