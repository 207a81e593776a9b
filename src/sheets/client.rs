//! # Google Sheets Client
//!
//! Blocking client for the Sheets v4 `values` API. Each call is one HTTP
//! round trip; there is no retry, and timeouts come from the agent.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::auth::{ServiceAccountKey, TokenProvider};
use super::backend::{Row, SheetBackend};
use super::config::SheetConfig;
use super::errors::{SheetError, SheetResult};
use super::range::SheetRanges;

/// Default API root
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Values are parsed as if typed into the UI, so numbers and dates keep
/// their native cell types.
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

#[derive(Debug, Deserialize)]
struct ValueRange {
    /// Omitted entirely when the range is empty
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Spreadsheet backend backed by the Google Sheets API
pub struct GoogleSheetsClient {
    spreadsheet_id: String,
    ranges: SheetRanges,
    base_url: Url,
    agent: ureq::Agent,
    tokens: TokenProvider,
}

impl GoogleSheetsClient {
    /// Load credentials and build a client for the configured sheet
    pub fn connect(config: &SheetConfig) -> SheetResult<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .user_agent(concat!("sheetbridge/", env!("CARGO_PKG_VERSION")))
            .build();

        let key = ServiceAccountKey::load(&config.credentials_path)?;
        let tokens = TokenProvider::new(key, agent.clone())?;
        let base_url = Url::parse(SHEETS_API_BASE).map_err(|e| SheetError::Decode {
            operation: "connect",
            reason: e.to_string(),
        })?;

        Ok(Self {
            spreadsheet_id: config.spreadsheet_id.clone(),
            ranges: SheetRanges::new(&config.sheet_name, config.first_data_row),
            base_url,
            agent,
            tokens,
        })
    }

    /// Point the client at a different API root (emulators, proxies)
    pub fn with_base_url(mut self, base: &str) -> SheetResult<Self> {
        self.base_url = Url::parse(base).map_err(|e| SheetError::Decode {
            operation: "connect",
            reason: format!("invalid base url {}: {}", base, e),
        })?;
        Ok(self)
    }

    fn request(&self, method: &str, url: &Url) -> SheetResult<ureq::Request> {
        let token = self.tokens.access_token()?;
        Ok(self
            .agent
            .request_url(method, url)
            .set("Authorization", &format!("Bearer {}", token))
            .set("Accept", "application/json"))
    }
}

impl SheetBackend for GoogleSheetsClient {
    fn read_rows(&self) -> SheetResult<Vec<Row>> {
        const OP: &str = "read_rows";
        let url = values_url(&self.base_url, &self.spreadsheet_id, &self.ranges.data(), "")?;

        let body: ValueRange = self
            .request("GET", &url)?
            .call()
            .map_err(|e| SheetError::from_ureq(OP, e))?
            .into_json()
            .map_err(|e| SheetError::Decode {
                operation: OP,
                reason: e.to_string(),
            })?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    fn append_row(&self, row: Row) -> SheetResult<()> {
        const OP: &str = "append_row";
        let mut url = values_url(
            &self.base_url,
            &self.spreadsheet_id,
            &self.ranges.append(),
            ":append",
        )?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", VALUE_INPUT_OPTION)
            .append_pair("insertDataOption", "INSERT_ROWS");

        self.request("POST", &url)?
            .send_json(json!({ "values": [row] }))
            .map_err(|e| SheetError::from_ureq(OP, e))?;
        Ok(())
    }

    fn update_row(&self, index: usize, row: Row) -> SheetResult<()> {
        const OP: &str = "update_row";
        let range = self.ranges.row(index);
        let mut url = values_url(&self.base_url, &self.spreadsheet_id, &range, "")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", VALUE_INPUT_OPTION);

        self.request("PUT", &url)?
            .send_json(json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": [row],
            }))
            .map_err(|e| SheetError::from_ureq(OP, e))?;
        Ok(())
    }
}

/// `{base}/{spreadsheet_id}/values/{range}{verb}` with each segment percent-encoded
fn values_url(base: &Url, spreadsheet_id: &str, range: &str, verb: &str) -> SheetResult<Url> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|_| SheetError::Decode {
            operation: "build_url",
            reason: format!("{} cannot be a base url", base),
        })?;
        segments
            .pop_if_empty()
            .push(spreadsheet_id)
            .push("values")
            .push(&format!("{}{}", range, verb));
    }
    Ok(url)
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse(SHEETS_API_BASE).unwrap()
    }

    #[test]
    fn test_values_url_for_read() {
        let url = values_url(&base(), "doc123", "Sheet1!A2:H", "").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/doc123/values/Sheet1!A2:H"
        );
    }

    #[test]
    fn test_values_url_for_append() {
        let url = values_url(&base(), "doc123", "Sheet1!A:H", ":append").unwrap();
        assert!(url.path().ends_with("/values/Sheet1!A:H:append"));
    }

    #[test]
    fn test_values_url_encodes_spaces() {
        let url = values_url(&base(), "doc123", "'Follow ups'!A2:H", "").unwrap();
        assert!(url.path().ends_with("/values/'Follow%20ups'!A2:H"));
    }

    #[test]
    fn test_values_url_tolerates_trailing_slash() {
        let base = Url::parse("http://localhost:9000/v4/spreadsheets/").unwrap();
        let url = values_url(&base, "doc", "S!A1:H", "").unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/doc/values/S!A1:H");
    }

    #[test]
    fn test_value_range_without_values() {
        let body: ValueRange = serde_json::from_str(r#"{"range":"Sheet1!A2:H"}"#).unwrap();
        assert!(body.values.is_empty());
    }

    #[test]
    fn test_cell_text_conversions() {
        assert_eq!(cell_text(json!("Ann")), "Ann");
        assert_eq!(cell_text(json!(42)), "42");
        assert_eq!(cell_text(json!(true)), "true");
        assert_eq!(cell_text(Value::Null), "");
    }
}
