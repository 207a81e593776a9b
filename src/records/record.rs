//! Record types

use serde::{Deserialize, Serialize};

/// One follow-up record, as stored in a sheet row
///
/// Serialized with the keys the dashboard reads (`Name`, `AssignedTo`, ...).
/// `status` is the sheet's text verbatim; rows written by hand may hold
/// values outside [`Status`](super::Status).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "AssignedTo")]
    pub assigned_to: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "LastUpdated")]
    pub last_updated: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

/// Fields supplied when creating a record; id and timestamp are assigned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    pub name: String,
    pub phone: String,
    pub assigned_to: String,
    pub category: String,
    pub status: String,
    pub notes: Option<String>,
}

impl Record {
    /// The id's digits without leading zeros, if it is made only of ASCII digits
    ///
    /// Ids have no upper bound, so the value stays a decimal string. An id
    /// of all zeros yields `"0"`.
    pub fn numeric_id(&self) -> Option<&str> {
        if self.id.is_empty() || !self.id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = self.id.trim_start_matches('0');
        Some(if trimmed.is_empty() { "0" } else { trimmed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        let mut record = Record {
            id: "12".to_string(),
            ..Default::default()
        };
        assert_eq!(record.numeric_id(), Some("12"));

        record.id = "01".to_string();
        assert_eq!(record.numeric_id(), Some("1"));

        record.id = "000".to_string();
        assert_eq!(record.numeric_id(), Some("0"));

        record.id = "123456789012345678901234567890".to_string();
        assert_eq!(record.numeric_id(), Some("123456789012345678901234567890"));

        for id in ["", "-3", "1a", " 4", "+5"] {
            record.id = id.to_string();
            assert_eq!(record.numeric_id(), None, "id {:?}", id);
        }
    }

    #[test]
    fn test_wire_keys() {
        let record = Record {
            id: "1".to_string(),
            name: "Ann".to_string(),
            assigned_to: "Blen".to_string(),
            last_updated: "2026-01-01T00:00:00+00:00".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["Name"], "Ann");
        assert_eq!(value["AssignedTo"], "Blen");
        assert_eq!(value["LastUpdated"], "2026-01-01T00:00:00+00:00");
        assert_eq!(value["Notes"], "");
    }
}
