//! Follow-up status values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::RecordError;

/// The statuses a record may be created with or moved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Waiting for a response")]
    WaitingForResponse,
    #[serde(rename = "No response")]
    NoResponse,
    Indecisive,
    Available,
    Unavailable,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::WaitingForResponse,
        Status::NoResponse,
        Status::Indecisive,
        Status::Available,
        Status::Unavailable,
    ];

    /// Text stored in the sheet and accepted from clients
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::WaitingForResponse => "Waiting for a response",
            Status::NoResponse => "No response",
            Status::Indecisive => "Indecisive",
            Status::Available => "Available",
            Status::Unavailable => "Unavailable",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against the allowed set
impl FromStr for Status {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| RecordError::InvalidStatus(s.to_string()))
    }
}
