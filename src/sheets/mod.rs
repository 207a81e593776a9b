//! # Spreadsheet Transport
//!
//! Everything that knows a spreadsheet is on the other end: the backend
//! trait the record store is written against, the Google Sheets client,
//! service-account authentication and an in-memory stand-in.

pub mod auth;
pub mod backend;
pub mod client;
pub mod config;
pub mod errors;
pub mod memory;
pub mod range;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use backend::{Row, SheetBackend};
pub use client::GoogleSheetsClient;
pub use config::SheetConfig;
pub use errors::{SheetError, SheetResult};
pub use memory::MemorySheet;
pub use range::{SheetRanges, COLUMN_COUNT};
