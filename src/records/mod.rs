//! # Follow-up Records
//!
//! The record model and the store that keeps records in a spreadsheet:
//! row/record mapping, id assignment, status validation and the
//! update-by-id rewrite.

pub mod errors;
pub mod layout;
pub mod record;
pub mod status;
pub mod store;

pub use errors::{ErrorResponse, RecordError, RecordResult};
pub use layout::{Column, ColumnLayout};
pub use record::{NewRecord, Record};
pub use status::Status;
pub use store::{next_id, RecordStore, UpdateOutcome};
