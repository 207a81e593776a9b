//! sheetbridge - a REST bridge over a follow-up spreadsheet
//!
//! Serves `GET/POST /api/records` and `PUT /api/records/:id`, keeping each
//! record as one row of a Google Sheet.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod records;
pub mod sheets;
