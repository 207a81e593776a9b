//! Observability for sheetbridge
//!
//! Structured one-line JSON logs plus timed scopes for requests and
//! command-line operations.
//!
//! ```ignore
//! use sheetbridge::observability::{Logger, ObservationScope};
//!
//! Logger::info("RECORD_CREATED", &[("id", "42")]);
//!
//! let scope = ObservationScope::new("LIST");
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
