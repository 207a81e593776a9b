//! # HTTP Server Module
//!
//! REST surface of the bridge.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /api/records` - List records
//! - `POST /api/records` - Create a record
//! - `PUT /api/records/:id` - Update a record's status and notes
//! - `OPTIONS *` - CORS pre-flight

pub mod config;
pub mod health_routes;
pub mod record_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use record_routes::{record_routes, SharedStore};
pub use server::HttpServer;
