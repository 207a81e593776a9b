//! # HTTP Server
//!
//! Combines the record and health routers, CORS and request logging into
//! one Axum server.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, Method},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{Logger, ObservationScope};
use crate::records::RecordStore;
use crate::sheets::SheetBackend;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::record_routes::{fallback_handler, record_routes};

/// HTTP server for the record API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server serving `store`
    pub fn new<B: SheetBackend + 'static>(
        config: HttpServerConfig,
        store: Arc<RecordStore<B>>,
    ) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router<B: SheetBackend + 'static>(
        config: &HttpServerConfig,
        store: Arc<RecordStore<B>>,
    ) -> Router {
        Router::new()
            .merge(health_routes())
            .nest("/api", record_routes(store))
            .fallback(fallback_handler)
            .layer(cors_layer(config))
            .layer(middleware::from_fn(log_requests))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let addr_text = addr.to_string();
        Logger::info(
            "SERVER_START",
            &[("addr", addr_text.as_str()), ("records", "/api/records")],
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Logger::info("SERVER_STOP", &[("addr", addr_text.as_str())]);
        Ok(())
    }
}

/// Configured origins, or any origin when none are listed or one is `*`
///
/// Origins are checked by [`HttpServerConfig::validate`]; any that still fail
/// to parse here are skipped.
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let allow_any = config.cors_origins.is_empty()
        || config.cors_origins.iter().any(|origin| origin.trim() == "*");
    let allow_origin = if allow_any {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn log_requests(request: Request, next: Next) -> Response {
    let scope = ObservationScope::new("REQUEST")
        .with_field("method", request.method().as_str())
        .with_field("path", request.uri().path());

    let response = next.run(request).await;
    scope.complete_with_fields(&[("status", response.status().as_str())]);
    response
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::ColumnLayout;
    use crate::sheets::MemorySheet;

    fn memory_store() -> Arc<RecordStore<MemorySheet>> {
        Arc::new(RecordStore::new(MemorySheet::new(), ColumnLayout::Current))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::default(), memory_store());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(HttpServerConfig::with_port(9000), memory_store());
        assert_eq!(server.socket_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, memory_store()).router();
    }

    #[test]
    fn test_wildcard_in_origin_list_allows_any() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string(), "*".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, memory_store()).router();
    }
}
