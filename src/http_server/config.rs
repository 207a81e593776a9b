//! HTTP Server Configuration
//!
//! Bind address and CORS settings for the record API.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed browser origins; empty or `"*"` allows any origin (default: [])
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("http.host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("http.port must be > 0".to_string());
        }
        for origin in &self.cors_origins {
            if origin.trim().is_empty() || HeaderValue::from_str(origin).is_err() {
                return Err(format!("http.cors_origins: invalid origin {:?}", origin));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.cors_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(9090);
        assert_eq!(config.socket_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_port_zero_is_invalid() {
        assert!(HttpServerConfig::with_port(0).validate().is_err());
    }

    #[test]
    fn test_cors_origins_must_be_header_values() {
        let mut config = HttpServerConfig::default();
        config.cors_origins = vec!["https://dash.example.org".to_string(), "*".to_string()];
        assert!(config.validate().is_ok());

        for bad in ["https://dash.example.org\n", "", "  "] {
            config.cors_origins = vec![bad.to_string()];
            let err = config.validate().unwrap_err();
            assert!(err.contains("cors_origins"), "{}", err);
        }
    }
}
