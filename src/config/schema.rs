//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Endpoint behaviour (path, debug output, response budget).
    pub endpoint: EndpointConfig,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Per-activation endpoint settings.
///
/// Replaced wholesale on reload; see [`crate::config::ConfigHandle`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Path the endpoint is mounted at.
    pub servlet_path: String,

    /// Emit verbose per-request diagnostics. Never changes outcomes.
    pub debug_logging: bool,

    /// Maximum serialized success body, in bytes.
    pub max_response_size: usize,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            servlet_path: "/bin/example".to_string(),
            debug_logging: false,
            max_response_size: 10 * 1024, // 10KB
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.endpoint.servlet_path, "/bin/example");
        assert_eq!(config.endpoint.max_response_size, 10240);
        assert!(!config.endpoint.debug_logging);
    }

    #[test]
    fn test_partial_section() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [endpoint]
            max_response_size = 20480
            debug_logging = true
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint.max_response_size, 20480);
        assert!(config.endpoint.debug_logging);
        assert_eq!(config.endpoint.servlet_path, "/bin/example");
        assert_eq!(config.listener, ListenerConfig::default());
    }
}
