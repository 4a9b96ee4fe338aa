//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (size budget > 0, timeouts > 0)
//! - Validate addresses and the endpoint path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint.max_response_size must be greater than zero")]
    ZeroResponseSize,

    #[error("endpoint.servlet_path must start with '/': {0:?}")]
    InvalidServletPath(String),

    #[error("endpoint.servlet_path uses route capture syntax (':', '*', '{{' or '}}'): {0:?}")]
    CaptureSyntaxInServletPath(String),

    #[error("{field} is not a valid socket address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.log_level is not a known level: {0:?}")]
    UnknownLogLevel(String),
}

/// Check `config` and collect every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoint.max_response_size == 0 {
        errors.push(ValidationError::ZeroResponseSize);
    }

    let path = &config.endpoint.servlet_path;
    if !path.starts_with('/') || path.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidServletPath(path.clone()));
    } else if has_capture_syntax(path) {
        errors.push(ValidationError::CaptureSyntaxInServletPath(path.clone()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The endpoint is mounted as a literal route. Segments that the router
/// would read as a capture (`{x}`) or reject outright (`:x`, `*x`) are not
/// allowed.
fn has_capture_syntax(path: &str) -> bool {
    path.contains(['{', '}'])
        || path
            .split('/')
            .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
}
