//! Secure echo endpoint library.
//!
//! Validates and sanitizes query parameters and echoes them back in a JSON
//! envelope under a response size budget, with security headers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::{ConfigHandle, EndpointConfig, ServiceConfig};
pub use http::{EndpointHandler, HttpServer};
pub use lifecycle::Shutdown;
