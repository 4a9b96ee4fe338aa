//! Endpoint request pipeline.
//!
//! # State Machine
//! ```text
//! Start → Validating ─┬→ Assembling → SizeChecking ─┬→ Writing → Done
//!                     └→ Rejected (400) → Done      └→ Oversized (500) → Done
//! ```
//!
//! # Design Decisions
//! - Transport neutral: raw parameters in, status/headers/body out
//! - One config snapshot per request
//! - Every failure becomes a response; nothing is retried
//! - Security headers only on the success path

use std::time::Instant;

use axum::http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode};

use crate::config::ConfigHandle;
use crate::http::error::EndpointError;
use crate::http::params::{ParameterValidator, RawParameters};
use crate::http::response::{
    EndpointResponse, ResponseEnvelope, FALLBACK_ERROR_BODY, JSON_CONTENT_TYPE,
};
use crate::observability::metrics;
use crate::security::apply_security_headers;

/// The secure echo endpoint.
#[derive(Debug, Clone, Default)]
pub struct EndpointHandler {
    config: ConfigHandle,
}

impl EndpointHandler {
    pub fn new(config: ConfigHandle) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Run the full pipeline for one request.
    pub fn handle(&self, raw: &RawParameters) -> EndpointResponse {
        let start = Instant::now();
        let config = self.config.load();

        if config.debug_logging {
            tracing::debug!(parameters = raw.len(), "Processing GET request");
        }

        let response = match self.process(raw, config.max_response_size, config.debug_logging) {
            Ok(body) => {
                let mut headers = json_headers();
                apply_security_headers(&mut headers);
                tracing::info!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Request processed successfully"
                );
                EndpointResponse {
                    status: StatusCode::OK,
                    headers,
                    body,
                }
            }
            Err(err) => {
                match &err {
                    EndpointError::InvalidParameterName(_) | EndpointError::ParameterTooLong(_) => {
                        tracing::warn!(error = %err, "Invalid request parameters");
                    }
                    EndpointError::ResponseTooLarge { size, limit } => {
                        tracing::warn!(size, limit, "Response size exceeds max size");
                    }
                    EndpointError::Serialization(_) => {
                        tracing::error!(error = %err, "Error processing request");
                    }
                }
                metrics::record_rejection(err.reason());
                error_response(err.status_code(), &err.public_message())
            }
        };

        metrics::record_request(response.status.as_u16(), start);
        response
    }

    /// Validating → Assembling → SizeChecking. Returns the body to write.
    fn process(
        &self,
        raw: &RawParameters,
        max_response_size: usize,
        debug_logging: bool,
    ) -> Result<String, EndpointError> {
        let params = ParameterValidator::new(debug_logging).validate(raw)?;
        let body = ResponseEnvelope::success(params).to_json()?;

        if body.len() > max_response_size {
            return Err(EndpointError::ResponseTooLarge {
                size: body.len(),
                limit: max_response_size,
            });
        }
        Ok(body)
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers
}

/// Build an error response, falling back to a fixed body if the envelope
/// cannot be serialized.
pub fn error_response(status: StatusCode, message: &str) -> EndpointResponse {
    EndpointResponse {
        status,
        headers: json_headers(),
        body: error_body_or_fallback(ResponseEnvelope::error(status, message).to_json()),
    }
}

fn error_body_or_fallback(encoded: Result<String, serde_json::Error>) -> String {
    encoded.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize error response");
        FALLBACK_ERROR_BODY.to_string()
    })
}
