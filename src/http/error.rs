//! Endpoint error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

/// Generic message for failures whose cause must not reach the caller.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An error occurred processing your request";

/// Fixed message for the response size policy.
pub const RESPONSE_TOO_LARGE_MESSAGE: &str = "Response payload too large";

/// Errors produced while handling an endpoint request.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Parameter name failed the name-safety predicate.
    #[error("Invalid parameter name: {0}")]
    InvalidParameterName(String),

    /// First value of a parameter exceeded the length limit.
    #[error("Parameter value too long: {0}")]
    ParameterTooLong(String),

    /// Serialized success body exceeded the configured budget.
    #[error("Response size {size} exceeds max size {limit}")]
    ResponseTooLarge { size: usize, limit: usize },

    /// Envelope could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EndpointError {
    /// HTTP status the error is surfaced as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EndpointError::InvalidParameterName(_) | EndpointError::ParameterTooLong(_) => {
                StatusCode::BAD_REQUEST
            }
            EndpointError::ResponseTooLarge { .. } | EndpointError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the error envelope.
    ///
    /// Input errors describe the violation; server-side errors use fixed
    /// messages so internal detail is never disclosed.
    pub fn public_message(&self) -> String {
        match self {
            EndpointError::InvalidParameterName(_) | EndpointError::ParameterTooLong(_) => {
                format!("Invalid request parameters: {}", self)
            }
            EndpointError::ResponseTooLarge { .. } => RESPONSE_TOO_LARGE_MESSAGE.to_string(),
            EndpointError::Serialization(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    /// Short label used for rejection metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            EndpointError::InvalidParameterName(_) => "invalid_name",
            EndpointError::ParameterTooLong(_) => "too_long",
            EndpointError::ResponseTooLarge { .. } => "response_too_large",
            EndpointError::Serialization(_) => "serialization",
        }
    }
}
