//! Response envelopes.
//!
//! # Responsibilities
//! - Build the success and error envelopes returned to callers
//! - Serialize them to compact JSON
//! - Carry the transport-neutral result of the request pipeline
//!
//! # Design Decisions
//! - The envelope is a tagged enum; `status` is the tag
//! - `parameters` is omitted entirely when nothing was supplied
//! - Parameter keys serialize in sorted order so identical inputs give
//!   identical bodies

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::http::params::SanitizedParameters;

/// Message of every success envelope.
pub const SUCCESS_MESSAGE: &str = "Request processed successfully";

/// Body written when even the error envelope cannot be serialized.
pub const FALLBACK_ERROR_BODY: &str = r#"{"status":"error","message":"Internal server error"}"#;

/// Content type of every endpoint response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Top-level JSON object returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResponseEnvelope {
    Success {
        message: String,
        timestamp: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<SanitizedParameters>,
    },
    Error {
        message: String,
        #[serde(rename = "statusCode")]
        status_code: u16,
        timestamp: u64,
    },
}

impl ResponseEnvelope {
    /// Success envelope; `params` is attached only when non-empty.
    pub fn success(params: SanitizedParameters) -> Self {
        ResponseEnvelope::Success {
            message: SUCCESS_MESSAGE.to_string(),
            timestamp: now_millis(),
            parameters: (!params.is_empty()).then_some(params),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        ResponseEnvelope::Error {
            message: message.into(),
            status_code: status.as_u16(),
            timestamp: now_millis(),
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            ResponseEnvelope::Success { timestamp, .. } | ResponseEnvelope::Error { timestamp, .. } => {
                *timestamp
            }
        }
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Status, headers and body produced by the endpoint pipeline.
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl EndpointResponse {
    /// Parse the body back into an envelope.
    pub fn envelope(&self) -> Result<ResponseEnvelope, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for EndpointResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        response.headers_mut().extend(self.headers);
        response
    }
}
