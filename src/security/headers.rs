//! Security response headers.
//!
//! # Responsibilities
//! - Emit the fixed hardening header set on successful responses
//!
//! # Design Decisions
//! - Header values are static; nothing is derived from the request
//! - Only the success path calls this (error responses go out without the
//!   set, matching the endpoint's observed contract)

use axum::http::header::{
    HeaderName, HeaderValue, CONTENT_SECURITY_POLICY, STRICT_TRANSPORT_SECURITY,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use axum::http::HeaderMap;

/// The header set, in emission order.
pub const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (X_FRAME_OPTIONS, "DENY"),
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_XSS_PROTECTION, "1; mode=block"),
    (STRICT_TRANSPORT_SECURITY, "max-age=31536000; includeSubDomains"),
    (CONTENT_SECURITY_POLICY, "default-src 'self'"),
];

/// Set every security header on `headers`, replacing existing values.
pub fn apply_security_headers(headers: &mut HeaderMap) {
    for (name, value) in SECURITY_HEADERS.iter() {
        headers.insert(name.clone(), HeaderValue::from_static(value));
    }
}
