//! HTML/attribute escaping for echoed parameter values.
//!
//! # Responsibilities
//! - Neutralize script-injection payloads before they reach a response body
//! - Pass absent values through untouched
//!
//! # Design Decisions
//! - Replacement order is fixed: `&` is escaped first so the entities
//!   introduced by the later rules are never escaped a second time
//! - No truncation or whitespace normalization; length limits live in the
//!   parameter validator

/// Ordered replacement table. Order matters.
const REPLACEMENTS: [(char, &str); 6] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('/', "&#x2F;"),
];

/// Escape HTML-significant characters in `input`.
pub fn escape(input: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(input.to_string(), |acc, (from, to)| acc.replace(*from, to))
}

/// Sanitize an optional raw value. Absent input stays absent.
pub fn sanitize(input: Option<&str>) -> Option<String> {
    input.map(escape)
}
