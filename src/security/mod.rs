//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Validated parameter value:
//!     → sanitize.rs (HTML escaping)
//!     → echoed in the success envelope
//!
//! Outgoing success response:
//!     → headers.rs (hardening header set)
//! ```
//!
//! # Design Decisions
//! - No trust in client input: every echoed value is escaped
//! - Fail closed: any validation failure rejects the whole request

pub mod headers;
pub mod sanitize;

pub use headers::apply_security_headers;
pub use sanitize::sanitize;
