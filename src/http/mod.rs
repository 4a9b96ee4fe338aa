//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! GET <servlet_path>?query
//!     → server.rs (Axum setup, middleware, query extraction)
//!     → middleware.rs (request deadline, JSON 408)
//!     → request.rs (request ID)
//!     → handler.rs (pipeline state machine)
//!         → params.rs (name check, length check, sanitize)
//!         → response.rs (envelope, JSON)
//!         → size budget, security headers
//!     → Send to client
//! ```

pub mod error;
pub mod handler;
pub mod middleware;
pub mod params;
pub mod request;
pub mod response;
pub mod server;

pub use error::EndpointError;
pub use handler::EndpointHandler;
pub use params::{ParameterValidator, RawParameters, SanitizedParameters};
pub use request::X_REQUEST_ID;
pub use response::{EndpointResponse, ResponseEnvelope};
pub use server::HttpServer;
