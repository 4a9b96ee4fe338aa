//! Request deadline middleware.
//!
//! A request that outlives the configured deadline is answered with a 408
//! error envelope, so timeouts carry the same JSON body and content type
//! as every other error.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::handler::error_response;
use crate::observability::metrics;

pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out";

/// Run the rest of the stack under `limit`; use with
/// [`axum::middleware::from_fn_with_state`].
pub async fn enforce_timeout(State(limit): State<Duration>, req: Request, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Request exceeded deadline");
            metrics::record_rejection("timeout");
            error_response(StatusCode::REQUEST_TIMEOUT, REQUEST_TIMEOUT_MESSAGE).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::JSON_CONTENT_TYPE;
    use axum::body::{to_bytes, Body};
    use axum::http::header::CONTENT_TYPE;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn router(limit: Duration) -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/fast", get(|| async { "on time" }))
            .layer(from_fn_with_state(limit, enforce_timeout))
    }

    async fn get_uri(router: Router, uri: &str) -> Response {
        router
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_slow_request_gets_json_408() {
        let response = get_uri(router(Duration::from_millis(20)), "/slow").await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["statusCode"], 408);
        assert_eq!(json["message"], REQUEST_TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    async fn test_fast_request_passes_through() {
        let response = get_uri(router(Duration::from_secs(5)), "/fast").await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"on time");
    }
}
