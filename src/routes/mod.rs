//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the design upload/query endpoints and the health check
//! under a single Axum router. The request body cap is derived from the
//! parser's size limit so that oversized uploads still reach the parser's
//! size gate and get a typed error instead of a bare 413 from Axum.

pub mod designs;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = body_limit_for(state.parser.limits().max_file_size_bytes);

    Router::new()
        .route("/api/designs", get(designs::list_designs).post(designs::create_design))
        .route(
            "/api/designs/{id}",
            get(designs::get_design).delete(designs::delete_design),
        )
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Twice the parser limit, so the parser rejects first.
fn body_limit_for(max_file_size_bytes: usize) -> usize {
    max_file_size_bytes.saturating_mul(2)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_doubles_parser_limit() {
        assert_eq!(body_limit_for(1024), 2048);
        assert_eq!(body_limit_for(usize::MAX), usize::MAX);
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        assert_eq!(healthz().await, StatusCode::OK);
    }
}
