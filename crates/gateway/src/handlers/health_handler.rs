//! Health check handlers.
//!
//! Both endpoints answer with a short plain-text body for load balancers and
//! orchestrators.

use axum::{extract::State, http::StatusCode, routing::get, Router};

use crate::state::AppState;

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(liveness))
        .route("/readyz", get(readiness))
}

/// Liveness: the process is serving requests.
pub async fn liveness() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness: the database answers a trivial query.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.database.ping().await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::error!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "db unavailable")
        }
    }
}
