use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::firs::handlers;
use crate::features::firs::services::FirService;

/// Create routes for the FIR feature
///
/// Note: authentication is handled outside this service
pub fn routes(service: Arc<FirService>) -> Router {
    Router::new()
        .route(
            "/api/firs",
            get(handlers::list_all_firs).post(handlers::register_fir),
        )
        .route("/api/firs/alerts", get(handlers::list_priority_alerts))
        .route(
            "/api/firs/by-submitter/{submitter_id}",
            get(handlers::list_firs_by_submitter),
        )
        .with_state(service)
}
