use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;
use crate::shared::constants::MAX_IMAGE_SIZE;

/// Create routes for the citizen reporting form
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            // Allow body size up to MAX_IMAGE_SIZE + buffer for multipart overhead
            post(handlers::submit_report).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .route("/api/geocode", get(handlers::geocode_location))
        .with_state(report_service)
}
