use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin dashboard routes
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/reports",
            get(handlers::list_reports).delete(handlers::clear_reports),
        )
        .route("/reports/map", get(handlers::get_map_points))
        .with_state(admin_service)
}
