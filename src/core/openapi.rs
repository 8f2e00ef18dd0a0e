use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::submit_report,
        reports_handlers::report_handler::geocode_location,
        // Admin
        admin_handlers::admin_handlers::list_reports,
        admin_handlers::admin_handlers::get_map_points,
        admin_handlers::admin_handlers::clear_reports,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_models::ReportStatus,
            reports_dtos::SubmitReportForm,
            reports_dtos::ReportResponseDto,
            reports_dtos::SubmitReportResponseDto,
            reports_dtos::GeocodeResponseDto,
            ApiResponse<reports_dtos::SubmitReportResponseDto>,
            ApiResponse<reports_dtos::GeocodeResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Admin
            admin_dtos::MapPointDto,
            admin_dtos::ClearReportsResponseDto,
            ApiResponse<Vec<admin_dtos::MapPointDto>>,
            ApiResponse<admin_dtos::ClearReportsResponseDto>,
        )
    ),
    tags(
        (name = "reports", description = "Citizen complaint submission and location lookup"),
        (name = "admin", description = "Administrator dashboard"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "CivicAI API",
        version = "0.1.0",
        description = "Smart civic issue reporting",
    )
)]
pub struct ApiDoc;

/// Adds the admin basic auth scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_basic",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
