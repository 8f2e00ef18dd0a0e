use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::admin::dtos::*;
use crate::features::admin::services::AdminService;
use crate::features::reports::dtos::ReportResponseDto;
use crate::shared::types::{ApiResponse, Meta};

/// List every submitted report
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    responses(
        (status = 200, description = "All reports in submission order", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Admin credentials required")
    ),
    tag = "admin",
    security(
        (),
        ("admin_basic" = [])
    )
)]
pub async fn list_reports(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list_reports().await?;
    let total = reports.len() as i64;
    let message = (total == 0).then(|| "No reports submitted yet.".to_string());
    let items: Vec<ReportResponseDto> = reports.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        message,
        Some(Meta { total }),
    )))
}

/// Coordinates of every report for the hotspot map
#[utoipa::path(
    get,
    path = "/api/admin/reports/map",
    responses(
        (status = 200, description = "Map points", body = ApiResponse<Vec<MapPointDto>>),
        (status = 401, description = "Admin credentials required")
    ),
    tag = "admin",
    security(
        (),
        ("admin_basic" = [])
    )
)]
pub async fn get_map_points(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<Vec<MapPointDto>>>> {
    let points: Vec<MapPointDto> = service
        .map_points()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = points.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(points),
        None,
        Some(Meta { total }),
    )))
}

/// Delete all reports
#[utoipa::path(
    delete,
    path = "/api/admin/reports",
    responses(
        (status = 200, description = "Report file removed", body = ApiResponse<ClearReportsResponseDto>),
        (status = 401, description = "Admin credentials required")
    ),
    tag = "admin",
    security(
        (),
        ("admin_basic" = [])
    )
)]
pub async fn clear_reports(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<ClearReportsResponseDto>>> {
    let cleared = service.clear_reports().await?;
    let message = if cleared {
        "Data deleted!"
    } else {
        "No reports submitted yet."
    };

    Ok(Json(ApiResponse::success(
        Some(ClearReportsResponseDto { cleared }),
        Some(message.to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::admin::routes;
    use crate::features::reports::models::{CreateReport, Report};
    use crate::shared::test_helpers::temp_store;
    use axum::Router;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_list_map_and_clear() {
        let (_dir, store) = temp_store();
        store
            .append(&Report::new(CreateReport {
                issue_text: "Large pothole, high severity".to_string(),
                location_text: "Boring Road, Patna".to_string(),
                latitude: 25.6152,
                longitude: 85.115,
            }))
            .await
            .unwrap();

        let app = Router::new().nest(
            "/api/admin",
            routes::routes(Arc::new(AdminService::new(store))),
        );
        let server = TestServer::new(app).unwrap();

        let listed: serde_json::Value = server.get("/api/admin/reports").await.json();
        assert_eq!(listed["meta"]["total"], 1);
        assert_eq!(listed["data"][0]["location_text"], "Boring Road, Patna");
        assert_eq!(listed["data"][0]["status"], "Pending");

        let map: serde_json::Value = server.get("/api/admin/reports/map").await.json();
        assert_eq!(map["data"][0]["lat"], 25.6152);
        assert_eq!(map["data"][0]["lon"], 85.115);

        let cleared: serde_json::Value = server.delete("/api/admin/reports").await.json();
        assert_eq!(cleared["data"]["cleared"], true);
        assert_eq!(cleared["message"], "Data deleted!");

        let listed: serde_json::Value = server.get("/api/admin/reports").await.json();
        assert_eq!(listed["meta"]["total"], 0);
        assert_eq!(listed["data"], serde_json::json!([]));
        assert_eq!(listed["message"], "No reports submitted yet.");
    }
}
