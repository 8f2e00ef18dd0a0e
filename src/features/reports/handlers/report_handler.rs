use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::reports::dtos::{
    GeocodeQueryDto, GeocodeResponseDto, SubmitReportForm, SubmitReportResponseDto,
};
use crate::features::reports::models::ImageUpload;
use crate::features::reports::services::{ReportService, SubmitReport};
use crate::shared::constants::{
    normalize_image_mime_type, ALLOWED_IMAGE_MIME_TYPES, MAX_IMAGE_SIZE,
};
use crate::shared::types::ApiResponse;

/// Submit a complaint
///
/// Accepts multipart/form-data with:
/// - `image`: photo of the issue, jpg or png (required)
/// - `location`: area name (required)
/// - `api_key`: Gemini API key (optional when the server has one configured)
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = SubmitReportForm,
        content_type = "multipart/form-data",
        description = "Photo, location and API key",
    ),
    responses(
        (status = 201, description = "Complaint registered", body = ApiResponse<SubmitReportResponseDto>),
        (status = 400, description = "Missing photo, location or API key, or location not found"),
        (status = 422, description = "Image does not show a civic issue"),
        (status = 502, description = "Geocoding or image analysis failed")
    )
)]
pub async fn submit_report(
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmitReportResponseDto>>)> {
    let mut input = SubmitReport::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let declared_type = field.content_type().map(|s| s.to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "photo".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read image bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read image data: {}", e))
                })?;

                // Browsers send an empty part when no photo was chosen
                if data.is_empty() {
                    continue;
                }

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "Image too large. Maximum size is {} MB",
                        MAX_IMAGE_SIZE / 1024 / 1024
                    )));
                }

                // Fall back to the file extension only when no real type was sent
                let mime_type = match declared_type.as_deref() {
                    None | Some("application/octet-stream") => {
                        mime_type_from_file_name(&file_name)
                    }
                    Some(declared) => normalize_image_mime_type(declared),
                }
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Image type '{}' is not allowed. Allowed types: {}",
                        declared_type.as_deref().unwrap_or("unknown"),
                        ALLOWED_IMAGE_MIME_TYPES.join(", ")
                    ))
                })?;

                input.image = Some(ImageUpload {
                    bytes: data.to_vec(),
                    mime_type: mime_type.to_string(),
                    file_name,
                });
            }
            "location" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read location field: {}", e))
                })?;
                input.location = Some(text);
            }
            "api_key" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read api_key field: {}", e))
                })?;
                input.api_key = Some(text);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let submitted = service.submit(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(submitted.into()),
            Some("Complaint registered successfully!".to_string()),
            None,
        )),
    ))
}

/// Resolve a place name for the map preview
#[utoipa::path(
    get,
    path = "/api/geocode",
    tag = "reports",
    params(GeocodeQueryDto),
    responses(
        (status = 200, description = "Location found", body = ApiResponse<GeocodeResponseDto>),
        (status = 400, description = "Missing or invalid query"),
        (status = 404, description = "Location not found"),
        (status = 502, description = "Geocoding service failed")
    )
)]
pub async fn geocode_location(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<GeocodeQueryDto>,
) -> Result<Json<ApiResponse<GeocodeResponseDto>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let location = service.preview_location(&query.q).await?;
    let message = format!("Found: {}", location.address);

    Ok(Json(ApiResponse::success(
        Some(location.into()),
        Some(message),
        None,
    )))
}

fn mime_type_from_file_name(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}
