use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{GeocodedLocation, Report, ReportStatus};
use crate::features::reports::services::SubmittedReport;
use crate::shared::constants::REPORT_DATE_FORMAT;

/// Multipart form for submitting a complaint (documentation only)
///
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SubmitReportForm {
    /// Photo of the issue, from camera or gallery (jpg or png)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    /// Area name
    #[schema(example = "Boring Road, Patna")]
    pub location: String,
    /// Gemini API key; falls back to the server key when omitted
    pub api_key: Option<String>,
}

/// Response DTO for a stored report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    /// Submission time, `YYYY-MM-DD HH:MM`
    #[schema(example = "2026-10-15 14:30")]
    pub date_time: String,
    pub issue_text: String,
    pub location_text: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ReportStatus,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            date_time: r.date_time.format(REPORT_DATE_FORMAT).to_string(),
            issue_text: r.issue_text,
            location_text: r.location_text,
            latitude: r.latitude,
            longitude: r.longitude,
            status: r.status,
        }
    }
}

/// Response DTO for an accepted complaint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitReportResponseDto {
    pub report: ReportResponseDto,
    /// Address the location resolved to
    pub address: String,
}

impl From<SubmittedReport> for SubmitReportResponseDto {
    fn from(s: SubmittedReport) -> Self {
        Self {
            report: s.report.into(),
            address: s.address,
        }
    }
}

/// Query for the location preview
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct GeocodeQueryDto {
    /// Free-text place name
    #[validate(length(min = 1, max = 512, message = "Location must be 1-512 characters"))]
    #[param(example = "Boring Road, Patna")]
    pub q: String,
}

/// Resolved location for the map preview
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeocodeResponseDto {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeocodedLocation> for GeocodeResponseDto {
    fn from(l: GeocodedLocation) -> Self {
        Self {
            address: l.address,
            latitude: l.latitude,
            longitude: l.longitude,
        }
    }
}
