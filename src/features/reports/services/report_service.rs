use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, GeocodedLocation, ImageUpload, Report};
use crate::features::reports::services::{Geocoder, ImageClassifier, Verdict};
use crate::modules::storage::CsvReportStore;

/// Raw submission as collected from the form
#[derive(Debug, Clone, Default)]
pub struct SubmitReport {
    pub image: Option<ImageUpload>,
    pub location: Option<String>,
    pub api_key: Option<String>,
}

/// Outcome of an accepted submission
#[derive(Debug, Clone)]
pub struct SubmittedReport {
    pub report: Report,
    /// Address the location text resolved to
    pub address: String,
}

/// Service for citizen report submission
pub struct ReportService {
    geocoder: Arc<dyn Geocoder>,
    classifier: Arc<dyn ImageClassifier>,
    store: Arc<CsvReportStore>,
    default_api_key: Option<String>,
}

impl ReportService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        classifier: Arc<dyn ImageClassifier>,
        store: Arc<CsvReportStore>,
        default_api_key: Option<String>,
    ) -> Self {
        Self {
            geocoder,
            classifier,
            store,
            default_api_key,
        }
    }

    /// Resolve a place name for the live map preview
    pub async fn preview_location(&self, query: &str) -> Result<GeocodedLocation> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("Location is required".to_string()));
        }

        self.geocoder.geocode(query).await?.ok_or_else(|| {
            AppError::NotFound("Location not found! Try adding city name.".to_string())
        })
    }

    /// Validate, geocode, classify and persist a submission
    ///
    /// Nothing is written unless every step succeeds and the classifier
    /// does not reject the photo.
    pub async fn submit(&self, input: SubmitReport) -> Result<SubmittedReport> {
        let location = input
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        let api_key = input
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| self.default_api_key.clone());

        let (image, location, api_key) = match (input.image, location, api_key) {
            (Some(image), Some(location), Some(api_key)) => (image, location, api_key),
            _ => {
                return Err(AppError::BadRequest(
                    "Please provide photo, location and API key".to_string(),
                ))
            }
        };

        let resolved = self.geocoder.geocode(&location).await?.ok_or_else(|| {
            AppError::Validation("Location not found! Try adding city name.".to_string())
        })?;

        let reply = self.classifier.classify(&image, &api_key).await?;

        if Verdict::from_reply(&reply) == Verdict::Rejected {
            tracing::info!(
                "Rejected submission for '{}': classifier flagged the photo",
                location
            );
            return Err(AppError::Rejected { reason: reply });
        }

        let report = Report::new(CreateReport {
            issue_text: reply,
            location_text: location,
            latitude: resolved.latitude,
            longitude: resolved.longitude,
        });
        self.store.append(&report).await?;

        tracing::info!(
            "Registered report at '{}' ({}, {})",
            report.location_text,
            report.latitude,
            report.longitude
        );

        Ok(SubmittedReport {
            report,
            address: resolved.address,
        })
    }
}
