use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::GeocoderConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::GeocodedLocation;

/// Forward geocoding of a free-text place name
///
/// Returns the first match, or `None` when the place cannot be resolved.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedLocation>>;
}

/// Nominatim API response structure
#[derive(Debug, Deserialize)]
pub struct NominatimResponse {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

impl NominatimResponse {
    /// Convert to a location, dropping matches with unparseable coordinates
    pub fn into_location(self) -> Option<GeocodedLocation> {
        let latitude = self.lat.trim().parse::<f64>().ok()?;
        let longitude = self.lon.trim().parse::<f64>().ok()?;

        Some(GeocodedLocation {
            address: self.display_name,
            latitude,
            longitude,
        })
    }
}

/// Service for geocoding place names using Nominatim
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Execute HTTP request to Nominatim and parse response
    async fn execute_request(&self, url: &str) -> Result<Option<NominatimResponse>> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Ok(None);
        }

        let results: Vec<NominatimResponse> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })?;

        Ok(results.into_iter().next())
    }
}

#[async_trait]
impl Geocoder for GeocodingService {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedLocation>> {
        let url = self.search_url(query);
        tracing::debug!("Geocoding: {} -> {}", query, url);

        let location = self
            .execute_request(&url)
            .await?
            .and_then(NominatimResponse::into_location);

        match &location {
            Some(found) => tracing::debug!(
                "Geocoded '{}' to {} ({}, {})",
                query,
                found.address,
                found.latitude,
                found.longitude
            ),
            None => tracing::info!("No geocoding match for '{}'", query),
        }

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::services::{ReportService, SubmitReport};
    use crate::shared::test_helpers::{pothole_photo, temp_store, StubClassifier};
    use axum::{
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use std::sync::Arc;
    use std::collections::HashMap;

    const BORING_ROAD: &str = r#"[{
        "place_id": 231614907,
        "licence": "Data © OpenStreetMap contributors",
        "lat": "25.6152305",
        "lon": "85.1150447",
        "display_name": "Boring Road, Patna, Bihar, 800001, India",
        "importance": 0.4
    }]"#;

    /// Nominatim stand-in that only knows "Boring Road, Patna" and throttles "Busy Square"
    async fn spawn_fake_nominatim() -> String {
        async fn search(Query(params): Query<HashMap<String, String>>) -> Response {
            match params.get("q").map(String::as_str) {
                Some("Boring Road, Patna") => {
                    Json(serde_json::from_str::<serde_json::Value>(BORING_ROAD).unwrap())
                        .into_response()
                }
                Some("Busy Square") => (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(serde_json::json!({ "error": "Rate limit exceeded" })),
                )
                    .into_response(),
                Some("Maintenance Lane") => {
                    (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance").into_response()
                }
                _ => Json(serde_json::json!([])).into_response(),
            }
        }

        let app = Router::new().route("/search", get(search));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn service(base_url: String) -> GeocodingService {
        GeocodingService::new(&GeocoderConfig {
            base_url,
            user_agent: "civicai-tests".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_into_location() {
        let results: Vec<NominatimResponse> = serde_json::from_str(BORING_ROAD).unwrap();
        let location = results.into_iter().next().unwrap().into_location().unwrap();

        assert_eq!(location.address, "Boring Road, Patna, Bihar, 800001, India");
        assert_eq!(location.latitude, 25.6152305);
        assert_eq!(location.longitude, 85.1150447);
    }

    #[test]
    fn test_into_location_rejects_bad_coordinates() {
        let response = NominatimResponse {
            lat: "north".to_string(),
            lon: "85.1".to_string(),
            display_name: "Somewhere".to_string(),
        };
        assert!(response.into_location().is_none());
    }

    #[test]
    fn test_search_url_encodes_query() {
        let service = service("https://nominatim.example".to_string());
        assert_eq!(
            service.search_url("Boring Road, Patna"),
            "https://nominatim.example/search?q=Boring%20Road%2C%20Patna&format=json&limit=1"
        );
    }

    #[tokio::test]
    async fn test_geocode_resolvable_place() {
        let service = service(spawn_fake_nominatim().await);

        let location = service.geocode("Boring Road, Patna").await.unwrap();
        let location = location.expect("place should resolve");
        assert_eq!(location.latitude, 25.6152305);
        assert_eq!(location.longitude, 85.1150447);
    }

    #[tokio::test]
    async fn test_geocode_unresolvable_place() {
        let service = service(spawn_fake_nominatim().await);

        let location = service.geocode("Nowhere Junction 404").await.unwrap();
        assert!(location.is_none());
    }

    #[tokio::test]
    async fn test_geocode_unreachable_service() {
        // Nothing listens on port 9 of localhost
        let service = service("http://127.0.0.1:9".to_string());

        let result = service.geocode("Boring Road, Patna").await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_geocode_error_status_is_not_found() {
        let service = service(spawn_fake_nominatim().await);

        assert!(service.geocode("Busy Square").await.unwrap().is_none());
        assert!(service.geocode("Maintenance Lane").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_throttled_geocoder_blocks_submission() {
        let geocoder = Arc::new(service(spawn_fake_nominatim().await));
        let classifier = StubClassifier::replying("Large pothole, high severity");
        let (_dir, store) = temp_store();
        let reports = ReportService::new(geocoder, classifier.clone(), store.clone(), None);

        let result = reports
            .submit(SubmitReport {
                image: Some(pothole_photo()),
                location: Some("Busy Square".to_string()),
                api_key: Some("key-123".to_string()),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(classifier.calls(), 0);
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
