use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{GeocodedLocation, ImageUpload};
use crate::features::reports::services::{Geocoder, ImageClassifier};
use crate::modules::storage::CsvReportStore;

/// Geocoder stub returning a fixed answer and counting calls
pub struct StubGeocoder {
    location: Option<GeocodedLocation>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn resolving(address: &str, latitude: f64, longitude: f64) -> Arc<Self> {
        Arc::new(Self {
            location: Some(GeocodedLocation {
                address: address.to_string(),
                latitude,
                longitude,
            }),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn not_found() -> Arc<Self> {
        Arc::new(Self {
            location: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, _query: &str) -> Result<Option<GeocodedLocation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.location.clone())
    }
}

/// Classifier stub replying with fixed text (or failing) and counting calls
pub struct StubClassifier {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    last_key: std::sync::Mutex<Option<String>>,
}

impl StubClassifier {
    pub fn replying(text: &str) -> Arc<Self> {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_reply(Err(message.to_string()))
    }

    fn with_reply(reply: std::result::Result<String, String>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_key: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_key(&self) -> Option<String> {
        self.last_key.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageClassifier for StubClassifier {
    async fn classify(&self, _image: &ImageUpload, api_key: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(api_key.to_string());
        self.reply
            .clone()
            .map_err(|msg| AppError::ExternalServiceError(format!("Error: {}", msg)))
    }
}

/// Report store in a fresh temporary directory; keep the `TempDir` alive
pub fn temp_store() -> (TempDir, Arc<CsvReportStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CsvReportStore::new(dir.path().join("reports.csv")));
    (dir, store)
}

pub fn pothole_photo() -> ImageUpload {
    ImageUpload {
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10],
        mime_type: "image/jpeg".to_string(),
        file_name: "pothole.jpg".to_string(),
    }
}
