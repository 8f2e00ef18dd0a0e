mod classification_service;
mod geocoding_service;
mod report_service;

pub use classification_service::{GeminiClassifier, ImageClassifier, Verdict};
pub use geocoding_service::{Geocoder, GeocodingService};
pub use report_service::{ReportService, SubmitReport, SubmittedReport};
