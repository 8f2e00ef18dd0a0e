mod geocoded_location;
mod image_upload;
mod report;

pub use geocoded_location::GeocodedLocation;
pub use image_upload::ImageUpload;
pub use report::{CreateReport, MapPoint, Report, ReportStatus};
