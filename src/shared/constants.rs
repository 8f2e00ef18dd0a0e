/// Maximum accepted photo size (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Photo formats accepted from the camera or gallery upload
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Exact reply the model is instructed to give for non-civic images
pub const INVALID_IMAGE_SENTINEL: &str = "INVALID IMAGE";

/// Substring that marks a reply as a rejection; any reply containing the sentinel contains it
pub const REJECTION_MARKER: &str = "INVALID";

// =============================================================================
// REPORT FILE
// =============================================================================

/// Timestamp format of the `Date` column
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Canonical MIME type for an uploaded photo, or None if the format is not accepted
pub fn normalize_image_mime_type(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/jpeg" | "image/jpg" => Some("image/jpeg"),
        "image/png" => Some("image/png"),
        _ => None,
    }
}
