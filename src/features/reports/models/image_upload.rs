/// Photo received from the camera or gallery upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Canonical MIME type (`image/jpeg` or `image/png`)
    pub mime_type: String,
    pub file_name: String,
}
