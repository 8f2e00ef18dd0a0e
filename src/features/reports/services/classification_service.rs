use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use crate::core::config::GeminiConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::ImageUpload;
use crate::shared::constants::REJECTION_MARKER;
use crate::shared::prompts::render_classification_prompt;

/// Vision model that describes the civic issue shown in a photo
///
/// Returns the model's raw reply text. One outbound call per invocation.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: &ImageUpload, api_key: &str) -> Result<String>;
}

/// Accept/reject decision derived from a classifier reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    /// Plain, case-sensitive substring search for the rejection marker
    pub fn from_reply(reply: &str) -> Self {
        if reply.contains(REJECTION_MARKER) {
            Verdict::Rejected
        } else {
            Verdict::Accepted
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined in order
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini `generateContent` client
pub struct GeminiClassifier {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClassifier {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ImageClassifier for GeminiClassifier {
    async fn classify(&self, image: &ImageUpload, api_key: &str) -> Result<String> {
        if api_key.trim().is_empty() {
            return Err(AppError::BadRequest("API key missing".to_string()));
        }

        let prompt = render_classification_prompt()
            .map_err(|e| AppError::Internal(format!("Failed to render prompt: {}", e)))?;

        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": prompt },
                { "inlineData": { "mimeType": image.mime_type, "data": STANDARD.encode(&image.bytes) } }
            ]}]
        });

        tracing::info!(
            "Classifying {} via Gemini {} ({} bytes)",
            image.file_name,
            self.model,
            image.bytes.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key.trim())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {:?}", e);
                AppError::ExternalServiceError(format!("Error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(AppError::ExternalServiceError(format!(
                "Error: Gemini returned {}: {}",
                status, message
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {:?}", e);
            AppError::ExternalServiceError(format!("Error: invalid Gemini response: {}", e))
        })?;

        let block_reason = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone());

        parsed.into_text().ok_or_else(|| {
            AppError::ExternalServiceError(match block_reason {
                Some(reason) => format!("Error: Gemini blocked the request ({})", reason),
                None => "Error: Gemini returned no text".to_string(),
            })
        })
    }
}
