//! Prompt template management.
//!
//! Templates are stored in `templates/prompts/` and use Jinja2 syntax. Each
//! prompt also has a built-in source so the service keeps working when the
//! template directory is not deployed next to the binary.

pub mod engine;

pub use engine::{render_str, render_template, TemplateError};

use minijinja::Value;
use std::collections::HashMap;

use crate::shared::constants::INVALID_IMAGE_SENTINEL;

const CLASSIFICATION_TEMPLATE: &str = "classification/system.jinja";

const CLASSIFICATION_FALLBACK: &str = r#"Analyze this image for civic issues like:
{% for kind in issue_kinds %}{{ loop.index }}. {{ kind }}
{% endfor %}
Identify the issue & severity.
If the image is a person, selfie, or unrelated object, reply exactly: "{{ sentinel }}"
"#;

/// Civic issue kinds the classifier is asked to look for
pub const CIVIC_ISSUE_KINDS: &[&str] = &[
    "Potholes",
    "Garbage Dumps",
    "Broken Street Lights",
    "Water Logging/Drainage",
];

/// Render the instruction sent with every photo to the vision model.
pub fn render_classification_prompt() -> Result<String, TemplateError> {
    let mut ctx: HashMap<&str, Value> = HashMap::new();
    ctx.insert("issue_kinds", Value::from(CIVIC_ISSUE_KINDS.to_vec()));
    ctx.insert("sentinel", Value::from(INVALID_IMAGE_SENTINEL));

    match render_template(CLASSIFICATION_TEMPLATE, &ctx) {
        Err(TemplateError::NotFound(_)) => {
            tracing::debug!(
                "Template '{}' not found, using built-in prompt",
                CLASSIFICATION_TEMPLATE
            );
            render_str(CLASSIFICATION_FALLBACK, &ctx)
        }
        other => other,
    }
}
