//! Template engine for prompt management using Jinja2 syntax.
//!
//! Templates live under `templates/prompts/` and are loaded once, on first use.

use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory relative to the project root
const TEMPLATE_DIR: &str = "templates/prompts";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Initialize the template environment with all templates from the templates directory.
fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    let template_path = Path::new(TEMPLATE_DIR);

    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    }

    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_templates_recursive(env, base_path, &path);
            } else if path.extension().is_some_and(|ext| ext == "jinja") {
                if let Ok(relative) = path.strip_prefix(base_path) {
                    // Template names always use forward slashes
                    let template_name = relative.to_string_lossy().replace('\\', "/");
                    if let Ok(content) = std::fs::read_to_string(&path) {
                        // Templates live for the whole process
                        let static_name: &'static str =
                            Box::leak(template_name.clone().into_boxed_str());
                        let static_content: &'static str = Box::leak(content.into_boxed_str());
                        if let Err(e) = env.add_template(static_name, static_content) {
                            tracing::warn!("Failed to load template {}: {}", template_name, e);
                        } else {
                            tracing::debug!("Loaded template: {}", template_name);
                        }
                    }
                }
            }
        }
    }
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a file-based template with the given context.
///
/// `template_name` is relative to `templates/prompts/`, e.g. `classification/system.jinja`.
pub fn render_template(
    template_name: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let env = get_environment();

    let template = env
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    render_with_context(&template, ctx)
}

/// Render an inline template source with the given context.
pub fn render_str(source: &str, ctx: &HashMap<&str, Value>) -> Result<String, TemplateError> {
    let env = Environment::new();
    env.render_str(source, context_value(ctx))
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

fn render_with_context(
    template: &minijinja::Template<'_, '_>,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    template
        .render(context_value(ctx))
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

fn context_value(ctx: &HashMap<&str, Value>) -> Value {
    Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_template_is_not_found() {
        let ctx = HashMap::new();
        let result = render_template("definitely_not_a_real_template.jinja", &ctx);
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_render_str() {
        let mut ctx = HashMap::new();
        ctx.insert("name", Value::from("Patna"));

        let rendered = render_str("Hello {{ name }}", &ctx).unwrap();
        assert_eq!(rendered, "Hello Patna");
    }
}
