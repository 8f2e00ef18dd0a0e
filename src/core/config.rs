use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    pub gemini: GeminiConfig,
    pub geocoder: GeocoderConfig,
    pub swagger: SwaggerConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Location of the flat report file
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub reports_file: PathBuf,
}

/// Gemini vision model settings
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Server-side key, used when a submission does not carry its own
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Nominatim geocoder settings
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Optional basic auth in front of the admin dashboard
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    /// Read configuration from the process environment; `.env` is loaded by the caller
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
            geocoder: GeocoderConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            admin: AdminConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    const DEFAULT_REPORTS_FILE: &'static str = "reports.csv";

    pub fn from_env() -> Result<Self, String> {
        let reports_file = env::var("REPORTS_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_REPORTS_FILE.to_string());

        Ok(Self {
            reports_file: PathBuf::from(reports_file),
        })
    }
}

impl GeminiConfig {
    const DEFAULT_MODEL: &'static str = "gemini-flash-latest";
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());
        let base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        if model.trim().is_empty() {
            return Err("GEMINI_MODEL must not be empty".to_string());
        }

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}

impl GeocoderConfig {
    const DEFAULT_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";
    const DEFAULT_USER_AGENT: &'static str = "civic_ai_app_v2";

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("NOMINATIM_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let user_agent = env::var("GEOCODER_USER_AGENT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            base_url,
            user_agent,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "CivicAI API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Smart civic issue reporting".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        basic_credentials(&self.username, &self.password)
    }
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());

        if username.is_some() != password.is_some() {
            return Err("ADMIN_USERNAME and ADMIN_PASSWORD must be set together".to_string());
        }

        Ok(Self { username, password })
    }

    pub fn credentials(&self) -> Option<String> {
        basic_credentials(&self.username, &self.password)
    }
}

fn basic_credentials(username: &Option<String>, password: &Option<String>) -> Option<String> {
    match (username, password) {
        (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_parts() {
        let admin = AdminConfig {
            username: Some("nagar".to_string()),
            password: None,
        };
        assert_eq!(admin.credentials(), None);

        let admin = AdminConfig {
            username: Some("nagar".to_string()),
            password: Some("nigam".to_string()),
        };
        assert_eq!(admin.credentials(), Some("nagar:nigam".to_string()));
    }

    #[test]
    fn test_storage_config_reads_process_environment() {
        env::set_var("REPORTS_FILE", "data/complaints.csv");
        let storage = StorageConfig::from_env().unwrap();
        env::remove_var("REPORTS_FILE");

        assert_eq!(storage.reports_file, PathBuf::from("data/complaints.csv"));
    }

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }
}
