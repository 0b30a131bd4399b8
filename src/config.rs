use serde::Deserialize;
use std::env;
use std::fs;

use crate::error::{ClientError, Result};

const CONFIG_PATH: &str = "scrapedash.toml";

/// Process-wide API configuration, built once at startup and injected into
/// gateway/service constructors. Never mutated mid-call.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional bearer token attached to every request.
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// Selects the validated service path over the legacy fetch path.
    #[serde(default = "default_true")]
    pub use_new_api_layer: bool,
    /// Makes the service layer synthesize responses instead of calling the
    /// network. Has no effect on the legacy path, which always hits the API.
    #[serde(default)]
    pub use_mock_data: bool,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bearer_token: None,
            use_new_api_layer: true,
            use_mock_data: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `scrapedash.toml` (when present) and applies
    /// environment overrides. A missing file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(_) => ApiConfig::default(),
        };
        config.apply_env();

        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url must not be empty".into()));
        }
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(value) = env::var("SCRAPEDASH_BASE_URL") {
            self.base_url = value;
        }
        if let Ok(value) = env::var("SCRAPEDASH_BEARER_TOKEN") {
            self.bearer_token = Some(value);
        }
        if let Ok(value) = env::var("SCRAPEDASH_USE_NEW_API_LAYER") {
            self.use_new_api_layer = parse_bool(&value, self.use_new_api_layer);
        }
        if let Ok(value) = env::var("SCRAPEDASH_USE_MOCK_DATA") {
            self.use_mock_data = parse_bool(&value, self.use_mock_data);
        }
    }
}

fn parse_bool(raw: &str, fallback: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prefer_new_api_without_mocks() {
        let config = ApiConfig::default();
        assert!(config.use_new_api_layer);
        assert!(!config.use_mock_data);
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: ApiConfig = toml::from_str(
            r#"
            base_url = "https://api.example.com/v2"
            use_new_api_layer = false
            use_mock_data = true
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v2");
        assert!(!config.use_new_api_layer);
        assert!(config.use_mock_data);
    }

    #[test]
    fn bool_parsing_falls_back_on_garbage() {
        assert!(parse_bool("true", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("definitely", true));
        assert!(!parse_bool("definitely", false));
    }
}
