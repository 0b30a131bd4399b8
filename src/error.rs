use thiserror::Error;

use crate::schema::SchemaViolations;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(SchemaViolations),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Validation failure for a single field, raised before any network call.
    pub fn invalid_field(path: &str, message: &str) -> Self {
        ClientError::Validation(SchemaViolations::single(path, message))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

// Transport failures are surfaced as `Network` so test doubles can produce
// the same variant without a live reqwest error.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
