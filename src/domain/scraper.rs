use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A configured scraper: a target site plus the CSS selectors the backend
/// extracts fields with. Only the new API generation exposes this resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scraper {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub target_url: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub selectors: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperCreate {
    pub name: String,
    pub target_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub selectors: HashMap<String, String>,
}
