use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::domain::{ListParams, Page, Scraper, ScraperCreate, ScraperPage};
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::schema;
use crate::services::require_id;

/// Scraper CRUD. This resource only exists on the new API generation, so
/// there is no legacy gateway in front of it.
pub struct ScraperService {
    http: HttpClient,
    use_mock_data: bool,
}

impl ScraperService {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            http: HttpClient::from_config(config, transport),
            use_mock_data: config.use_mock_data,
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ScraperCreate) -> Result<Scraper> {
        let payload = serde_json::to_value(&input)?;
        schema::SCRAPER_CREATE.validate(&payload)?;
        if self.use_mock_data {
            return Ok(mock_scraper(&input));
        }
        let body = self.http.post("/scrapers", payload).await?;
        schema::SCRAPER.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &ListParams) -> Result<ScraperPage> {
        if self.use_mock_data {
            let scraper = mock_scraper(&ScraperCreate {
                name: "Sample scraper".to_string(),
                target_url: "https://example.com".to_string(),
                description: None,
                selectors: Default::default(),
            });
            return Ok(Page::single(
                scraper,
                params.page.unwrap_or(1),
                params.per_page.unwrap_or(20),
            ));
        }
        let body = self.http.get("/scrapers", &params.to_query()).await?;
        schema::SCRAPER_PAGE.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Scraper> {
        require_id(id)?;
        if self.use_mock_data {
            let mut scraper = mock_scraper(&ScraperCreate {
                name: format!("Scraper {id}"),
                target_url: "https://example.com".to_string(),
                description: None,
                selectors: Default::default(),
            });
            scraper.id = id.to_string();
            return Ok(scraper);
        }
        let body = self.http.get(&format!("/scrapers/{id}"), &[]).await?;
        schema::SCRAPER.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, scraper), fields(scraper_id = %scraper.id))]
    pub async fn update(&self, scraper: &Scraper) -> Result<Scraper> {
        require_id(&scraper.id)?;
        let payload = serde_json::to_value(scraper)?;
        schema::SCRAPER.validate(&payload)?;
        if self.use_mock_data {
            return Ok(scraper.clone());
        }
        let body = self
            .http
            .put(&format!("/scrapers/{}", scraper.id), payload)
            .await?;
        schema::SCRAPER.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        require_id(id)?;
        if self.use_mock_data {
            return Ok(true);
        }
        let body = self.http.delete(&format!("/scrapers/{id}")).await?;
        Ok(body
            .get("deleted")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true))
    }
}

fn mock_scraper(input: &ScraperCreate) -> Scraper {
    Scraper {
        id: Uuid::new_v4().to_string(),
        name: input.name.clone(),
        description: input.description.clone(),
        target_url: input.target_url.clone(),
        selectors: input.selectors.clone(),
        created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::http::{TransportRequest, TransportResponse};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    struct FailingTransport {
        requests: Arc<Mutex<Vec<TransportRequest>>>,
    }

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
            self.requests.lock().await.push(request);
            Err(ClientError::Network("no response queued".to_string()))
        }
    }

    #[tokio::test]
    async fn create_without_target_url_fails_before_network() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let config = ApiConfig::default();
        let service = ScraperService::new(
            &config,
            Arc::new(FailingTransport {
                requests: requests.clone(),
            }),
        );
        let err = service
            .create(ScraperCreate {
                name: "Books".to_string(),
                target_url: String::new(),
                description: None,
                selectors: Default::default(),
            })
            .await
            .unwrap_err();
        assert!(err.is_validation(), "got {err}");
        assert!(requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn mock_create_generates_id_and_timestamp() {
        let config = ApiConfig {
            use_mock_data: true,
            ..ApiConfig::default()
        };
        let service = ScraperService::new(
            &config,
            Arc::new(FailingTransport {
                requests: Arc::new(Mutex::new(Vec::new())),
            }),
        );
        let scraper = service
            .create(ScraperCreate {
                name: "Books".to_string(),
                target_url: "https://books.example.com".to_string(),
                description: None,
                selectors: Default::default(),
            })
            .await
            .unwrap();
        assert!(!scraper.id.is_empty());
        assert!(scraper.created_at.is_some());
    }
}
