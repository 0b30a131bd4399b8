//! Transport port and the validated HTTP client built on top of it.
//!
//! The client knows nothing about entities: it joins paths onto the base URL,
//! serializes query pairs, attaches the bearer token, and normalizes non-2xx
//! responses into [`ClientError::Api`]. Retries are the caller's business.

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Lowest-level seam over the network, so tests can substitute a recording
/// double. A transport failure (timeout, DNS, refused connection) surfaces
/// as [`ClientError::Network`]; HTTP status handling happens above.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Production transport backed by a shared reqwest client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}

/// Structured error payload both API generations respond with.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<Value>,
}

/// One method per verb, paths relative to the configured base URL.
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    bearer_token: Option<String>,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new(
        base_url: &str,
        bearer_token: Option<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
            transport,
        }
    }

    pub fn from_config(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self::new(&config.base_url, config.bearer_token.clone(), transport)
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, &[], None).await
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> Result<String> {
        let full = format!("{}{}", self.base_url, path);
        let parsed = if query.is_empty() {
            Url::parse(&full)
        } else {
            Url::parse_with_params(&full, query)
        };
        parsed
            .map(String::from)
            .map_err(|e| ClientError::Config(format!("invalid URL '{full}': {e}")))
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value> {
        let url = self.url(path, query)?;
        debug!(%method, %url, "dispatching request");
        let response = self
            .transport
            .send(TransportRequest {
                method,
                url,
                bearer: self.bearer_token.clone(),
                body,
            })
            .await?;

        if !(200..300).contains(&response.status) {
            return Err(api_error(response.status, &response.body));
        }
        if response.body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Builds an `Api` error from a non-2xx response, preserving the status even
/// when the body is not the documented `{error, message, code}` shape.
fn api_error(status: u16, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => ClientError::Api {
            status,
            code: parsed.code.unwrap_or_else(|| format!("http_{status}")),
            message: parsed
                .message
                .unwrap_or_else(|| "request failed".to_string()),
            details: parsed.details,
        },
        Err(_) => {
            let text = String::from_utf8_lossy(body);
            let text = text.trim();
            ClientError::Api {
                status,
                code: format!("http_{status}"),
                message: if text.is_empty() {
                    "request failed".to_string()
                } else {
                    text.to_string()
                },
                details: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::Mutex;

    struct StaticTransport {
        response: TransportResponse,
        pub requests: Mutex<Vec<TransportRequest>>,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
            self.requests.lock().await.push(request);
            Ok(self.response.clone())
        }
    }

    fn client_with(status: u16, body: &str) -> (HttpClient, Arc<StaticTransport>) {
        let transport = Arc::new(StaticTransport {
            response: TransportResponse {
                status,
                body: body.as_bytes().to_vec(),
            },
            requests: Mutex::new(Vec::new()),
        });
        let client = HttpClient::new(
            "http://api.test/v1/",
            Some("secret-token".to_string()),
            transport.clone(),
        );
        (client, transport)
    }

    #[tokio::test]
    async fn query_params_are_url_encoded() {
        let (client, transport) = client_with(200, "{}");
        client
            .get(
                "/jobs",
                &[
                    ("page".to_string(), "2".to_string()),
                    ("search".to_string(), "a b".to_string()),
                ],
            )
            .await
            .unwrap();
        let requests = transport.requests.lock().await;
        assert_eq!(requests[0].url, "http://api.test/v1/jobs?page=2&search=a+b");
        assert_eq!(requests[0].bearer.as_deref(), Some("secret-token"));
    }

    #[tokio::test]
    async fn structured_error_body_is_normalized() {
        let (client, _) = client_with(
            404,
            r#"{"error": true, "message": "job not found", "code": "not_found"}"#,
        );
        let err = client.get("/jobs/missing", &[]).await.unwrap_err();
        match err {
            ClientError::Api { status, code, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(code, "not_found");
                assert_eq!(message, "job not found");
            }
            other => panic!("expected Api error, got {other}"),
        }
    }

    #[tokio::test]
    async fn unparseable_error_body_still_carries_status() {
        let (client, _) = client_with(500, "<html>boom</html>");
        let err = client
            .patch("/jobs/1", json!({"status": "cancelled"}))
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, code, .. } => {
                assert_eq!(status, 500);
                assert_eq!(code, "http_500");
            }
            other => panic!("expected Api error, got {other}"),
        }
    }

    #[tokio::test]
    async fn empty_success_body_becomes_null() {
        let (client, _) = client_with(204, "");
        let value = client.delete("/jobs/1").await.unwrap();
        assert_eq!(value, json!(null));
    }
}
