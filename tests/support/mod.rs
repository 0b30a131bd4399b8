use async_trait::async_trait;
use scrapedash_client::config::ApiConfig;
use scrapedash_client::error::{ClientError, Result};
use scrapedash_client::http::{Transport, TransportRequest, TransportResponse};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Transport double: records every request and answers from a queue of
/// canned responses. An empty queue surfaces as a network error, so a test
/// that expects zero calls fails loudly if one slips through.
pub struct RecordingTransport {
    pub requests: Arc<Mutex<Vec<TransportRequest>>>,
    responses: Mutex<VecDeque<TransportResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    pub async fn queue_json(&self, status: u16, body: Value) {
        self.responses.lock().await.push_back(TransportResponse {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        });
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub async fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .await
            .last()
            .expect("no request recorded")
            .clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().await.push(request);
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| ClientError::Network("no response queued".to_string()))
    }
}

pub fn test_config(use_new_api_layer: bool, use_mock_data: bool) -> ApiConfig {
    ApiConfig {
        base_url: "http://api.test/v1".to_string(),
        bearer_token: None,
        use_new_api_layer,
        use_mock_data,
    }
}
