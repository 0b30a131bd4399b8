use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::domain::{Job, JobCreate, JobListParams, JobPage, JobRun, JobStatus, Page};
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::schema;
use crate::services::require_id;

/// New-generation job operations: schema-validated in, schema-validated out.
pub struct JobService {
    http: HttpClient,
    use_mock_data: bool,
}

impl JobService {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            http: HttpClient::from_config(config, transport),
            use_mock_data: config.use_mock_data,
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: JobCreate) -> Result<Job> {
        let payload = serde_json::to_value(&input)?;
        schema::JOB_CREATE.validate(&payload)?;
        if self.use_mock_data {
            return Ok(mock_job(&input));
        }
        let body = self.http.post("/jobs", payload).await?;
        schema::JOB.validate(&body)?;
        let job: Job = serde_json::from_value(body)?;
        info!(job_id = %job.id, "created job");
        Ok(job)
    }

    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &JobListParams) -> Result<JobPage> {
        if self.use_mock_data {
            return Ok(mock_job_page(params));
        }
        let body = self.http.get("/jobs", &params.to_query()).await?;
        schema::JOB_PAGE.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Job> {
        require_id(id)?;
        if self.use_mock_data {
            return Ok(mock_job_with_id(id));
        }
        let body = self.http.get(&format!("/jobs/{id}"), &[]).await?;
        schema::JOB.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, job), fields(job_id = %job.id))]
    pub async fn update(&self, job: &Job) -> Result<Job> {
        require_id(&job.id)?;
        let payload = serde_json::to_value(job)?;
        schema::JOB.validate(&payload)?;
        if self.use_mock_data {
            return Ok(job.clone());
        }
        let body = self.http.put(&format!("/jobs/{}", job.id), payload).await?;
        schema::JOB.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        require_id(id)?;
        if self.use_mock_data {
            return Ok(true);
        }
        let body = self.http.delete(&format!("/jobs/{id}")).await?;
        Ok(body
            .get("deleted")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true))
    }

    #[instrument(skip(self))]
    pub async fn run(&self, id: &str) -> Result<Job> {
        require_id(id)?;
        if self.use_mock_data {
            let mut job = mock_job_with_id(id);
            job.status = JobStatus::Running;
            job.started_at = Some(now_timestamp());
            return Ok(job);
        }
        let body = self.http.post(&format!("/jobs/{id}/run"), json!({})).await?;
        schema::JOB.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    pub async fn history(&self, id: &str) -> Result<Vec<JobRun>> {
        require_id(id)?;
        if self.use_mock_data {
            return Ok(mock_history(id));
        }
        let body = self.http.get(&format!("/jobs/{id}/history"), &[]).await?;
        schema::JOB_HISTORY.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn mock_job(input: &JobCreate) -> Job {
    Job {
        id: Uuid::new_v4().to_string(),
        name: input.name.clone(),
        description: input.description.clone(),
        scraper_id: input.scraper_id.clone(),
        status: JobStatus::Pending,
        created_at: Some(now_timestamp()),
        started_at: None,
        completed_at: None,
        options: input.options.clone().unwrap_or_default(),
        metadata: serde_json::Map::new(),
    }
}

fn mock_job_with_id(id: &str) -> Job {
    let mut job = mock_job(&JobCreate {
        name: format!("Job {id}"),
        scraper_id: "mock-scraper".to_string(),
        description: None,
        options: None,
    });
    job.id = id.to_string();
    job
}

fn mock_job_page(params: &JobListParams) -> JobPage {
    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(20);
    let job = mock_job(&JobCreate {
        name: "Sample scrape".to_string(),
        scraper_id: "mock-scraper".to_string(),
        description: Some("placeholder entry".to_string()),
        options: None,
    });
    Page::single(job, page, per_page)
}

fn mock_history(id: &str) -> Vec<JobRun> {
    let now = now_timestamp();
    vec![JobRun {
        id: Uuid::new_v4().to_string(),
        job_id: id.to_string(),
        status: JobStatus::Completed,
        started_at: Some(now.clone()),
        completed_at: Some(now),
        pages_scraped: Some(0),
        error: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::http::{TransportRequest, TransportResponse};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Records every request; answers with queued responses.
    struct RecordingTransport {
        requests: Arc<Mutex<Vec<TransportRequest>>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
            self.requests.lock().await.push(request);
            Err(ClientError::Network("no response queued".to_string()))
        }
    }

    fn mock_service() -> (JobService, Arc<Mutex<Vec<TransportRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let config = ApiConfig {
            use_mock_data: true,
            ..ApiConfig::default()
        };
        let service = JobService::new(
            &config,
            Arc::new(RecordingTransport {
                requests: requests.clone(),
            }),
        );
        (service, requests)
    }

    #[tokio::test]
    async fn mock_create_echoes_input_without_network() {
        let (service, requests) = mock_service();
        let job = service
            .create(JobCreate {
                name: "X".to_string(),
                scraper_id: "Y".to_string(),
                description: None,
                options: None,
            })
            .await
            .unwrap();
        assert!(!job.id.is_empty());
        assert_eq!(job.name, "X");
        assert_eq!(job.scraper_id, "Y");
        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.created_at.is_some());
        assert!(requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn create_without_name_fails_before_network() {
        let (service, requests) = mock_service();
        let err = service
            .create(JobCreate {
                name: String::new(),
                scraper_id: "scraper-1".to_string(),
                description: None,
                options: None,
            })
            .await
            .unwrap_err();
        assert!(err.is_validation(), "got {err}");
        assert!(requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn get_with_empty_id_fails_before_network() {
        let (service, requests) = mock_service();
        let err = service.get("").await.unwrap_err();
        assert!(err.is_validation(), "got {err}");
        assert!(requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn mock_run_marks_job_running() {
        let (service, _) = mock_service();
        let job = service.run("job-9").await.unwrap();
        assert_eq!(job.id, "job-9");
        assert_eq!(job.status, JobStatus::Running);
        assert!(job.started_at.is_some());
    }
}
