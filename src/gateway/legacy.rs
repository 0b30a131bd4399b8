use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use crate::config::ApiConfig;
use crate::domain::{
    Job, JobCreate, JobListParams, JobPage, JobRun, ListParams, Workflow, WorkflowCreate,
    WorkflowPage, WorkflowValidation,
};
use crate::error::Result;
use crate::gateway::{JobGateway, WorkflowGateway};
use crate::http::{HttpClient, Transport};
use crate::services::require_id;
use crate::wire::mapper;
use crate::wire::{
    WireJobEnvelope, WireJobPage, WireRunHistory, WireWorkflowEnvelope, WireWorkflowPage,
};

/// Legacy-path gateway: direct requests against the old endpoint shapes.
/// Single entities travel wrapped (`{ "job": { ... } }`), statuses and
/// priorities are loose strings, and there is no schema validation and no
/// mock mode. Responses are unwrapped and mapped to domain here, so callers
/// get the same shapes as on the new path.
pub struct LegacyJobGateway {
    http: HttpClient,
}

impl LegacyJobGateway {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            http: HttpClient::from_config(config, transport),
        }
    }
}

#[async_trait]
impl JobGateway for LegacyJobGateway {
    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_job(&self, input: JobCreate) -> Result<Job> {
        let body = self
            .http
            .post("/jobs", json!({ "job": serde_json::to_value(&input)? }))
            .await?;
        let envelope: WireJobEnvelope = serde_json::from_value(body)?;
        Ok(mapper::job_to_domain(envelope.job))
    }

    #[instrument(skip(self, params))]
    async fn list_jobs(&self, params: &JobListParams) -> Result<JobPage> {
        let body = self.http.get("/jobs", &params.to_query()).await?;
        let page: WireJobPage = serde_json::from_value(body)?;
        Ok(mapper::job_page_to_domain(page))
    }

    #[instrument(skip(self))]
    async fn get_job(&self, id: &str) -> Result<Job> {
        require_id(id)?;
        let body = self.http.get(&format!("/jobs/{id}"), &[]).await?;
        let envelope: WireJobEnvelope = serde_json::from_value(body)?;
        Ok(mapper::job_to_domain(envelope.job))
    }

    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn update_job(&self, job: &Job) -> Result<Job> {
        require_id(&job.id)?;
        let wire = mapper::job_to_wire(job);
        let body = self
            .http
            .put(&format!("/jobs/{}", job.id), json!({ "job": wire }))
            .await?;
        let envelope: WireJobEnvelope = serde_json::from_value(body)?;
        Ok(mapper::job_to_domain(envelope.job))
    }

    #[instrument(skip(self))]
    async fn delete_job(&self, id: &str) -> Result<bool> {
        require_id(id)?;
        let body = self.http.delete(&format!("/jobs/{id}")).await?;
        Ok(body
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true))
    }

    #[instrument(skip(self))]
    async fn run_job(&self, id: &str) -> Result<Job> {
        require_id(id)?;
        let body = self.http.post(&format!("/jobs/{id}/run"), json!({})).await?;
        let envelope: WireJobEnvelope = serde_json::from_value(body)?;
        Ok(mapper::job_to_domain(envelope.job))
    }

    #[instrument(skip(self))]
    async fn job_history(&self, id: &str) -> Result<Vec<JobRun>> {
        require_id(id)?;
        let body = self.http.get(&format!("/jobs/{id}/history"), &[]).await?;
        let history: WireRunHistory = serde_json::from_value(body)?;
        Ok(history
            .history
            .into_iter()
            .map(mapper::job_run_to_domain)
            .collect())
    }
}

pub struct LegacyWorkflowGateway {
    http: HttpClient,
}

impl LegacyWorkflowGateway {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            http: HttpClient::from_config(config, transport),
        }
    }
}

#[async_trait]
impl WorkflowGateway for LegacyWorkflowGateway {
    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_workflow(&self, input: WorkflowCreate) -> Result<Workflow> {
        let body = self
            .http
            .post(
                "/workflows",
                json!({ "workflow": serde_json::to_value(&input)? }),
            )
            .await?;
        let envelope: WireWorkflowEnvelope = serde_json::from_value(body)?;
        Ok(mapper::workflow_to_domain(envelope.workflow))
    }

    #[instrument(skip(self, params))]
    async fn list_workflows(&self, params: &ListParams) -> Result<WorkflowPage> {
        let body = self.http.get("/workflows", &params.to_query()).await?;
        let page: WireWorkflowPage = serde_json::from_value(body)?;
        Ok(mapper::workflow_page_to_domain(page))
    }

    #[instrument(skip(self))]
    async fn get_workflow(&self, id: &str) -> Result<Workflow> {
        require_id(id)?;
        let body = self.http.get(&format!("/workflows/{id}"), &[]).await?;
        let envelope: WireWorkflowEnvelope = serde_json::from_value(body)?;
        Ok(mapper::workflow_to_domain(envelope.workflow))
    }

    #[instrument(skip(self, workflow), fields(workflow_id = %workflow.id))]
    async fn update_workflow(&self, workflow: &Workflow) -> Result<Workflow> {
        require_id(&workflow.id)?;
        let wire = mapper::workflow_to_wire(workflow);
        let body = self
            .http
            .put(
                &format!("/workflows/{}", workflow.id),
                json!({ "workflow": wire }),
            )
            .await?;
        let envelope: WireWorkflowEnvelope = serde_json::from_value(body)?;
        Ok(mapper::workflow_to_domain(envelope.workflow))
    }

    #[instrument(skip(self))]
    async fn delete_workflow(&self, id: &str) -> Result<bool> {
        require_id(id)?;
        let body = self.http.delete(&format!("/workflows/{id}")).await?;
        Ok(body
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true))
    }

    #[instrument(skip(self))]
    async fn validate_workflow(&self, id: &str) -> Result<WorkflowValidation> {
        require_id(id)?;
        let body = self
            .http
            .post(&format!("/workflows/{id}/validate"), json!({}))
            .await?;
        Ok(serde_json::from_value(body)?)
    }
}
