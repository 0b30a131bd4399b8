use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::domain::{
    Job, JobCreate, JobListParams, JobPage, JobRun, ListParams, Workflow, WorkflowCreate,
    WorkflowPage, WorkflowValidation,
};
use crate::error::Result;
use crate::gateway::{JobGateway, WorkflowGateway};
use crate::http::Transport;
use crate::services::{JobService, WorkflowService};

/// New-path gateway: everything goes through the validated service layer,
/// which already speaks the canonical domain shapes.
pub struct NewApiJobGateway {
    jobs: JobService,
}

impl NewApiJobGateway {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            jobs: JobService::new(config, transport),
        }
    }
}

#[async_trait]
impl JobGateway for NewApiJobGateway {
    async fn create_job(&self, input: JobCreate) -> Result<Job> {
        self.jobs.create(input).await
    }

    async fn list_jobs(&self, params: &JobListParams) -> Result<JobPage> {
        self.jobs.list(params).await
    }

    async fn get_job(&self, id: &str) -> Result<Job> {
        self.jobs.get(id).await
    }

    async fn update_job(&self, job: &Job) -> Result<Job> {
        self.jobs.update(job).await
    }

    async fn delete_job(&self, id: &str) -> Result<bool> {
        self.jobs.delete(id).await
    }

    async fn run_job(&self, id: &str) -> Result<Job> {
        self.jobs.run(id).await
    }

    async fn job_history(&self, id: &str) -> Result<Vec<JobRun>> {
        self.jobs.history(id).await
    }
}

pub struct NewApiWorkflowGateway {
    workflows: WorkflowService,
}

impl NewApiWorkflowGateway {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            workflows: WorkflowService::new(config, transport),
        }
    }
}

#[async_trait]
impl WorkflowGateway for NewApiWorkflowGateway {
    async fn create_workflow(&self, input: WorkflowCreate) -> Result<Workflow> {
        self.workflows.create(input).await
    }

    async fn list_workflows(&self, params: &ListParams) -> Result<WorkflowPage> {
        self.workflows.list(params).await
    }

    async fn get_workflow(&self, id: &str) -> Result<Workflow> {
        self.workflows.get(id).await
    }

    async fn update_workflow(&self, workflow: &Workflow) -> Result<Workflow> {
        self.workflows.update(workflow).await
    }

    async fn delete_workflow(&self, id: &str) -> Result<bool> {
        self.workflows.delete(id).await
    }

    async fn validate_workflow(&self, id: &str) -> Result<WorkflowValidation> {
        self.workflows.validate(id).await
    }
}
