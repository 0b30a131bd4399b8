//! Stable per-entity interfaces over the two API generations.
//!
//! Each gateway trait has a new-generation implementation (delegating to the
//! validated service layer) and a legacy one (direct requests against the
//! wrapped legacy wire shapes, mapped to domain at the boundary). The factory
//! reads `use_new_api_layer` once, at construction; callers never see which
//! path they are on. Errors from either path propagate unmodified.

mod legacy;
mod new_api;

pub use legacy::{LegacyJobGateway, LegacyWorkflowGateway};
pub use new_api::{NewApiJobGateway, NewApiWorkflowGateway};

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::domain::{
    Job, JobCreate, JobListParams, JobPage, JobRun, ListParams, Workflow, WorkflowCreate,
    WorkflowPage, WorkflowValidation,
};
use crate::error::Result;
use crate::http::Transport;

#[async_trait]
pub trait JobGateway: Send + Sync {
    async fn create_job(&self, input: JobCreate) -> Result<Job>;
    async fn list_jobs(&self, params: &JobListParams) -> Result<JobPage>;
    async fn get_job(&self, id: &str) -> Result<Job>;
    async fn update_job(&self, job: &Job) -> Result<Job>;
    async fn delete_job(&self, id: &str) -> Result<bool>;
    async fn run_job(&self, id: &str) -> Result<Job>;
    async fn job_history(&self, id: &str) -> Result<Vec<JobRun>>;
}

#[async_trait]
pub trait WorkflowGateway: Send + Sync {
    async fn create_workflow(&self, input: WorkflowCreate) -> Result<Workflow>;
    async fn list_workflows(&self, params: &ListParams) -> Result<WorkflowPage>;
    async fn get_workflow(&self, id: &str) -> Result<Workflow>;
    async fn update_workflow(&self, workflow: &Workflow) -> Result<Workflow>;
    async fn delete_workflow(&self, id: &str) -> Result<bool>;
    async fn validate_workflow(&self, id: &str) -> Result<WorkflowValidation>;
}

/// Selects the job dispatch path from the injected configuration.
pub fn job_gateway(config: &ApiConfig, transport: Arc<dyn Transport>) -> Arc<dyn JobGateway> {
    if config.use_new_api_layer {
        Arc::new(NewApiJobGateway::new(config, transport))
    } else {
        Arc::new(LegacyJobGateway::new(config, transport))
    }
}

/// Selects the workflow dispatch path from the injected configuration.
pub fn workflow_gateway(
    config: &ApiConfig,
    transport: Arc<dyn Transport>,
) -> Arc<dyn WorkflowGateway> {
    if config.use_new_api_layer {
        Arc::new(NewApiWorkflowGateway::new(config, transport))
    } else {
        Arc::new(LegacyWorkflowGateway::new(config, transport))
    }
}
