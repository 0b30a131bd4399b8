use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::domain::{
    ListParams, Page, Workflow, WorkflowCreate, WorkflowPage, WorkflowValidation,
};
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use crate::schema;
use crate::services::require_id;

/// Workflow graph operations. Graphs are passed through opaquely; referential
/// integrity of edges is the backend's validation, reachable via `validate`.
pub struct WorkflowService {
    http: HttpClient,
    use_mock_data: bool,
}

impl WorkflowService {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            http: HttpClient::from_config(config, transport),
            use_mock_data: config.use_mock_data,
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: WorkflowCreate) -> Result<Workflow> {
        let payload = serde_json::to_value(&input)?;
        schema::WORKFLOW_CREATE.validate(&payload)?;
        if self.use_mock_data {
            return Ok(mock_workflow(&input));
        }
        let body = self.http.post("/workflows", payload).await?;
        schema::WORKFLOW.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, params))]
    pub async fn list(&self, params: &ListParams) -> Result<WorkflowPage> {
        if self.use_mock_data {
            let workflow = mock_workflow(&WorkflowCreate {
                name: "Sample workflow".to_string(),
                description: None,
                nodes: Vec::new(),
                edges: Vec::new(),
            });
            return Ok(Page::single(
                workflow,
                params.page.unwrap_or(1),
                params.per_page.unwrap_or(20),
            ));
        }
        let body = self.http.get("/workflows", &params.to_query()).await?;
        schema::WORKFLOW_PAGE.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Workflow> {
        require_id(id)?;
        if self.use_mock_data {
            let mut workflow = mock_workflow(&WorkflowCreate {
                name: format!("Workflow {id}"),
                description: None,
                nodes: Vec::new(),
                edges: Vec::new(),
            });
            workflow.id = id.to_string();
            return Ok(workflow);
        }
        let body = self.http.get(&format!("/workflows/{id}"), &[]).await?;
        schema::WORKFLOW.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self, workflow), fields(workflow_id = %workflow.id))]
    pub async fn update(&self, workflow: &Workflow) -> Result<Workflow> {
        require_id(&workflow.id)?;
        let payload = serde_json::to_value(workflow)?;
        schema::WORKFLOW.validate(&payload)?;
        if self.use_mock_data {
            return Ok(workflow.clone());
        }
        let body = self
            .http
            .put(&format!("/workflows/{}", workflow.id), payload)
            .await?;
        schema::WORKFLOW.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        require_id(id)?;
        if self.use_mock_data {
            return Ok(true);
        }
        let body = self.http.delete(&format!("/workflows/{id}")).await?;
        Ok(body
            .get("deleted")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(true))
    }

    #[instrument(skip(self))]
    pub async fn validate(&self, id: &str) -> Result<WorkflowValidation> {
        require_id(id)?;
        if self.use_mock_data {
            return Ok(WorkflowValidation {
                valid: true,
                issues: Vec::new(),
            });
        }
        let body = self
            .http
            .post(&format!("/workflows/{id}/validate"), json!({}))
            .await?;
        schema::WORKFLOW_VALIDATION.validate(&body)?;
        Ok(serde_json::from_value(body)?)
    }
}

fn mock_workflow(input: &WorkflowCreate) -> Workflow {
    Workflow {
        id: Uuid::new_v4().to_string(),
        name: input.name.clone(),
        description: input.description.clone(),
        nodes: input.nodes.clone(),
        edges: input.edges.clone(),
        created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        updated_at: None,
    }
}
