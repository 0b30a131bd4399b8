use serde::{Deserialize, Serialize};

use crate::domain::{WorkflowEdge, WorkflowNode};

/// A workflow as the legacy API sends it. Node/edge payloads are already
/// opaque pass-through data; only the envelope and string timestamps differ
/// from the canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WireWorkflow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Legacy single-entity envelope: `{ "workflow": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireWorkflowEnvelope {
    pub workflow: WireWorkflow,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WireWorkflowPage {
    #[serde(default)]
    pub workflows: Vec<WireWorkflow>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
}
