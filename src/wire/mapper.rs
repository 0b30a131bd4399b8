//! Field-by-field conversions between legacy wire shapes and domain types.
//!
//! Reads are lenient by policy: an unrecognized status becomes `Pending` and
//! an unrecognized priority becomes `Normal`, silently. This is distinct from
//! schema validation, which rejects malformed payloads on write. Every other
//! field, timestamps included, passes through byte-for-byte.

use crate::domain::{
    Job, JobOptions, JobPage, JobRun, JobStatus, Priority, Workflow, WorkflowPage,
};
use crate::wire::job::{WireJob, WireJobOptions, WireJobPage, WireJobRun};
use crate::wire::workflow::{WireWorkflow, WireWorkflowPage};

/// Case-sensitive match against the canonical set; anything else, including
/// an absent value, degrades to `Pending`.
pub fn status_or_default(raw: Option<&str>) -> JobStatus {
    match raw {
        Some("pending") => JobStatus::Pending,
        Some("running") => JobStatus::Running,
        Some("completed") => JobStatus::Completed,
        Some("failed") => JobStatus::Failed,
        Some("cancelled") => JobStatus::Cancelled,
        _ => JobStatus::Pending,
    }
}

/// Same policy as [`status_or_default`], degrading to `Normal`.
pub fn priority_or_default(raw: Option<&str>) -> Priority {
    match raw {
        Some("low") => Priority::Low,
        Some("normal") => Priority::Normal,
        Some("high") => Priority::High,
        Some("critical") => Priority::Critical,
        _ => Priority::Normal,
    }
}

pub fn job_to_domain(wire: WireJob) -> Job {
    Job {
        id: wire.id,
        name: wire.name,
        description: wire.description,
        scraper_id: wire.scraper_id,
        status: status_or_default(wire.status.as_deref()),
        created_at: wire.created_at,
        started_at: wire.started_at,
        completed_at: wire.completed_at,
        options: JobOptions {
            max_pages: wire.options.max_pages,
            priority: priority_or_default(wire.options.priority.as_deref()),
            headers: wire.options.headers,
        },
        metadata: wire.metadata,
    }
}

pub fn job_to_wire(job: &Job) -> WireJob {
    WireJob {
        id: job.id.clone(),
        name: job.name.clone(),
        description: job.description.clone(),
        scraper_id: job.scraper_id.clone(),
        status: Some(job.status.as_str().to_string()),
        created_at: job.created_at.clone(),
        started_at: job.started_at.clone(),
        completed_at: job.completed_at.clone(),
        options: WireJobOptions {
            max_pages: job.options.max_pages,
            priority: Some(job.options.priority.as_str().to_string()),
            headers: job.options.headers.clone(),
        },
        metadata: job.metadata.clone(),
    }
}

pub fn job_page_to_domain(wire: WireJobPage) -> JobPage {
    JobPage {
        items: wire.jobs.into_iter().map(job_to_domain).collect(),
        total: wire.total,
        page: wire.page,
        per_page: wire.per_page,
        total_pages: wire.total_pages,
    }
}

pub fn job_run_to_domain(wire: WireJobRun) -> JobRun {
    JobRun {
        id: wire.id,
        job_id: wire.job_id,
        status: status_or_default(wire.status.as_deref()),
        started_at: wire.started_at,
        completed_at: wire.completed_at,
        pages_scraped: wire.pages_scraped,
        error: wire.error,
    }
}

pub fn workflow_to_domain(wire: WireWorkflow) -> Workflow {
    Workflow {
        id: wire.id,
        name: wire.name,
        description: wire.description,
        nodes: wire.nodes,
        edges: wire.edges,
        created_at: wire.created_at,
        updated_at: wire.updated_at,
    }
}

pub fn workflow_to_wire(workflow: &Workflow) -> WireWorkflow {
    WireWorkflow {
        id: workflow.id.clone(),
        name: workflow.name.clone(),
        description: workflow.description.clone(),
        nodes: workflow.nodes.clone(),
        edges: workflow.edges.clone(),
        created_at: workflow.created_at.clone(),
        updated_at: workflow.updated_at.clone(),
    }
}

pub fn workflow_page_to_domain(wire: WireWorkflowPage) -> WorkflowPage {
    WorkflowPage {
        items: wire.workflows.into_iter().map(workflow_to_domain).collect(),
        total: wire.total,
        page: wire.page,
        per_page: wire.per_page,
        total_pages: wire.total_pages,
    }
}
