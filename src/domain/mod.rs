pub mod job;
pub mod page;
pub mod scraper;
pub mod workflow;

pub use job::{Job, JobCreate, JobListParams, JobOptions, JobRun, JobStatus, Priority};
pub use page::{ListParams, Page};
pub use scraper::{Scraper, ScraperCreate};
pub use workflow::{
    Position, Workflow, WorkflowCreate, WorkflowEdge, WorkflowIssue, WorkflowNode,
    WorkflowValidation,
};

pub type JobPage = Page<Job>;
pub type ScraperPage = Page<Scraper>;
pub type WorkflowPage = Page<Workflow>;
