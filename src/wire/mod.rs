//! Legacy wire shapes and the single mapping boundary between them and the
//! canonical domain types. Loose string statuses/priorities never escape
//! this module.

pub mod job;
pub mod mapper;
pub mod workflow;

pub use job::{WireJob, WireJobEnvelope, WireJobOptions, WireJobPage, WireJobRun, WireRunHistory};
pub use workflow::{WireWorkflow, WireWorkflowEnvelope, WireWorkflowPage};
