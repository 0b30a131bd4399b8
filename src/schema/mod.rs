//! Compiled JSON Schema catalog. Schemas live under `schemas/` and are
//! embedded at build time; each is compiled once on first use.

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::fmt;

use crate::error::{ClientError, Result};

/// One field-level violation: the instance path that failed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

/// Every violation found in a payload, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolations(pub Vec<SchemaViolation>);

impl SchemaViolations {
    pub fn single(path: &str, message: &str) -> Self {
        SchemaViolations(vec![SchemaViolation {
            path: path.to_string(),
            message: message.to_string(),
        }])
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            let path = if violation.path.is_empty() {
                "(root)"
            } else {
                violation.path.as_str()
            };
            write!(f, "{path}: {}", violation.message)?;
        }
        Ok(())
    }
}

/// A named, compiled schema. Validation is synchronous and pure.
pub struct Validator {
    name: &'static str,
    compiled: JSONSchema,
}

impl Validator {
    fn compile(name: &'static str, raw: &'static str) -> Self {
        let document: Value = serde_json::from_str(raw)
            .unwrap_or_else(|e| panic!("embedded schema {name} is not valid JSON: {e}"));
        let document: &'static Value = Box::leak(Box::new(document));
        let compiled = JSONSchema::compile(document)
            .unwrap_or_else(|e| panic!("embedded schema {name} does not compile: {e}"));
        Self { name, compiled }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Checks `instance` against the schema, collecting every violation.
    pub fn validate(&self, instance: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let violations = errors
                .map(|error| SchemaViolation {
                    path: error.instance_path.to_string(),
                    message: error.to_string(),
                })
                .collect();
            return Err(ClientError::Validation(SchemaViolations(violations)));
        }
        Ok(())
    }
}

macro_rules! schema {
    ($static_name:ident, $file:literal) => {
        pub static $static_name: Lazy<Validator> =
            Lazy::new(|| Validator::compile($file, include_str!(concat!("../../schemas/", $file))));
    };
}

schema!(JOB_CREATE, "job.create.v1.json");
schema!(JOB, "job.v1.json");
schema!(JOB_PAGE, "job.page.v1.json");
schema!(JOB_HISTORY, "job.history.v1.json");
schema!(SCRAPER_CREATE, "scraper.create.v1.json");
schema!(SCRAPER, "scraper.v1.json");
schema!(SCRAPER_PAGE, "scraper.page.v1.json");
schema!(WORKFLOW_CREATE, "workflow.create.v1.json");
schema!(WORKFLOW, "workflow.v1.json");
schema!(WORKFLOW_PAGE, "workflow.page.v1.json");
schema!(WORKFLOW_VALIDATION, "workflow.validation.v1.json");
