//! Per-entity façades over the HTTP client: validate input, short-circuit to
//! deterministic mock data when configured, otherwise dispatch and validate
//! the response before handing it back.

mod jobs;
mod scrapers;
mod workflows;

pub use jobs::JobService;
pub use scrapers::ScraperService;
pub use workflows::WorkflowService;

use crate::error::{ClientError, Result};

/// Rejects empty ids before any network call.
pub(crate) fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ClientError::invalid_field(
            "/id",
            "id must be a non-empty string",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_ids_are_rejected() {
        assert!(require_id("").is_err());
        assert!(require_id("   ").is_err());
        assert!(require_id("job-1").is_ok());
    }
}
