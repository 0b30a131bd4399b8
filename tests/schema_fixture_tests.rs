use scrapedash_client::domain::{Job, Workflow};
use scrapedash_client::schema;
use serde_json::json;

#[test]
fn job_example_is_valid() {
    let instance: serde_json::Value =
        serde_json::from_str(include_str!("resources/job_response.json")).unwrap();
    schema::JOB.validate(&instance).unwrap();

    // The same payload deserializes into the domain type.
    let job: Job = serde_json::from_value(instance).unwrap();
    assert_eq!(job.id, "job-2f6c1a9e");
    assert_eq!(job.options.max_pages, Some(50));
}

#[test]
fn workflow_example_is_valid() {
    let instance: serde_json::Value =
        serde_json::from_str(include_str!("resources/workflow_response.json")).unwrap();
    schema::WORKFLOW.validate(&instance).unwrap();

    let workflow: Workflow = serde_json::from_value(instance).unwrap();
    assert_eq!(workflow.nodes.len(), 3);
    assert_eq!(workflow.nodes[1].sources, vec!["n1".to_string()]);
    assert_eq!(workflow.edges.len(), 2);
}

#[test]
fn non_canonical_status_is_rejected_by_the_response_schema() {
    let mut instance: serde_json::Value =
        serde_json::from_str(include_str!("resources/job_response.json")).unwrap();
    instance["status"] = json!("in_progress");
    assert!(schema::JOB.validate(&instance).is_err());
}

#[test]
fn edge_without_target_is_rejected() {
    let mut instance: serde_json::Value =
        serde_json::from_str(include_str!("resources/workflow_response.json")).unwrap();
    instance["edges"][0] = json!({ "id": "e1", "source": "n1" });
    assert!(schema::WORKFLOW.validate(&instance).is_err());
}

#[test]
fn page_requires_all_count_fields() {
    let missing_total_pages = json!({
        "items": [],
        "total": 0,
        "page": 1,
        "per_page": 20
    });
    assert!(schema::JOB_PAGE.validate(&missing_total_pages).is_err());

    let empty = json!({
        "items": [],
        "total": 0,
        "page": 1,
        "per_page": 20,
        "total_pages": 0
    });
    schema::JOB_PAGE.validate(&empty).unwrap();
}

#[test]
fn history_entries_require_job_linkage() {
    let valid = json!([{
        "id": "run-1",
        "job_id": "job-2f6c1a9e",
        "status": "completed",
        "started_at": "2024-05-01T12:05:00Z",
        "completed_at": "2024-05-01T12:40:00Z",
        "pages_scraped": 48
    }]);
    schema::JOB_HISTORY.validate(&valid).unwrap();

    let unlinked = json!([{ "id": "run-1", "status": "completed" }]);
    assert!(schema::JOB_HISTORY.validate(&unlinked).is_err());
}
