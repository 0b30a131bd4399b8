use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

use scrapedash_client::config::ApiConfig;
use scrapedash_client::domain::{JobCreate, JobListParams, JobOptions, JobStatus, ListParams, Priority};
use scrapedash_client::error::Result;
use scrapedash_client::gateway::{job_gateway, workflow_gateway};
use scrapedash_client::http::ReqwestTransport;
use scrapedash_client::logging;
use scrapedash_client::services::ScraperService;

#[derive(Parser)]
#[command(name = "scrapedash")]
#[command(about = "ScrapeDash backend API client")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Job operations
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Workflow operations
    Workflows {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
    /// Scraper operations
    Scrapers {
        #[command(subcommand)]
        command: ScraperCommands,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// List jobs
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        /// Filter by status: pending, running, completed, failed, cancelled
        #[arg(long)]
        status: Option<JobStatus>,
        /// Filter by source scraper id
        #[arg(long)]
        scraper_id: Option<String>,
    },
    /// Fetch a single job
    Get { id: String },
    /// Create a new job
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        scraper_id: String,
        #[arg(long)]
        description: Option<String>,
        /// Scheduling priority: low, normal, high
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Trigger a job run
    Run { id: String },
    /// Show the run history of a job
    History { id: String },
    /// Delete a job
    Delete { id: String },
}

#[derive(Subcommand)]
enum WorkflowCommands {
    /// List workflows
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Fetch a single workflow
    Get { id: String },
    /// Ask the backend to validate a workflow graph
    Validate { id: String },
    /// Delete a workflow
    Delete { id: String },
}

#[derive(Subcommand)]
enum ScraperCommands {
    /// List scrapers
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Fetch a single scraper
    Get { id: String },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = ApiConfig::load()?;
    info!(
        base_url = %config.base_url,
        use_new_api_layer = config.use_new_api_layer,
        use_mock_data = config.use_mock_data,
        "loaded configuration"
    );
    let transport = Arc::new(ReqwestTransport::new());

    match cli.command {
        Commands::Jobs { command } => {
            let gateway = job_gateway(&config, transport);
            match command {
                JobCommands::List {
                    page,
                    per_page,
                    status,
                    scraper_id,
                } => {
                    let params = JobListParams {
                        page,
                        per_page,
                        status,
                        scraper_id,
                        search: None,
                    };
                    print_json(&gateway.list_jobs(&params).await?)?;
                }
                JobCommands::Get { id } => print_json(&gateway.get_job(&id).await?)?,
                JobCommands::Create {
                    name,
                    scraper_id,
                    description,
                    priority,
                } => {
                    let job = gateway
                        .create_job(JobCreate {
                            name,
                            scraper_id,
                            description,
                            options: priority.map(|priority| JobOptions {
                                priority,
                                ..Default::default()
                            }),
                        })
                        .await?;
                    info!(job_id = %job.id, "job created");
                    print_json(&job)?;
                }
                JobCommands::Run { id } => print_json(&gateway.run_job(&id).await?)?,
                JobCommands::History { id } => print_json(&gateway.job_history(&id).await?)?,
                JobCommands::Delete { id } => {
                    let deleted = gateway.delete_job(&id).await?;
                    println!("deleted: {deleted}");
                }
            }
        }
        Commands::Workflows { command } => {
            let gateway = workflow_gateway(&config, transport);
            match command {
                WorkflowCommands::List { page, per_page } => {
                    let params = ListParams {
                        page,
                        per_page,
                        search: None,
                    };
                    print_json(&gateway.list_workflows(&params).await?)?;
                }
                WorkflowCommands::Get { id } => print_json(&gateway.get_workflow(&id).await?)?,
                WorkflowCommands::Validate { id } => {
                    print_json(&gateway.validate_workflow(&id).await?)?;
                }
                WorkflowCommands::Delete { id } => {
                    let deleted = gateway.delete_workflow(&id).await?;
                    println!("deleted: {deleted}");
                }
            }
        }
        Commands::Scrapers { command } => {
            let scrapers = ScraperService::new(&config, transport);
            match command {
                ScraperCommands::List { page, per_page } => {
                    let params = ListParams {
                        page,
                        per_page,
                        search: None,
                    };
                    print_json(&scrapers.list(&params).await?)?;
                }
                ScraperCommands::Get { id } => print_json(&scrapers.get(&id).await?)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_accepts_priority_flag() {
        let cli = Cli::try_parse_from([
            "scrapedash",
            "jobs",
            "create",
            "--name",
            "Nightly scrape",
            "--scraper-id",
            "scraper-7",
            "--priority",
            "high",
        ])
        .unwrap();
        match cli.command {
            Commands::Jobs {
                command: JobCommands::Create { priority, .. },
            } => assert_eq!(priority, Some(Priority::High)),
            _ => panic!("expected jobs create"),
        }
    }

    #[test]
    fn create_rejects_unknown_priority() {
        let result = Cli::try_parse_from([
            "scrapedash",
            "jobs",
            "create",
            "--name",
            "Nightly scrape",
            "--scraper-id",
            "scraper-7",
            "--priority",
            "urgent",
        ]);
        assert!(result.is_err());
    }
}

#[tokio::main]
async fn main() {
    let _guard = logging::init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
