//! fixit - report and track campus facility issues
//!
//! CLI binary for the campus facilities API.

use anyhow::Result;
use campus_fix::config::Config;
use campus_fix::issues::{Filter, IssueFilter};
use campus_fix::types::{Category, Location, Status};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "fixit")]
#[command(about = "Report and track campus facility issues")]
#[command(version)]
struct Cli {
    /// Base URL of the facilities API (overrides CAMPUS_FIX_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log requests and flow decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List reported issues
    Issues {
        /// Only show this category (Furniture, Electrical, Safety, Cleanliness or all)
        #[arg(long, default_value = "all")]
        category: Filter<Category>,

        /// Only show this status (New, In Progress, Resolved or all)
        #[arg(long, default_value = "all")]
        status: Filter<Status>,
    },

    /// Report a new issue with a photo
    Report {
        /// Photo of the problem
        #[arg(long)]
        image: PathBuf,

        /// Short summary
        #[arg(long)]
        title: Option<String>,

        /// Details about the problem
        #[arg(long)]
        description: Option<String>,

        /// Category (overrides the suggestion from image analysis)
        #[arg(long)]
        category: Option<Category>,

        /// Where the problem is, by name or slug (e.g. block-a, library)
        #[arg(long)]
        location: Option<Location>,

        /// Skip image analysis
        #[arg(long)]
        no_analysis: bool,

        /// Never prompt; fail on missing fields instead
        #[arg(short, long)]
        yes: bool,
    },

    /// Change the status of an issue
    Status {
        /// Issue id
        issue_id: String,

        /// New status (New, In Progress, Resolved)
        status: Status,
    },

    /// Subscribe to email notifications for new issues
    Subscribe {
        /// Address to notify
        email: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("campus_fix=debug,fixit=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("campus_fix=warn,fixit=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::resolve(cli.api_url.as_deref())?;

    match cli.command {
        Commands::Issues { category, status } => {
            cli::run_issues(&config, IssueFilter { category, status }).await?;
        }
        Commands::Report {
            image,
            title,
            description,
            category,
            location,
            no_analysis,
            yes,
        } => {
            let args = cli::ReportArgs {
                image,
                title,
                description,
                category,
                location,
                no_analysis,
                yes,
            };
            cli::run_report(&config, args).await?;
        }
        Commands::Status { issue_id, status } => {
            cli::run_status(&config, &issue_id, status).await?;
        }
        Commands::Subscribe { email } => {
            cli::run_subscribe(&config, &email).await?;
        }
    }

    Ok(())
}
