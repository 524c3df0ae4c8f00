//! Status command - move an issue through the maintenance workflow

use crate::cli::style::{Stylize, check, status_badge};
use anstream::println;
use campus_fix::api::create_api_service;
use campus_fix::config::Config;
use campus_fix::error::{Error, Result};
use campus_fix::types::Status;

/// Run the status command
pub async fn run_status(config: &Config, issue_id: &str, status: Status) -> Result<()> {
    let issue_id = issue_id.trim();
    if issue_id.is_empty() {
        return Err(Error::Validation("issue id must not be empty".to_string()));
    }

    let api = create_api_service(config)?;
    let issue = api.update_issue_status(issue_id, status).await?;

    println!(
        "{} {} is now {}",
        check(),
        issue.issue_id.accent(),
        status_badge(&issue.status)
    );
    println!("  {}", issue.title.muted());
    Ok(())
}
