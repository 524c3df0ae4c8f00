//! Report command - upload a photo and create an issue

use crate::cli::issues::show_issue_list;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, cross};
use anstream::{eprintln, println};
use campus_fix::api::create_api_service;
use campus_fix::config::Config;
use campus_fix::error::{Error, Result};
use campus_fix::issues::IssueFilter;
use campus_fix::report::{
    Navigation, ReportOrchestrator, SUBMIT_FAILED_MESSAGE, SelectedImage, UPLOAD_FAILED_MESSAGE,
};
use campus_fix::types::{Category, Location};
use dialoguer::{Confirm, Input, Select};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

/// Values given on the command line for a new report
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Photo to attach
    pub image: PathBuf,
    /// Short summary
    pub title: Option<String>,
    /// Details
    pub description: Option<String>,
    /// Category, overriding any suggestion
    pub category: Option<Category>,
    /// Where the problem is
    pub location: Option<Location>,
    /// Skip image analysis
    pub no_analysis: bool,
    /// Never prompt; fail instead of asking
    pub yes: bool,
}

/// Run the report command
pub async fn run_report(config: &Config, args: ReportArgs) -> Result<()> {
    let api = create_api_service(config)?;
    let progress = CliProgress::new();
    let interactive = !args.yes && io::stdin().is_terminal();

    let mut report = ReportOrchestrator::from_config(api.as_ref(), &progress, config)
        .with_analysis(config.analysis && !args.no_analysis);

    if let Some(title) = args.title.clone() {
        report.set_title(title);
    }
    if let Some(description) = args.description.clone() {
        report.set_description(description);
    }
    if let Some(category) = args.category {
        report.set_category(category);
    }
    if let Some(location) = args.location {
        report.set_location(location);
    }

    let image = SelectedImage::from_path(&args.image).await?;
    if let Err(e) = report.select_file(image).await {
        eprintln!(
            "{} {}",
            cross(),
            report.form().error().unwrap_or(UPLOAD_FAILED_MESSAGE).error()
        );
        return Err(e);
    }

    if interactive {
        fill_in(&mut report, &args)?;
    }

    let missing = report.form().missing_fields();
    if !missing.is_empty() {
        return Err(Error::IncompleteReport(missing));
    }

    if interactive && !confirm("Submit this report?", true)? {
        println!("{}", "Report discarded. The uploaded photo was not attached to an issue.".muted());
        return Ok(());
    }

    loop {
        match report.submit().await {
            Ok(issue) => {
                debug!(issue_id = %issue.issue_id, "report submitted");
                break;
            }
            Err(e) => {
                eprintln!(
                    "{} {}",
                    cross(),
                    report.form().error().unwrap_or(SUBMIT_FAILED_MESSAGE).error()
                );
                if !interactive || !confirm("Try again?", true)? {
                    return Err(e);
                }
            }
        }
    }

    if report.redirect().await == Some(Navigation::IssueList) {
        println!();
        show_issue_list(api.as_ref(), IssueFilter::default()).await?;
    }
    Ok(())
}

/// Prompt for whatever the command line left out
fn fill_in(report: &mut ReportOrchestrator<'_>, args: &ReportArgs) -> Result<()> {
    if args.category.is_none() {
        let category = prompt_category(report.form().category())?;
        report.set_category(category);
    }
    if args.location.is_none() {
        let location = prompt_location()?;
        report.set_location(location);
    }
    if args.title.is_none() {
        report.set_title(prompt_text("Title")?);
    }
    if args.description.is_none() {
        report.set_description(prompt_text("Description")?);
    }
    Ok(())
}

fn prompt_category(current: Option<Category>) -> Result<Category> {
    let items: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let default = current
        .and_then(|c| Category::ALL.iter().position(|&x| x == c))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("Category")
        .items(&items)
        .default(default)
        .interact()?;
    Ok(Category::ALL[index])
}

fn prompt_location() -> Result<Location> {
    let items: Vec<&str> = Location::ALL.iter().map(|l| l.as_str()).collect();
    let index = Select::new()
        .with_prompt("Location")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(Location::ALL[index])
}

fn prompt_text(prompt: &str) -> Result<String> {
    let text = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?;
    Ok(answer)
}
