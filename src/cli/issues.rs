//! Issues command - list reported issues with filters

use crate::cli::style::{DOT, Stream, Stylize, hyperlink_url, status_badge};
use anstream::{eprintln, println};
use campus_fix::api::{ApiService, create_api_service};
use campus_fix::config::Config;
use campus_fix::error::{Error, Result};
use campus_fix::issues::{IssueFilter, IssueListView, ListState};
use campus_fix::types::Issue;

/// Run the issues command
pub async fn run_issues(config: &Config, filter: IssueFilter) -> Result<()> {
    let api = create_api_service(config)?;
    show_issue_list(api.as_ref(), filter).await
}

/// Fetch and print the issue list for `filter`
pub async fn show_issue_list(api: &dyn ApiService, filter: IssueFilter) -> Result<()> {
    let mut view = IssueListView::new(filter);
    view.refresh(api).await;

    match view.state() {
        ListState::Loaded(issues) => {
            println!("{}", "Reported Issues".emphasis());
            println!("{}", render_summary(issues.len(), view.filter()).muted());
            println!();

            if issues.is_empty() {
                println!("{}", "No issues match your current filters.".muted());
            }

            for issue in issues {
                println!("{}", render_issue_card(issue));
                println!("  {}", hyperlink_url(Stream::Stdout, &issue.image_url).muted());
                println!();
            }
            Ok(())
        }
        ListState::Failed(message) => {
            eprintln!("{}", message.error());
            let message = message.clone();
            Err(view.take_error().unwrap_or_else(|| Error::List(message)))
        }
        ListState::Loading => Ok(()),
    }
}

/// One issue as a block of text
pub fn render_issue_card(issue: &Issue) -> String {
    let mut lines = vec![
        format!(
            "{} {DOT} {}",
            issue.category.accent(),
            status_badge(&issue.status)
        ),
        issue.title.emphasis().to_string(),
    ];
    if !issue.description.is_empty() {
        lines.push(format!("  {}", issue.description));
    }
    lines.push(format!(
        "  {} {DOT} {} {DOT} {}",
        issue.location,
        issue.reported_on(),
        issue.issue_id.muted()
    ));
    lines.join("\n")
}

fn render_summary(count: usize, filter: &IssueFilter) -> String {
    format!(
        "Showing {count} issue{} (category: {}, status: {})",
        if count == 1 { "" } else { "s" },
        filter.category,
        filter.status
    )
}
