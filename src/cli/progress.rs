//! Terminal progress for the report flow, with spinners for network steps

use crate::cli::style::{Stylize, check, sparkle, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use campus_fix::error::Error;
use campus_fix::report::{Phase, ProgressCallback};
use campus_fix::types::{AnalysisResult, Category, Issue};
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// Prints report progress; shows a spinner while a request is in flight
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl CliProgress {
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Some(old) = self.swap_spinner(Some(bar)) {
            old.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        if let Some(bar) = self.swap_spinner(None) {
            bar.finish_and_clear();
        }
    }

    fn swap_spinner(&self, next: Option<ProgressBar>) -> Option<ProgressBar> {
        let mut guard = self
            .spinner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Uploading | Phase::Analyzing | Phase::Submitting => {
                self.start_spinner(format!("{phase}…"));
            }
            Phase::Ready | Phase::Complete => self.stop_spinner(),
        }
    }

    async fn on_uploaded(&self, image_key: &str) {
        self.stop_spinner();
        println!("{} Image uploaded {}", check(), image_key.muted());
    }

    async fn on_analysis(&self, result: &AnalysisResult) {
        self.stop_spinner();
        if !result.labels.is_empty() {
            let labels: Vec<String> = result
                .labels
                .iter()
                .map(|l| format!("{} {:.0}%", l.name, l.confidence))
                .collect();
            println!("  Detected objects: {}", labels.join(", ").accent());
        }
        if !result.detected_text.is_empty() {
            let texts: Vec<String> = result
                .detected_text
                .iter()
                .map(|t| format!("\"{}\" {:.0}%", t.text, t.confidence))
                .collect();
            println!("  Detected text: {}", texts.join(", ").muted());
        }
    }

    async fn on_category_suggested(&self, category: Category, applied: bool) {
        let note = if applied { "applied" } else { "not applied, category already chosen" };
        println!(
            "{} AI suggestion: this looks like a {} issue ({})",
            sparkle(),
            category.accent(),
            note.muted()
        );
    }

    async fn on_issue_created(&self, issue: &Issue) {
        self.stop_spinner();
        println!("{} {}", check(), "Issue Reported!".emphasis());
        println!(
            "  {} {}",
            issue.issue_id.accent(),
            "The maintenance team has been notified. Redirecting…".muted()
        );
    }

    async fn on_error(&self, error: &Error) {
        self.stop_spinner();
        eprintln!("{}: {}", "warning".warn(), error);
    }

    async fn on_message(&self, message: &str) {
        println!("{}", message.muted());
    }
}
