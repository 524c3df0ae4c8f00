//! Progress callback trait for interface-agnostic updates
//!
//! Lets the terminal front end (or a test) follow the report flow without the
//! orchestrator knowing how anything is displayed.

use crate::error::Error;
use crate::types::{AnalysisResult, Category, Issue};
use async_trait::async_trait;
use std::fmt;

/// Report flow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Requesting an upload slot and uploading the photo
    Uploading,
    /// Running image analysis
    Analyzing,
    /// Photo uploaded, waiting for the rest of the form
    Ready,
    /// Creating the issue record
    Submitting,
    /// Issue created
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Uploading => "Uploading image",
            Self::Analyzing => "Analyzing image",
            Self::Ready => "Ready to submit",
            Self::Submitting => "Submitting report",
            Self::Complete => "Issue reported",
        };
        f.write_str(label)
    }
}

/// Progress callback trait
///
/// Implement this trait to follow a report submission.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the photo is stored under `image_key`
    async fn on_uploaded(&self, image_key: &str);

    /// Called when analysis returns results
    async fn on_analysis(&self, result: &AnalysisResult);

    /// Called when analysis suggests a category; `applied` if it was prefilled
    async fn on_category_suggested(&self, category: Category, applied: bool);

    /// Called when the issue is created
    async fn on_issue_created(&self, issue: &Issue);

    /// Called when a non-fatal error occurs
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_uploaded(&self, _image_key: &str) {}
    async fn on_analysis(&self, _result: &AnalysisResult) {}
    async fn on_category_suggested(&self, _category: Category, _applied: bool) {}
    async fn on_issue_created(&self, _issue: &Issue) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
