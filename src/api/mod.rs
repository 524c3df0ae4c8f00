//! Remote facilities API
//!
//! Every operation is a single HTTP request against the configured endpoint.
//! Any non-success response, transport error or undecodable body becomes the
//! operation's own [`Error`](crate::error::Error) variant.

mod factory;
mod http;

pub use factory::create_api_service;
pub use http::HttpApiClient;

use crate::error::Result;
use crate::issues::IssueFilter;
use crate::types::{AnalysisResult, Issue, NewIssue, Status, UploadSlot};
use async_trait::async_trait;

/// Remote API operations
///
/// Abstracts the HTTP client so the report and list flows can run against a
/// test double.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Ask for a pre-signed URL to upload one file
    async fn request_upload_slot(&self, file_name: &str, mime_type: &str) -> Result<UploadSlot>;

    /// Write raw bytes to a pre-signed URL
    async fn upload_bytes(&self, write_url: &str, bytes: &[u8], mime_type: &str) -> Result<()>;

    /// Run image analysis on an uploaded object
    ///
    /// Best-effort: callers must not block on its failure.
    async fn analyze_image(&self, object_key: &str) -> Result<AnalysisResult>;

    /// Create an issue record referencing an uploaded image
    async fn create_issue(&self, fields: &NewIssue) -> Result<Issue>;

    /// List issues, filtered server-side
    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>>;

    /// Change the status of an issue
    async fn update_issue_status(&self, issue_id: &str, status: Status) -> Result<Issue>;

    /// Subscribe an email address to notifications, returning the server's message
    async fn subscribe(&self, email: &str) -> Result<String>;

    /// Base URL requests are sent to
    fn base_url(&self) -> &str;
}
