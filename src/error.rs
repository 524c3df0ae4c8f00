//! Error types for campus-fix

use crate::report::MissingField;
use thiserror::Error;

/// Errors returned by campus-fix
///
/// Remote failures are flat: one variant per API operation, carrying the
/// underlying cause only as text. Nothing is parsed out of error bodies.
#[derive(Debug, Error)]
pub enum Error {
    /// `POST /upload-url` failed
    #[error("Failed to get upload URL: {0}")]
    UploadSlot(String),

    /// `PUT` to the upload URL failed
    #[error("Failed to upload image: {0}")]
    Upload(String),

    /// `POST /analyze-image` failed
    #[error("Failed to analyze image: {0}")]
    Analysis(String),

    /// `POST /issues` failed
    #[error("Failed to create issue: {0}")]
    Create(String),

    /// `GET /issues` failed
    #[error("Failed to fetch issues: {0}")]
    List(String),

    /// `PATCH /issues/{id}/status` failed
    #[error("Failed to update issue status: {0}")]
    UpdateStatus(String),

    /// `POST /subscribe` failed
    #[error("Failed to subscribe: {0}")]
    Subscribe(String),

    /// Submit attempted before the required fields were present
    #[error("report is incomplete, missing: {}", format_missing(.0))]
    IncompleteReport(Vec<MissingField>),

    /// An operation needed an uploaded image that does not exist
    #[error("no uploaded image for this report")]
    NoUploadedImage,

    /// Selected file is not an image
    #[error("unsupported file: {0}")]
    UnsupportedFile(String),

    /// Local input validation failed
    #[error("invalid input: {0}")]
    Validation(String),

    /// Configuration could not be resolved
    #[error("configuration error: {0}")]
    Config(String),

    /// Value could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive prompt could not read an answer
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl Error {
    /// Whether this failure came from the remote API
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::UploadSlot(_)
                | Self::Upload(_)
                | Self::Analysis(_)
                | Self::Create(_)
                | Self::List(_)
                | Self::UpdateStatus(_)
                | Self::Subscribe(_)
        )
    }
}

fn format_missing(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias for campus-fix operations
pub type Result<T> = std::result::Result<T, Error>;
