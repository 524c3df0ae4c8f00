//! Report submission
//!
//! Upload-first workflow for reporting an issue:
//! 1. Select a photo - it is uploaded immediately
//! 2. Analysis - optional enrichment that can prefill the category
//! 3. Submit - create the issue referencing the uploaded photo

mod form;
mod image;
mod orchestrator;
mod progress;

pub use form::{FailedStep, MissingField, ReportForm, Stage};
pub use image::SelectedImage;
pub use orchestrator::{
    AnalysisOutcome, Navigation, ReportOrchestrator, SUBMIT_FAILED_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
pub use progress::{NoopProgress, Phase, ProgressCallback};
