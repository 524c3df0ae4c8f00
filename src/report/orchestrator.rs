//! Report submission flow
//!
//! Drives one report from file selection to issue creation:
//! 1. Upload - request a slot, then write the bytes to it
//! 2. Analysis - optional, best-effort; may prefill the category
//! 3. Submit - create the issue referencing the uploaded key

use crate::api::ApiService;
use crate::config::{Config, REDIRECT_DELAY};
use crate::error::{Error, Result};
use crate::report::{FailedStep, Phase, ProgressCallback, ReportForm, SelectedImage, Stage};
use crate::types::{AnalysisResult, Category, Issue, Location};
use std::time::Duration;
use tracing::{info, warn};

/// Shown when the upload slot request or the upload fails
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload image. Please select the file again.";

/// Shown when creating the issue fails
pub const SUBMIT_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Where the front end should go next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The issue list
    IssueList,
}

/// Outcome of the best-effort analysis step
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Analysis returned results
    Completed(AnalysisResult),
    /// Analysis failed with this cause; the report continues without it
    Failed(String),
}

impl From<Result<AnalysisResult>> for AnalysisOutcome {
    fn from(result: Result<AnalysisResult>) -> Self {
        match result {
            Ok(analysis) => Self::Completed(analysis),
            Err(Error::Analysis(cause)) => Self::Failed(cause),
            Err(other) => Self::Failed(other.to_string()),
        }
    }
}

/// Sequences the API calls that make up one report
pub struct ReportOrchestrator<'a> {
    api: &'a dyn ApiService,
    progress: &'a dyn ProgressCallback,
    form: ReportForm,
    analysis_enabled: bool,
    redirect_delay: Duration,
}

impl<'a> ReportOrchestrator<'a> {
    /// Create an orchestrator with analysis enabled and the standard redirect delay
    pub fn new(api: &'a dyn ApiService, progress: &'a dyn ProgressCallback) -> Self {
        Self {
            api,
            progress,
            form: ReportForm::default(),
            analysis_enabled: true,
            redirect_delay: REDIRECT_DELAY,
        }
    }

    /// Create an orchestrator using the options in `config`
    pub fn from_config(
        api: &'a dyn ApiService,
        progress: &'a dyn ProgressCallback,
        config: &Config,
    ) -> Self {
        Self::new(api, progress)
            .with_analysis(config.analysis)
            .with_redirect_delay(config.redirect_delay)
    }

    /// Enable or disable the analysis step
    #[must_use]
    pub const fn with_analysis(mut self, enabled: bool) -> Self {
        self.analysis_enabled = enabled;
        self
    }

    /// Override the post-submit redirect delay
    #[must_use]
    pub const fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Current form
    pub const fn form(&self) -> &ReportForm {
        &self.form
    }

    /// Set the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    /// Set the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    /// Choose a category, overriding any suggestion
    pub fn set_category(&mut self, category: Category) {
        self.form.category = Some(category);
    }

    /// Choose a location
    pub fn set_location(&mut self, location: Location) {
        self.form.location = Some(location);
    }

    /// Use the analysis suggestion as the category
    pub fn apply_suggested_category(&mut self) -> Option<Category> {
        let suggested = self.form.suggested_category()?;
        self.form.category = Some(suggested);
        Some(suggested)
    }

    /// Select a file and upload it right away
    ///
    /// The upload happens before the form is complete so analysis can run
    /// while the user fills in the rest. A failed slot request or upload
    /// leaves the form without an image key and the error set; select the
    /// file again to retry. Analysis failures are logged and ignored.
    pub async fn select_file(&mut self, image: SelectedImage) -> Result<()> {
        info!(file = image.file_name(), "file selected");
        let summary = image.summary();
        self.form.select(image);
        self.progress.on_message(&summary).await;

        self.form.stage = Stage::Uploading;
        self.progress.on_phase(Phase::Uploading).await;

        let image_key = match self.upload().await {
            Ok(key) => key,
            Err(e) => {
                warn!("upload failed: {e}");
                self.form.stage = Stage::Errored(FailedStep::Upload);
                self.form.error = Some(UPLOAD_FAILED_MESSAGE.to_string());
                return Err(e);
            }
        };

        self.form.image_key = Some(image_key.clone());
        self.progress.on_uploaded(&image_key).await;

        if self.analysis_enabled {
            self.form.stage = Stage::Analyzing;
            self.progress.on_phase(Phase::Analyzing).await;

            match self.analyze(&image_key).await {
                AnalysisOutcome::Completed(analysis) => self.accept_analysis(analysis).await,
                AnalysisOutcome::Failed(reason) => {
                    warn!("image analysis failed, continuing without it: {reason}");
                    self.progress.on_error(&Error::Analysis(reason)).await;
                }
            }
        }

        self.form.stage = Stage::ReadyToSubmit;
        self.progress.on_phase(Phase::Ready).await;
        Ok(())
    }

    async fn upload(&self) -> Result<String> {
        let image = self.form.image.as_ref().ok_or(Error::NoUploadedImage)?;

        let slot = self
            .api
            .request_upload_slot(image.file_name(), image.mime_type())
            .await?;

        self.api
            .upload_bytes(&slot.upload_url, image.bytes(), image.mime_type())
            .await?;

        Ok(slot.key)
    }

    async fn analyze(&self, image_key: &str) -> AnalysisOutcome {
        self.api.analyze_image(image_key).await.into()
    }

    async fn accept_analysis(&mut self, analysis: AnalysisResult) {
        self.progress.on_analysis(&analysis).await;

        if let Some(suggested) = analysis.suggestion() {
            let applied = self.form.category.is_none();
            if applied {
                self.form.category = Some(suggested);
            }
            self.progress
                .on_category_suggested(suggested, applied)
                .await;
        }

        self.form.analysis = Some(analysis);
    }

    /// Create the issue from the current form
    ///
    /// Requires an uploaded image, a category and a location. On failure the
    /// form keeps every value and the uploaded key, so calling this again
    /// resubmits without uploading.
    pub async fn submit(&mut self) -> Result<Issue> {
        if self.form.stage == Stage::Succeeded {
            return Err(Error::Validation("report already submitted".to_string()));
        }
        let fields = self.form.to_new_issue()?;

        self.form.stage = Stage::Submitting;
        self.form.error = None;
        self.progress.on_phase(Phase::Submitting).await;

        match self.api.create_issue(&fields).await {
            Ok(issue) => {
                info!(issue_id = %issue.issue_id, "issue created");
                self.form.stage = Stage::Succeeded;
                self.form.created = Some(issue.clone());
                self.progress.on_issue_created(&issue).await;
                self.progress.on_phase(Phase::Complete).await;
                Ok(issue)
            }
            Err(e) => {
                warn!("create issue failed: {e}");
                self.form.stage = Stage::Errored(FailedStep::Submit);
                self.form.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// After a successful submit, wait the confirmation delay and go to the list
    ///
    /// Returns `None` if nothing has been submitted.
    pub async fn redirect(&self) -> Option<Navigation> {
        if self.form.stage != Stage::Succeeded {
            return None;
        }
        tokio::time::sleep(self.redirect_delay).await;
        Some(Navigation::IssueList)
    }

    /// Abandon the report
    ///
    /// An already-uploaded image is left in storage.
    pub const fn cancel(&self) -> Navigation {
        Navigation::IssueList
    }
}
