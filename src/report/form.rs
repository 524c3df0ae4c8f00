//! Report form state

use crate::error::{Error, Result};
use crate::report::SelectedImage;
use crate::types::{AnalysisResult, Category, Issue, Location, NewIssue};
use std::fmt;

/// Where the report flow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing selected
    Empty,
    /// A file is picked and previewed
    FileSelected,
    /// Getting an upload slot or writing the bytes
    Uploading,
    /// Waiting on image analysis
    Analyzing,
    /// Photo uploaded; the form can be submitted once complete
    ReadyToSubmit,
    /// Creating the issue
    Submitting,
    /// Issue created
    Succeeded,
    /// A mandatory step failed
    Errored(FailedStep),
}

/// Mandatory step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStep {
    /// Upload slot request or byte upload; retry by selecting a file again
    Upload,
    /// Issue creation; retry by submitting again
    Submit,
}

/// Field required before submitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// No uploaded photo
    ImageReference,
    /// No category chosen
    Category,
    /// No location chosen
    Location,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ImageReference => "image",
            Self::Category => "category",
            Self::Location => "location",
        })
    }
}

/// Values and transient state of one report
#[derive(Debug, Clone)]
pub struct ReportForm {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) category: Option<Category>,
    pub(super) location: Option<Location>,
    pub(super) image: Option<SelectedImage>,
    pub(super) preview: Option<String>,
    pub(super) image_key: Option<String>,
    pub(super) analysis: Option<AnalysisResult>,
    pub(super) created: Option<Issue>,
    pub(super) stage: Stage,
    pub(super) error: Option<String>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: None,
            location: None,
            image: None,
            preview: None,
            image_key: None,
            analysis: None,
            created: None,
            stage: Stage::Empty,
            error: None,
        }
    }
}

impl ReportForm {
    /// Title entered so far
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description entered so far
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Chosen (or prefilled) category
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// Chosen location
    pub const fn location(&self) -> Option<Location> {
        self.location
    }

    /// Selected image
    pub const fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    /// `data:` URL preview of the selected image
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Storage key of the uploaded image
    pub fn image_key(&self) -> Option<&str> {
        self.image_key.as_deref()
    }

    /// Analysis results, if analysis completed
    pub const fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Category suggested by analysis, if it names a known one
    pub fn suggested_category(&self) -> Option<Category> {
        self.analysis.as_ref().and_then(AnalysisResult::suggestion)
    }

    /// Whether the chosen category is the analysis suggestion
    pub fn category_is_suggested(&self) -> bool {
        self.suggested_category()
            .is_some_and(|s| self.category == Some(s))
    }

    /// Issue created by a successful submit
    pub const fn created(&self) -> Option<&Issue> {
        self.created.as_ref()
    }

    /// Current stage
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// User-visible error from the last failed step
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether an upload or submit is in flight
    pub const fn is_busy(&self) -> bool {
        matches!(
            self.stage,
            Stage::Uploading | Stage::Analyzing | Stage::Submitting
        )
    }

    /// Required fields that are still absent
    ///
    /// Title and description are not required to submit.
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.image_key.is_none() {
            missing.push(MissingField::ImageReference);
        }
        if self.category.is_none() {
            missing.push(MissingField::Category);
        }
        if self.location.is_none() {
            missing.push(MissingField::Location);
        }
        missing
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.stage != Stage::Succeeded && self.missing_fields().is_empty()
    }

    /// Build the create-issue body from the current values
    pub fn to_new_issue(&self) -> Result<NewIssue> {
        let missing = self.missing_fields();
        let (Some(image_key), Some(category), Some(location)) =
            (self.image_key.clone(), self.category, self.location)
        else {
            return Err(Error::IncompleteReport(missing));
        };

        Ok(NewIssue {
            title: self.title.clone(),
            description: self.description.clone(),
            category,
            location,
            image_key,
            detected_labels: self.analysis.as_ref().map(|a| a.labels.clone()),
            detected_text: self.analysis.as_ref().map(|a| a.detected_text.clone()),
        })
    }

    /// Start over with a newly selected file
    pub(super) fn select(&mut self, image: SelectedImage) {
        self.preview = Some(image.preview());
        self.image = Some(image);
        self.image_key = None;
        self.analysis = None;
        self.error = None;
        self.stage = Stage::FileSelected;
    }
}
