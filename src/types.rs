//! Core types for campus-fix

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of facility problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Chairs, desks, fittings
    Furniture,
    /// Lights, outlets, wiring
    Electrical,
    /// Hazards and missing safety equipment
    Safety,
    /// Spills, graffiti, litter
    Cleanliness,
}

impl Category {
    /// All categories in form order
    pub const ALL: [Self; 4] = [
        Self::Furniture,
        Self::Electrical,
        Self::Safety,
        Self::Cleanliness,
    ];

    /// Name as sent to and received from the API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Furniture => "Furniture",
            Self::Electrical => "Electrical",
            Self::Safety => "Safety",
            Self::Cleanliness => "Cleanliness",
        }
    }
}

/// Named campus zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Block A lecture halls
    #[serde(rename = "Block A — Lecture Halls")]
    BlockA,
    /// Block B IT labs
    #[serde(rename = "Block B — IT Labs")]
    BlockB,
    /// Block C science labs
    #[serde(rename = "Block C — Science Labs")]
    BlockC,
    /// Block D classrooms
    #[serde(rename = "Block D — Classrooms")]
    BlockD,
    /// Library
    Library,
    /// Sports complex
    #[serde(rename = "Sports Complex")]
    SportsComplex,
    /// Canteen and food court
    #[serde(rename = "Canteen & Food Court")]
    Canteen,
    /// Outdoor and common areas
    #[serde(rename = "Outdoor & Common Areas")]
    Outdoor,
}

impl Location {
    /// All locations in form order
    pub const ALL: [Self; 8] = [
        Self::BlockA,
        Self::BlockB,
        Self::BlockC,
        Self::BlockD,
        Self::Library,
        Self::SportsComplex,
        Self::Canteen,
        Self::Outdoor,
    ];

    /// Name as sent to and received from the API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlockA => "Block A — Lecture Halls",
            Self::BlockB => "Block B — IT Labs",
            Self::BlockC => "Block C — Science Labs",
            Self::BlockD => "Block D — Classrooms",
            Self::Library => "Library",
            Self::SportsComplex => "Sports Complex",
            Self::Canteen => "Canteen & Food Court",
            Self::Outdoor => "Outdoor & Common Areas",
        }
    }

    /// Short ASCII name accepted on the command line
    pub const fn slug(self) -> &'static str {
        match self {
            Self::BlockA => "block-a",
            Self::BlockB => "block-b",
            Self::BlockC => "block-c",
            Self::BlockD => "block-d",
            Self::Library => "library",
            Self::SportsComplex => "sports-complex",
            Self::Canteen => "canteen",
            Self::Outdoor => "outdoor",
        }
    }
}

/// Maintenance status of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Reported, not yet picked up
    New,
    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,
    /// Fixed
    Resolved,
}

impl Status {
    /// All statuses in workflow order
    pub const ALL: [Self; 3] = [Self::New, Self::InProgress, Self::Resolved];

    /// Name as sent to and received from the API
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }

    /// Short ASCII name accepted on the command line
    pub const fn slug(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

macro_rules! display_and_parse {
    ($ty:ty, $what:literal, |$v:ident| $slug:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|$v| {
                        $v.as_str().eq_ignore_ascii_case(wanted)
                            || ($slug).eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| Error::Parse(format!("unknown {}: {wanted}", $what)))
            }
        }
    };
}

display_and_parse!(Category, "category", |c| c.as_str());
display_and_parse!(Location, "location", |l| l.slug());
display_and_parse!(Status, "status", |s| s.slug());

/// An enumerated value as the server recorded it
///
/// The API stores these fields as free-form strings, so records written by
/// other clients may hold values outside the known set. Those decode as
/// `Other` instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recorded<T> {
    /// One of the known values
    Known(T),
    /// Anything else, verbatim
    Other(String),
}

impl<T> Recorded<T> {
    /// The known value, if it is one
    pub const fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Other(_) => None,
        }
    }
}

impl<T> From<T> for Recorded<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: PartialEq> PartialEq<T> for Recorded<T> {
    fn eq(&self, other: &T) -> bool {
        self.known() == Some(other)
    }
}

impl<T: fmt::Display> fmt::Display for Recorded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => v.fmt(f),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// A reported facility problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Server-assigned identifier
    pub issue_id: String,
    /// Short summary
    pub title: String,
    /// Free-form details
    pub description: String,
    /// Problem category
    pub category: Recorded<Category>,
    /// Where on campus
    pub location: Recorded<Location>,
    /// Maintenance status
    pub status: Recorded<Status>,
    /// Storage key of the uploaded photo
    pub image_key: String,
    /// Public URL of the uploaded photo
    pub image_url: String,
    /// Report timestamp as sent by the server
    pub reported_at: String,
    /// Objects detected in the photo, if analysis ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_labels: Option<Vec<DetectedLabel>>,
    /// Text detected in the photo, if analysis ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_text: Option<Vec<DetectedText>>,
}

impl Issue {
    /// Parsed report time, when the server sent RFC 3339
    pub fn reported_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.reported_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Report date for display (`YYYY-MM-DD` when parseable, raw otherwise)
    pub fn reported_on(&self) -> String {
        self.reported_time().map_or_else(
            || self.reported_at.clone(),
            |t| t.format("%Y-%m-%d").to_string(),
        )
    }
}

/// Single-use authorization to write one object to storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSlot {
    /// Pre-signed write URL
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    /// Object key the upload will be stored under
    pub key: String,
}

/// An object recognized in an uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLabel {
    /// Label name
    pub name: String,
    /// Confidence percentage
    pub confidence: f64,
}

/// A text fragment recognized in an uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedText {
    /// Recognized text
    pub text: String,
    /// Confidence percentage
    pub confidence: f64,
}

/// Output of image analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Detected objects
    #[serde(default)]
    pub labels: Vec<DetectedLabel>,
    /// Detected text
    #[serde(default)]
    pub detected_text: Vec<DetectedText>,
    /// Category the analysis thinks fits, as a raw string
    #[serde(default)]
    pub suggested_category: Option<String>,
}

impl AnalysisResult {
    /// Suggested category, if it names one we know
    pub fn suggestion(&self) -> Option<Category> {
        self.suggested_category
            .as_deref()
            .and_then(|s| s.parse().ok())
    }
}

/// Fields for creating an issue
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    /// Short summary
    pub title: String,
    /// Free-form details
    pub description: String,
    /// Problem category
    pub category: Category,
    /// Where on campus
    pub location: Location,
    /// Key of the already-uploaded photo
    pub image_key: String,
    /// Detected objects, sent only when analysis completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_labels: Option<Vec<DetectedLabel>>,
    /// Detected text, sent only when analysis completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_text: Option<Vec<DetectedText>>,
}
