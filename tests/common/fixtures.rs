//! Test data factories for campus-fix types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use campus_fix::report::SelectedImage;
use campus_fix::types::{
    AnalysisResult, Category, DetectedLabel, DetectedText, Issue, Location, Status,
};

/// Create an issue with default values
pub fn make_issue(issue_id: &str) -> Issue {
    Issue {
        issue_id: issue_id.to_string(),
        title: format!("Issue {issue_id}"),
        description: String::new(),
        category: Category::Electrical.into(),
        location: Location::Library.into(),
        status: Status::New.into(),
        image_key: format!("{issue_id}-img"),
        image_url: format!("https://store.test/{issue_id}-img"),
        reported_at: "2026-03-01T08:00:00Z".to_string(),
        detected_labels: None,
        detected_text: None,
    }
}

/// Create an issue with a specific category and status
pub fn make_issue_with(issue_id: &str, category: Category, status: Status) -> Issue {
    Issue {
        category: category.into(),
        status: status.into(),
        ..make_issue(issue_id)
    }
}

/// A small in-memory JPEG
pub fn make_image(file_name: &str) -> SelectedImage {
    SelectedImage::new(file_name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10])
        .expect("image/jpeg is an image type")
}

/// Analysis that spots a chair and suggests Furniture
pub fn make_chair_analysis() -> AnalysisResult {
    AnalysisResult {
        labels: vec![DetectedLabel {
            name: "Chair".to_string(),
            confidence: 97.0,
        }],
        detected_text: vec![DetectedText {
            text: "LT1".to_string(),
            confidence: 88.5,
        }],
        suggested_category: Some("Furniture".to_string()),
    }
}
