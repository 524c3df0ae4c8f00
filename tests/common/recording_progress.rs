//! Progress callback that records every event

#![allow(dead_code)]

use async_trait::async_trait;
use campus_fix::error::Error;
use campus_fix::report::{Phase, ProgressCallback};
use campus_fix::types::{AnalysisResult, Category, Issue};
use std::sync::Mutex;

/// One recorded progress event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Phase(Phase),
    Uploaded(String),
    Analysis(AnalysisResult),
    Suggested(Category, bool),
    Created(String),
    Error(String),
    Message(String),
}

/// Records events in order for later assertions
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Phases only, in the order they were entered
    pub fn phases(&self) -> Vec<Phase> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Phase(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.push(Event::Phase(phase));
    }

    async fn on_uploaded(&self, image_key: &str) {
        self.push(Event::Uploaded(image_key.to_string()));
    }

    async fn on_analysis(&self, result: &AnalysisResult) {
        self.push(Event::Analysis(result.clone()));
    }

    async fn on_category_suggested(&self, category: Category, applied: bool) {
        self.push(Event::Suggested(category, applied));
    }

    async fn on_issue_created(&self, issue: &Issue) {
        self.push(Event::Created(issue.issue_id.clone()));
    }

    async fn on_error(&self, error: &Error) {
        self.push(Event::Error(error.to_string()));
    }

    async fn on_message(&self, message: &str) {
        self.push(Event::Message(message.to_string()));
    }
}
