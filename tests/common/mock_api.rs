//! Mock API service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use campus_fix::api::ApiService;
use campus_fix::error::{Error, Result};
use campus_fix::issues::IssueFilter;
use campus_fix::types::{AnalysisResult, Issue, NewIssue, Status, UploadSlot};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::fixtures::make_issue;

/// Call record for `request_upload_slot`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSlotCall {
    pub file_name: String,
    pub mime_type: String,
}

/// Call record for `upload_bytes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub write_url: String,
    pub size: usize,
    pub mime_type: String,
}

/// Call record for `update_issue_status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusCall {
    pub issue_id: String,
    pub status: Status,
}

/// Hand-written mock of the facilities API
///
/// Features:
/// - Auto-incrementing issue ids (`ISS-1`, `ISS-2`, ...)
/// - Call tracking for verification
/// - Configurable slot, analysis and list responses
/// - Error injection for failure path testing, optionally for N calls only
pub struct MockApiService {
    next_issue_number: AtomicU64,
    slot: Mutex<UploadSlot>,
    analysis: Mutex<AnalysisResult>,
    issues: Mutex<Vec<Issue>>,
    // Call tracking
    upload_slot_calls: Mutex<Vec<UploadSlotCall>>,
    upload_calls: Mutex<Vec<UploadCall>>,
    analyze_calls: Mutex<Vec<String>>,
    create_calls: Mutex<Vec<NewIssue>>,
    list_calls: Mutex<Vec<IssueFilter>>,
    update_status_calls: Mutex<Vec<UpdateStatusCall>>,
    subscribe_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_upload_slot: Mutex<Option<String>>,
    error_on_upload: Mutex<Option<String>>,
    error_on_analysis: Mutex<Option<String>>,
    error_on_create: Mutex<Option<String>>,
    create_failures_left: AtomicUsize,
    error_on_list: Mutex<Option<String>>,
    error_on_subscribe: Mutex<Option<String>>,
}

impl Default for MockApiService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApiService {
    /// Mock that succeeds everywhere and suggests nothing
    pub fn new() -> Self {
        Self {
            next_issue_number: AtomicU64::new(1),
            slot: Mutex::new(UploadSlot {
                upload_url: "https://store.test/put/img-1".to_string(),
                key: "img-1".to_string(),
            }),
            analysis: Mutex::new(AnalysisResult::default()),
            issues: Mutex::new(Vec::new()),
            upload_slot_calls: Mutex::new(Vec::new()),
            upload_calls: Mutex::new(Vec::new()),
            analyze_calls: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
            list_calls: Mutex::new(Vec::new()),
            update_status_calls: Mutex::new(Vec::new()),
            subscribe_calls: Mutex::new(Vec::new()),
            error_on_upload_slot: Mutex::new(None),
            error_on_upload: Mutex::new(None),
            error_on_analysis: Mutex::new(None),
            error_on_create: Mutex::new(None),
            create_failures_left: AtomicUsize::new(0),
            error_on_list: Mutex::new(None),
            error_on_subscribe: Mutex::new(None),
        }
    }

    // === Response configuration ===

    /// Set the slot returned by `request_upload_slot`
    pub fn set_slot(&self, upload_url: &str, key: &str) {
        *self.slot.lock().unwrap() = UploadSlot {
            upload_url: upload_url.to_string(),
            key: key.to_string(),
        };
    }

    /// Set the result returned by `analyze_image`
    pub fn set_analysis(&self, analysis: AnalysisResult) {
        *self.analysis.lock().unwrap() = analysis;
    }

    /// Set the issues stored server-side
    pub fn set_issues(&self, issues: Vec<Issue>) {
        *self.issues.lock().unwrap() = issues;
    }

    // === Error injection methods ===

    /// Make `request_upload_slot` return an error
    pub fn fail_upload_slot(&self, msg: &str) {
        *self.error_on_upload_slot.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `upload_bytes` return an error
    pub fn fail_upload(&self, msg: &str) {
        *self.error_on_upload.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `analyze_image` return an error
    pub fn fail_analysis(&self, msg: &str) {
        *self.error_on_analysis.lock().unwrap() = Some(msg.to_string());
    }

    /// Make the next `times` calls to `create_issue` return an error
    pub fn fail_create(&self, msg: &str, times: usize) {
        *self.error_on_create.lock().unwrap() = Some(msg.to_string());
        self.create_failures_left.store(times, Ordering::SeqCst);
    }

    /// Make `list_issues` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `subscribe` return an error
    pub fn fail_subscribe(&self, msg: &str) {
        *self.error_on_subscribe.lock().unwrap() = Some(msg.to_string());
    }

    /// Remove every injected error
    pub fn clear_failures(&self) {
        for slot in [
            &self.error_on_upload_slot,
            &self.error_on_upload,
            &self.error_on_analysis,
            &self.error_on_create,
            &self.error_on_list,
            &self.error_on_subscribe,
        ] {
            *slot.lock().unwrap() = None;
        }
        self.create_failures_left.store(0, Ordering::SeqCst);
    }

    // === Call verification methods ===

    pub fn get_upload_slot_calls(&self) -> Vec<UploadSlotCall> {
        self.upload_slot_calls.lock().unwrap().clone()
    }

    pub fn get_upload_calls(&self) -> Vec<UploadCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    pub fn get_analyze_calls(&self) -> Vec<String> {
        self.analyze_calls.lock().unwrap().clone()
    }

    pub fn get_create_calls(&self) -> Vec<NewIssue> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn get_list_calls(&self) -> Vec<IssueFilter> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn get_update_status_calls(&self) -> Vec<UpdateStatusCall> {
        self.update_status_calls.lock().unwrap().clone()
    }

    pub fn get_subscribe_calls(&self) -> Vec<String> {
        self.subscribe_calls.lock().unwrap().clone()
    }

    /// Assert that no request of any kind was made
    pub fn assert_no_calls(&self) {
        assert!(self.get_upload_slot_calls().is_empty(), "unexpected upload slot request");
        assert!(self.get_upload_calls().is_empty(), "unexpected upload");
        assert!(self.get_analyze_calls().is_empty(), "unexpected analysis");
        assert!(self.get_create_calls().is_empty(), "unexpected create");
        assert!(self.get_subscribe_calls().is_empty(), "unexpected subscribe");
    }

    fn injected(slot: &Mutex<Option<String>>) -> Option<String> {
        slot.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiService for MockApiService {
    async fn request_upload_slot(&self, file_name: &str, mime_type: &str) -> Result<UploadSlot> {
        self.upload_slot_calls.lock().unwrap().push(UploadSlotCall {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
        });

        if let Some(msg) = Self::injected(&self.error_on_upload_slot) {
            return Err(Error::UploadSlot(msg));
        }
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn upload_bytes(&self, write_url: &str, bytes: &[u8], mime_type: &str) -> Result<()> {
        self.upload_calls.lock().unwrap().push(UploadCall {
            write_url: write_url.to_string(),
            size: bytes.len(),
            mime_type: mime_type.to_string(),
        });

        if let Some(msg) = Self::injected(&self.error_on_upload) {
            return Err(Error::Upload(msg));
        }
        Ok(())
    }

    async fn analyze_image(&self, object_key: &str) -> Result<AnalysisResult> {
        self.analyze_calls
            .lock()
            .unwrap()
            .push(object_key.to_string());

        if let Some(msg) = Self::injected(&self.error_on_analysis) {
            return Err(Error::Analysis(msg));
        }
        Ok(self.analysis.lock().unwrap().clone())
    }

    async fn create_issue(&self, fields: &NewIssue) -> Result<Issue> {
        self.create_calls.lock().unwrap().push(fields.clone());

        let failing = self
            .create_failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            let msg = Self::injected(&self.error_on_create).unwrap_or_default();
            return Err(Error::Create(msg));
        }

        let number = self.next_issue_number.fetch_add(1, Ordering::SeqCst);
        let issue = Issue {
            title: fields.title.clone(),
            description: fields.description.clone(),
            category: fields.category.into(),
            location: fields.location.into(),
            image_key: fields.image_key.clone(),
            image_url: format!("https://store.test/{}", fields.image_key),
            detected_labels: fields.detected_labels.clone(),
            detected_text: fields.detected_text.clone(),
            ..make_issue(&format!("ISS-{number}"))
        };
        self.issues.lock().unwrap().insert(0, issue.clone());
        Ok(issue)
    }

    async fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        self.list_calls.lock().unwrap().push(*filter);

        if let Some(msg) = Self::injected(&self.error_on_list) {
            return Err(Error::List(msg));
        }
        Ok(self
            .issues
            .lock()
            .unwrap()
            .iter()
            .filter(|issue| filter.matches(issue))
            .cloned()
            .collect())
    }

    async fn update_issue_status(&self, issue_id: &str, status: Status) -> Result<Issue> {
        self.update_status_calls
            .lock()
            .unwrap()
            .push(UpdateStatusCall {
                issue_id: issue_id.to_string(),
                status,
            });

        let mut issues = self.issues.lock().unwrap();
        let issue = issues
            .iter_mut()
            .find(|issue| issue.issue_id == issue_id)
            .ok_or_else(|| Error::UpdateStatus(format!("HTTP status 404 for {issue_id}")))?;
        issue.status = status.into();
        Ok(issue.clone())
    }

    async fn subscribe(&self, email: &str) -> Result<String> {
        self.subscribe_calls.lock().unwrap().push(email.to_string());

        if let Some(msg) = Self::injected(&self.error_on_subscribe) {
            return Err(Error::Subscribe(msg));
        }
        Ok(format!("Subscription pending confirmation for {email}"))
    }

    fn base_url(&self) -> &str {
        "https://api.test"
    }
}
