//! Issue list state with request sequencing

use crate::api::ApiService;
use crate::error::{Error, Result};
use crate::issues::{Filter, IssueFilter};
use crate::types::{Category, Issue, Status};
use tracing::{debug, warn};

/// Message shown when the list cannot be loaded
pub const LIST_FAILED_MESSAGE: &str = "Failed to load issues. Please try again.";

/// What the list currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// A request is in flight
    Loading,
    /// Issues returned for the current filters
    Loaded(Vec<Issue>),
    /// The latest request failed
    Failed(String),
}

/// Handle for one issued list request
///
/// Responses are applied only if their ticket is still the latest one, so a
/// slow response for an old filter cannot overwrite a newer result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    filter: IssueFilter,
}

impl RequestTicket {
    /// Sequence number of this request
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Filters this request was issued with
    pub const fn filter(&self) -> &IssueFilter {
        &self.filter
    }
}

/// Issue list with category and status filters
#[derive(Debug)]
pub struct IssueListView {
    filter: IssueFilter,
    state: ListState,
    latest_seq: u64,
    error: Option<Error>,
}

impl Default for IssueListView {
    fn default() -> Self {
        Self::new(IssueFilter::default())
    }
}

impl IssueListView {
    /// Create a view with initial filters; nothing is requested yet
    pub const fn new(filter: IssueFilter) -> Self {
        Self {
            filter,
            state: ListState::Loading,
            latest_seq: 0,
            error: None,
        }
    }

    /// Current filters
    pub const fn filter(&self) -> &IssueFilter {
        &self.filter
    }

    /// Current state
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Issues currently shown (empty while loading or failed)
    pub fn issues(&self) -> &[Issue] {
        match &self.state {
            ListState::Loaded(issues) => issues,
            _ => &[],
        }
    }

    /// Take the cause of the current failure, if the latest request failed
    ///
    /// The state keeps showing [`LIST_FAILED_MESSAGE`]; this hands the
    /// underlying error to callers that need to report or log it.
    pub const fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Change the category filter and start a new request
    pub fn set_category_filter(&mut self, category: Filter<Category>) -> RequestTicket {
        self.filter.category = category;
        self.begin_request()
    }

    /// Change the status filter and start a new request
    pub fn set_status_filter(&mut self, status: Filter<Status>) -> RequestTicket {
        self.filter.status = status;
        self.begin_request()
    }

    /// Start a request for the current filters
    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest_seq += 1;
        self.state = ListState::Loading;
        debug!(seq = self.latest_seq, filter = ?self.filter, "issue list request");
        RequestTicket {
            seq: self.latest_seq,
            filter: self.filter,
        }
    }

    /// Apply a response; returns false if it was stale and dropped
    pub fn complete(&mut self, ticket: RequestTicket, response: Result<Vec<Issue>>) -> bool {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale issue list response"
            );
            return false;
        }

        self.state = match response {
            Ok(issues) => {
                self.error = None;
                ListState::Loaded(issues)
            }
            Err(e) => {
                warn!("issue list request failed: {e}");
                self.error = Some(e);
                ListState::Failed(LIST_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Fetch the list for the current filters
    pub async fn refresh(&mut self, api: &dyn ApiService) -> &ListState {
        let ticket = self.begin_request();
        let response = api.list_issues(ticket.filter()).await;
        self.complete(ticket, response);
        &self.state
    }
}
