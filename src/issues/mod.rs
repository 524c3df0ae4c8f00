//! Issue list browsing
//!
//! Filtering is done by the server: the view only forwards the selected
//! category and status, and tracks which response belongs to the latest
//! request.

mod filter;
mod view;

pub use filter::{Filter, IssueFilter};
pub use view::{IssueListView, LIST_FAILED_MESSAGE, ListState, RequestTicket};
