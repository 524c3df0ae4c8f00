//! CLI commands
//!
//! Command implementations for the `fixit` binary.

mod issues;
mod progress;
mod report;
mod status;
mod style;
mod subscribe;

pub use issues::run_issues;
pub use report::{ReportArgs, run_report};
pub use status::run_status;
pub use subscribe::run_subscribe;
