//! Shared test utilities

pub mod fixtures;
pub mod mock_api;
pub mod recording_progress;

pub use fixtures::*;
pub use mock_api::MockApiService;
pub use recording_progress::{Event, RecordingProgress};
