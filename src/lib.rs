//! campus-fix - campus facilities issue reporting
//!
//! Client library for the facilities API: browse reported issues, report a new
//! one with a photo, and subscribe to email notifications. Persistence, image
//! storage and image analysis all live behind the remote API.

pub mod api;
pub mod config;
pub mod error;
pub mod issues;
pub mod report;
pub mod subscription;
pub mod types;
