//! Email notification subscription

use crate::api::ApiService;
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Shown when the subscribe request fails
pub const SUBSCRIBE_FAILED_MESSAGE: &str = "Failed to subscribe. Please try again.";

/// Subscription form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionState {
    /// Waiting for an email
    Editing,
    /// Request in flight
    Submitting,
    /// Server accepted the subscription; holds its confirmation message
    Subscribed(String),
    /// Last attempt failed; holds the user-visible message
    Failed(String),
}

/// Email subscription form
#[derive(Debug, Clone)]
pub struct SubscriptionForm {
    email: String,
    state: SubscriptionState,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email pattern is valid")
    })
}

/// Check that `email` looks like an address before sending it
pub fn validate_email(email: &str) -> Result<()> {
    if email_pattern().is_match(email.trim()) {
        Ok(())
    } else {
        Err(Error::Validation(format!("not an email address: {email}")))
    }
}

impl SubscriptionForm {
    /// Form pre-filled with `email`
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            state: SubscriptionState::Editing,
        }
    }

    /// Email entered
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replace the email
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.state = SubscriptionState::Editing;
    }

    /// Current state
    pub const fn state(&self) -> &SubscriptionState {
        &self.state
    }

    /// Send the subscription request
    ///
    /// Invalid addresses are rejected locally without a request. A failed
    /// request keeps the email so the user can retry.
    pub async fn submit(&mut self, api: &dyn ApiService) -> Result<String> {
        validate_email(&self.email)?;

        self.state = SubscriptionState::Submitting;
        match api.subscribe(self.email.trim()).await {
            Ok(message) => {
                self.state = SubscriptionState::Subscribed(message.clone());
                Ok(message)
            }
            Err(e) => {
                warn!("subscribe failed: {e}");
                self.state = SubscriptionState::Failed(SUBSCRIBE_FAILED_MESSAGE.to_string());
                Err(e)
            }
        }
    }
}
