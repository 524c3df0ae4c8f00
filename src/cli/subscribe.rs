//! Subscribe command - sign up for issue notification emails

use crate::cli::style::{Stylize, check, cross};
use anstream::{eprintln, println};
use campus_fix::api::create_api_service;
use campus_fix::config::Config;
use campus_fix::error::Result;
use campus_fix::subscription::{SubscriptionForm, SubscriptionState};

/// Run the subscribe command
pub async fn run_subscribe(config: &Config, email: &str) -> Result<()> {
    let api = create_api_service(config)?;
    let mut form = SubscriptionForm::new(email);

    match form.submit(api.as_ref()).await {
        Ok(message) => {
            println!("{} {}", check(), "Subscription request sent!".success());
            println!(
                "  Check your email ({}) and click the confirmation link to activate notifications.",
                form.email().accent()
            );
            if !message.is_empty() {
                println!("  {}", message.muted());
            }
            Ok(())
        }
        Err(e) => {
            if let SubscriptionState::Failed(message) = form.state() {
                eprintln!("{} {}", cross(), message.error());
            }
            Err(e)
        }
    }
}
