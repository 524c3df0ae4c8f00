//! API service factory

use crate::api::{ApiService, HttpApiClient};
use crate::config::Config;
use crate::error::Result;

/// Create the API service described by `config`
pub fn create_api_service(config: &Config) -> Result<Box<dyn ApiService>> {
    Ok(Box::new(HttpApiClient::new(&config.base_url())?))
}
