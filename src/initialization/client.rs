//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client used for lookups.
///
/// Creates a `reqwest::Client` configured with the User-Agent and timeout
/// from the configuration. The timeout is the only bound on a lookup; there
/// is no separate per-lookup deadline.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_defaults() {
        let config = Config::default();
        assert!(init_client(&config).is_ok());
    }

    #[test]
    fn test_init_client_custom_user_agent() {
        let config = Config {
            user_agent: "ip_tracker_test/1.0".to_string(),
            timeout_seconds: 1,
            ..Default::default()
        };
        assert!(init_client(&config).is_ok());
    }
}
