//! Calendly token resolution from multiple sources

use log::debug;

use crate::config::credentials;
use crate::error::{ConnectorError, Result};

/// Token resolution with fallback logic
pub struct TokenResolver;

impl TokenResolver {
    /// Resolve the API token:
    /// 1. Explicit value (if provided)
    /// 2. Environment variables (CALENDLY_TOKEN, CALENDLY_API_TOKEN - in order)
    pub fn resolve(explicit: Option<&str>) -> Result<String> {
        if let Some(token) = explicit {
            debug!("Using explicitly provided token");
            return Ok(token.to_string());
        }

        for env_var in credentials::TOKEN_ENV_VARS {
            if let Ok(token) = std::env::var(env_var) {
                if !token.is_empty() {
                    debug!("Using token from {} environment variable", env_var);
                    return Ok(token);
                }
            }
        }

        Err(ConnectorError::Config(format!(
            "no Calendly token provided; set one of the environment variables: {}",
            credentials::TOKEN_ENV_VARS.join(", ")
        )))
    }
}
