//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SEPHYX_STORE_URL` - Base URL of the remote product store API
//! - `SEPHYX_ADMIN_USERNAME` - Operator username
//! - `SEPHYX_ADMIN_PASSWORD` - Operator password
//!
//! ## Optional
//! - `SEPHYX_PREFS_PATH` - Local preference file (default: sephyx_prefs.json)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_PREFS_PATH: &str = "sephyx_prefs.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the remote product store API.
    pub store_url: Url,
    /// Operator username for the static credential pair.
    pub admin_username: String,
    /// Operator password. `SecretString` keeps it out of `Debug` output.
    pub admin_password: SecretString,
    /// Path of the local preference file.
    pub prefs_path: String,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store_url = get_required_env("SEPHYX_STORE_URL")?;
        let store_url = Url::parse(&store_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SEPHYX_STORE_URL".to_string(), e.to_string()))?;

        let admin_username = get_required_env("SEPHYX_ADMIN_USERNAME")?;
        let admin_password = get_required_env("SEPHYX_ADMIN_PASSWORD").map(SecretString::from)?;
        let prefs_path = get_env_or_default("SEPHYX_PREFS_PATH", DEFAULT_PREFS_PATH);

        Ok(Self {
            store_url,
            admin_username,
            admin_password,
            prefs_path,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("SEPHYX_STORE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SEPHYX_STORE_URL"
        );
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let config = AdminConfig {
            store_url: Url::parse("https://store.sephyx.io/api").unwrap(),
            admin_username: "admin1".to_string(),
            admin_password: SecretString::from("mash123"),
            prefs_path: DEFAULT_PREFS_PATH.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("admin1"));
        assert!(!debug_output.contains("mash123"));
    }
}
