//! Engine Configuration
//!
//! Credentials and timing knobs, loaded from the environment in production
//! and constructed directly in tests.

use std::time::Duration;

use tracing::warn;

/// Grace period between a timed game over and the automatic restart.
const DEFAULT_RESTART_GRACE: Duration = Duration::from_secs(5);

/// Static engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Credential required to start or reset a round. An empty code matches
    /// nothing, so start/reset only work through an admin token.
    pub secret_code: String,
    /// Admin password. `None` disables admin logins entirely.
    pub admin_password: Option<String>,
    /// How long a finished timed round lingers before auto-restarting.
    pub restart_grace: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            secret_code: String::new(),
            admin_password: None,
            restart_grace: DEFAULT_RESTART_GRACE,
        }
    }
}

impl EngineConfig {
    /// Load from `SECRET_CODE` and `ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        let secret_code = std::env::var("SECRET_CODE").unwrap_or_default();
        if secret_code.is_empty() {
            warn!("SECRET_CODE is not set; rounds can only be started with an admin token");
        }
        Self {
            secret_code,
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            restart_grace: DEFAULT_RESTART_GRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.secret_code.is_empty());
        assert!(config.admin_password.is_none());
        assert_eq!(config.restart_grace, Duration::from_secs(5));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("SECRET_CODE", "open-sesame");
        std::env::set_var("ADMIN_PASSWORD", "hunter2");

        let config = EngineConfig::from_env();
        assert_eq!(config.secret_code, "open-sesame");
        assert_eq!(config.admin_password.as_deref(), Some("hunter2"));

        std::env::remove_var("SECRET_CODE");
        std::env::remove_var("ADMIN_PASSWORD");
    }
}
