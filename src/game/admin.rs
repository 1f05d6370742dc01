//! Admin Capability Tokens
//!
//! Operators log in with the configured admin password and receive an opaque
//! token that authorizes maintenance operations (booting a player, clearing
//! the roster) and doubles as a start/reset credential. Tokens live only in
//! memory and are independent of game state, so they sit behind their own
//! small lock rather than the engine lock.

use std::collections::BTreeSet;
use std::sync::Mutex;

use tracing::info;
use uuid::Uuid;

/// Issued admin tokens for one engine instance.
#[derive(Debug, Default)]
pub struct AdminRegistry {
    password: Option<String>,
    tokens: Mutex<BTreeSet<String>>,
}

impl AdminRegistry {
    /// Build a registry. With no password configured, logins always fail and
    /// no admin operations are possible.
    pub fn new(password: Option<String>) -> Self {
        Self {
            password,
            tokens: Mutex::new(BTreeSet::new()),
        }
    }

    /// Exchange the admin password for a fresh token. `None` on mismatch or
    /// when no password is configured.
    pub fn login(&self, password: &str) -> Option<String> {
        let expected = self.password.as_deref()?;
        if password != expected {
            return None;
        }

        let token = Uuid::new_v4().to_string();
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(token.clone());
        }
        info!("admin login succeeded");
        Some(token)
    }

    /// Invalidate a token. Unknown tokens are ignored.
    pub fn logout(&self, token: &str) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.remove(token);
        }
    }

    /// Is this a currently issued token?
    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens
            .lock()
            .map(|tokens| tokens.contains(token))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_with_correct_password() {
        let registry = AdminRegistry::new(Some("hunter2".to_string()));

        let token = registry.login("hunter2").expect("login should succeed");
        assert!(registry.is_valid(&token));
    }

    #[test]
    fn test_login_with_wrong_password() {
        let registry = AdminRegistry::new(Some("hunter2".to_string()));

        assert!(registry.login("guess").is_none());
    }

    #[test]
    fn test_login_without_configured_password() {
        let registry = AdminRegistry::new(None);

        assert!(registry.login("").is_none());
        assert!(registry.login("anything").is_none());
    }

    #[test]
    fn test_logout_invalidates_token() {
        let registry = AdminRegistry::new(Some("hunter2".to_string()));

        let token = registry.login("hunter2").unwrap();
        registry.logout(&token);
        assert!(!registry.is_valid(&token));
    }

    #[test]
    fn test_tokens_are_independent() {
        let registry = AdminRegistry::new(Some("hunter2".to_string()));

        let first = registry.login("hunter2").unwrap();
        let second = registry.login("hunter2").unwrap();
        assert_ne!(first, second);

        registry.logout(&first);
        assert!(registry.is_valid(&second));
    }
}
