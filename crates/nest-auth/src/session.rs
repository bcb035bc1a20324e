//! Session management.

use crate::account::{Account, Role};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use nest_commerce::ids::UserId;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 24];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session ID.
    pub id: SessionId,
    /// The signed-in account.
    pub user_id: UserId,
    /// Email of the signed-in account.
    pub email: String,
    /// Display name of the signed-in account.
    pub name: String,
    /// Role at sign-in time.
    pub role: Role,
    /// Unix millisecond timestamp of creation.
    pub created_at: i64,
    /// Unix millisecond timestamp when the session expires.
    pub expires_at: i64,
}

impl Session {
    /// Default session duration: 7 days.
    pub const DEFAULT_DURATION_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

    /// Create a session for an account.
    pub fn for_account(account: &Account) -> Self {
        let now = current_millis();
        Self {
            id: SessionId::generate(),
            user_id: account.id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            role: account.role,
            created_at: now,
            expires_at: now + Self::DEFAULT_DURATION_MILLIS,
        }
    }

    /// Create a session with a custom duration.
    pub fn with_duration(mut self, duration_millis: i64) -> Self {
        self.expires_at = self.created_at + duration_millis;
        self
    }

    /// Whether the session has expired.
    pub fn is_expired(&self) -> bool {
        current_millis() >= self.expires_at
    }

    /// Whether the session belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

pub(crate) fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("sess_"));
    }

    #[test]
    fn test_session_for_account() {
        let account = Account::new("Asha", "asha@example.com", "$argon2id$fake");
        let session = Session::for_account(&account);

        assert_eq!(session.user_id, account.id);
        assert_eq!(session.email, "asha@example.com");
        assert!(!session.is_admin());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expired_session() {
        let account = Account::new("Asha", "asha@example.com", "$argon2id$fake");
        let session = Session::for_account(&account).with_duration(-1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_admin_session() {
        let account =
            Account::new("Root", "root@example.com", "$argon2id$fake").with_role(Role::Admin);
        assert!(Session::for_account(&account).is_admin());
    }
}
