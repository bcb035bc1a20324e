//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account already uses this email.
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// No signed-in session.
    #[error("not signed in")]
    NotSignedIn,

    /// Session expired.
    #[error("session expired")]
    SessionExpired,

    /// Password too weak.
    #[error("password too weak: {0}")]
    WeakPassword(String),

    /// Insufficient permissions.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::NotSignedIn | AuthError::SessionExpired
        )
    }

    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::InsufficientPermissions)
    }
}
