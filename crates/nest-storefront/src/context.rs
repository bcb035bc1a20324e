//! Per-caller application context.

use crate::StorefrontError;
use nest_auth::{AuthError, Session};
use nest_store::MemoryStore;

/// Everything a service call needs: the store it operates on and the
/// session it acts as. Passed explicitly so two contexts never share
/// sign-in state by accident.
#[derive(Debug, Clone)]
pub struct AppContext {
    store: MemoryStore,
    session: Option<Session>,
}

impl AppContext {
    /// Context with nobody signed in.
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            session: None,
        }
    }

    /// Context acting as a signed-in session.
    pub fn signed_in(store: MemoryStore, session: Session) -> Self {
        Self {
            store,
            session: Some(session),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Attach a session after sign-in.
    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drop the session.
    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// The session, or an error if nobody is signed in or the session
    /// has lapsed.
    pub fn require_session(&self) -> Result<&Session, StorefrontError> {
        let session = self.session.as_ref().ok_or(StorefrontError::NotSignedIn)?;
        if session.is_expired() {
            return Err(StorefrontError::Auth(AuthError::SessionExpired));
        }
        Ok(session)
    }

    /// The session, which must additionally be an administrator.
    pub fn require_admin(&self) -> Result<&Session, StorefrontError> {
        let session = self.require_session()?;
        if !session.is_admin() {
            return Err(StorefrontError::InsufficientPermissions);
        }
        Ok(session)
    }
}
