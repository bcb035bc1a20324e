//! Sign-up and sign-in.

use crate::{StorefrontConfig, StorefrontError};
use nest_auth::{Account, AuthError, PasswordHasher, Session};
use nest_store::{paths, MemoryStore};
use tracing::info;

/// Account registration and credential checks.
///
/// Accounts live as documents under `users/`; the email is the
/// uniqueness key and lookups scan the collection.
#[derive(Clone)]
pub struct AuthService {
    store: MemoryStore,
    hasher: PasswordHasher,
    session_ttl_millis: i64,
}

impl AuthService {
    /// Create a service over a store with the default session TTL.
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            session_ttl_millis: Session::DEFAULT_DURATION_MILLIS,
        }
    }

    /// Create a service taking the session TTL from configuration.
    pub fn with_config(store: MemoryStore, config: &StorefrontConfig) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            session_ttl_millis: config.session_ttl_millis,
        }
    }

    fn session_for(&self, account: &Account) -> Session {
        Session::for_account(account).with_duration(self.session_ttl_millis)
    }

    /// Register a new customer account and sign it in.
    pub fn sign_up(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<Session, StorefrontError> {
        if self.find_by_email(email)?.is_some() {
            return Err(AuthError::EmailTaken(email.to_string()).into());
        }

        let hash = self.hasher.hash(password)?;
        let account = Account::new(name, email, hash).with_phone(phone);
        self.store
            .set(&paths::user(account.id.as_str()), &account)?;

        info!(user = %account.id, "account registered");
        Ok(self.session_for(&account))
    }

    /// Sign in with email and password.
    ///
    /// Unknown email and wrong password fail identically.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, StorefrontError> {
        let account = self
            .find_by_email(email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &account.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user = %account.id, "signed in");
        Ok(self.session_for(&account))
    }

    /// Look up an account by email, case-insensitively.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorefrontError> {
        let accounts: Vec<(String, Account)> = self.store.list(&paths::users())?;
        Ok(accounts
            .into_iter()
            .map(|(_, account)| account)
            .find(|a| a.email.eq_ignore_ascii_case(email)))
    }
}
