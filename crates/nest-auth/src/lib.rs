//! Authentication for Nestmart.
//!
//! Provides accounts, password hashing, and session management.

mod account;
mod error;
mod password;
mod session;

pub use account::{Account, Role};
pub use error::AuthError;
pub use password::PasswordHasher;
pub use session::{Session, SessionId};
