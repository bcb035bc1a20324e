//! Account types.

use nest_commerce::ids::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may use the admin console.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Account ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique across accounts.
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Authorization role.
    #[serde(default)]
    pub role: Role,
    /// PHC format password hash. Never the plaintext.
    pub password_hash: String,
    /// Unix timestamp of registration, in milliseconds.
    pub created_at: i64,
}

impl Account {
    /// Create a customer account.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            role: Role::Customer,
            password_hash: password_hash.into(),
            created_at: crate::session::current_millis(),
        }
    }

    /// Set the contact phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Promote to administrator.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("customer".parse::<Role>(), Ok(Role::Customer));
        assert_eq!(Role::Admin.as_str(), "admin");
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_new_account_is_customer() {
        let account = Account::new("Asha", "asha@example.com", "$argon2id$fake");
        assert_eq!(account.role, Role::Customer);
        assert!(!account.role.is_admin());
        assert!(!account.id.as_str().is_empty());
    }

    #[test]
    fn test_with_role_promotes() {
        let account =
            Account::new("Asha", "asha@example.com", "$argon2id$fake").with_role(Role::Admin);
        assert!(account.role.is_admin());
    }
}
