//! Account record.

use serde::{Deserialize, Serialize};

/// Database-assigned identifier of an `accounts` row.
pub type AccountId = i64;

/// One row of the `accounts` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// `None` before the account has been persisted.
    pub id: Option<AccountId>,
    pub email: String,
    pub username: String,
}

impl Account {
    /// Creates an unsaved account.
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            username: username.into(),
        }
    }

    /// Creates an account that refers to an existing row, e.g. for `update`.
    pub fn with_id(id: AccountId, email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(email, username)
        }
    }
}
