//! Post record.
//!
//! `account_id` is a plain logical reference; no account is loaded when a
//! post is read.

use crate::model::account::AccountId;
use serde::{Deserialize, Serialize};

/// Database-assigned identifier of a `posts` row.
pub type PostId = i64;

/// One row of the `posts` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// `None` before the post has been persisted.
    pub id: Option<PostId>,
    pub title: String,
    pub content: String,
    /// Defaults to 0, also when missing from serialized input.
    #[serde(default)]
    pub view_count: i64,
    /// Owning account.
    pub account_id: AccountId,
}

impl Post {
    /// Creates an unsaved post with zero views.
    pub fn new(title: impl Into<String>, content: impl Into<String>, account_id: AccountId) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            view_count: 0,
            account_id,
        }
    }

    /// Creates a post that refers to an existing row, e.g. for `update`.
    pub fn with_id(
        id: PostId,
        title: impl Into<String>,
        content: impl Into<String>,
        view_count: i64,
        account_id: AccountId,
    ) -> Self {
        Self {
            id: Some(id),
            view_count,
            ..Self::new(title, content, account_id)
        }
    }
}
